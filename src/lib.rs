//! Cube Runner - a lane-dodging 3D arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, collisions, game state)
//! - `render`: Per-frame snapshots consumed by the external renderer
//! - `audio`: Event-to-sound mapping over Web Audio
//! - `settings`: Player preferences
//! - `highscores`: Top-10 leaderboard

pub mod audio;
pub mod highscores;
pub mod render;
pub mod settings;
pub mod sim;

pub use highscores::Leaderboard;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Largest frame delta fed to the simulation (tab-switch protection)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Z coordinate of the lane the ship rides; obstacles travel toward +Z
    pub const LANE_Z: f32 = 10.0;
    /// Obstacle cube edge length
    pub const CUBE_SIZE: f32 = 4.0;
    /// Half edge, the box extent used for collision
    pub const CUBE_HALF_SIZE: f32 = CUBE_SIZE / 2.0;

    /// Z coordinate where obstacles spawn, far up the corridor
    pub const SPAWN_Z: f32 = -50.0;
    /// Obstacles past this Z are discarded
    pub const DESPAWN_Z: f32 = 30.0;
    /// Spawn X offset band around the player's current lane
    pub const SPAWN_BAND: f32 = 40.0;
    /// Probability a spawned cube is a shield pickup
    pub const SHIELD_PROBABILITY: f64 = 0.03;
    /// Shield immunity window after activation (ms)
    pub const SHIELD_DURATION_MS: f64 = 5_000.0;

    /// Lane-shift speed (world units per second)
    pub const LANE_SPEED: f32 = 25.0;
    /// Lane-shift easing acceleration
    pub const LANE_ACCEL: f32 = 0.5;
    /// Bank rate while a direction key is held (radians per second)
    pub const TILT_SPEED: f32 = 0.09;
    /// Bank easing acceleration
    pub const TILT_ACCEL: f32 = 0.02;
    /// The camera bank never exceeds this angle (radians)
    pub const TILT_LIMIT: f32 = 0.045;

    /// Score gained per second survived
    pub const SCORE_RATE: f32 = 10.0;
    /// Achievement banner display window (ms)
    pub const NOTIFY_DURATION_MS: f64 = 5_000.0;
}
