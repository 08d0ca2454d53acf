//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time enters as explicit `now`/`dt` values, never read ambiently
//! - Seeded RNG only
//! - One `update` per frame, no internal parallelism
//! - No rendering, DOM, or audio dependencies

pub mod clock;
pub mod collision;
pub mod field;
pub mod input;
pub mod player;
pub mod score;
pub mod session;
pub mod state;

pub use clock::GameClock;
pub use collision::overlaps_xz;
pub use field::ObstacleField;
pub use input::{InputState, TickInput};
pub use player::PlayerState;
pub use score::{Achievement, ScoreTracker};
pub use session::GameSession;
pub use state::{Difficulty, GameEvent, GamePhase, Obstacle, ObstacleKind, Theme};
