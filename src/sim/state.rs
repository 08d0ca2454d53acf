//! Core simulation types shared across the sim modules.

use serde::{Deserialize, Serialize};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title and selection screens, nothing simulated
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended on a collision
    GameOver,
}

/// Difficulty selection, fixing obstacle speed and spawn cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Forward speed of obstacles (world units per second)
    pub fn obstacle_speed(self) -> f32 {
        match self {
            Difficulty::Easy => 15.0,
            Difficulty::Medium => 25.0,
            Difficulty::Hard => 100.0,
        }
    }

    /// Minimum interval between obstacle spawns (ms)
    pub fn spawn_interval_ms(self) -> f64 {
        match self {
            Difficulty::Easy => 100.0,
            Difficulty::Medium => 50.0,
            Difficulty::Hard => 45.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Visual theme. The simulation never consults it; it rides along for the
/// renderer and the music track selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Basic,
    Synthwave,
    Sky,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Basic => "Basic",
            Theme::Synthwave => "Synthwave",
            Theme::Sky => "Sky",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "basic" => Some(Theme::Basic),
            "synthwave" => Some(Theme::Synthwave),
            "sky" => Some(Theme::Sky),
            _ => None,
        }
    }
}

/// Obstacle variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Lethal on contact
    Normal,
    /// Grants a shield power-up instead of ending the run
    Shield,
}

/// A single obstacle cube
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// World X, unbounded
    pub x: f32,
    /// World Z; advances toward the player each tick
    pub z: f32,
    pub kind: ObstacleKind,
    /// Cleared when consumed or absorbed; pruned afterwards
    pub active: bool,
}

/// Events emitted by the simulation, drained once per frame by the
/// frontend for audio and overlay side effects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A shield cube was collected
    ShieldCollected,
    /// A held shield was activated
    ShieldActivated,
    /// The immunity window ran out
    ShieldExpired,
    /// A lethal cube was eaten by an active shield
    ShieldAbsorbed,
    /// A score milestone was crossed for the first time
    AchievementUnlocked { threshold: u32 },
    /// The run ended; `qualifies` means the leaderboard wants a name
    GameOver { score: u32, qualifies: bool },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_selection_round_trips() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(Difficulty::from_str(difficulty.as_str()), Some(difficulty));
        }
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn harder_difficulties_spawn_faster_cubes_more_often() {
        assert!(Difficulty::Hard.obstacle_speed() > Difficulty::Medium.obstacle_speed());
        assert!(Difficulty::Medium.obstacle_speed() > Difficulty::Easy.obstacle_speed());
        assert!(Difficulty::Hard.spawn_interval_ms() < Difficulty::Medium.spawn_interval_ms());
        assert!(Difficulty::Medium.spawn_interval_ms() < Difficulty::Easy.spawn_interval_ms());
    }
}
