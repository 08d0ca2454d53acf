//! Score accumulation, high score, and achievements.

use crate::consts::{NOTIFY_DURATION_MS, SCORE_RATE};

/// Score milestones in ascending order. Names show up in the unlock banner.
const MILESTONES: [(u32, &str); 5] = [
    (100, "Getting Started"),
    (250, "Warmed Up"),
    (500, "Cube Dancer"),
    (1_000, "Untouchable"),
    (2_500, "Corridor Legend"),
];

/// One score milestone
#[derive(Debug, Clone)]
pub struct Achievement {
    pub threshold: u32,
    pub name: &'static str,
    pub unlocked: bool,
}

#[derive(Debug, Clone)]
struct Banner {
    name: &'static str,
    until_ms: f64,
}

/// Monotonic survival score plus the process-lifetime high score and
/// achievement flags. `reset` starts a new run; high score and unlocks
/// deliberately survive it.
#[derive(Debug, Clone)]
pub struct ScoreTracker {
    current: f32,
    high: f32,
    achievements: Vec<Achievement>,
    banner: Option<Banner>,
}

impl Default for ScoreTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self {
            current: 0.0,
            high: 0.0,
            achievements: MILESTONES
                .iter()
                .map(|&(threshold, name)| Achievement {
                    threshold,
                    name,
                    unlocked: false,
                })
                .collect(),
            banner: None,
        }
    }

    /// Accrue survival time. Frozen while paused.
    pub fn tick(&mut self, dt: f32, paused: bool) {
        if paused {
            return;
        }
        self.current += dt * SCORE_RATE;
        self.high = self.high.max(self.current);
    }

    /// Unlock any newly crossed milestones in ascending order, returning
    /// their thresholds. Each fires at most once per process lifetime.
    pub fn check_achievements(&mut self, now_ms: f64) -> Vec<u32> {
        let mut fired = Vec::new();
        for achievement in &mut self.achievements {
            if !achievement.unlocked && self.current >= achievement.threshold as f32 {
                achievement.unlocked = true;
                self.banner = Some(Banner {
                    name: achievement.name,
                    until_ms: now_ms + NOTIFY_DURATION_MS,
                });
                fired.push(achievement.threshold);
            }
        }
        fired
    }

    /// Banner text while its display window is open. Polled each frame;
    /// there is no timer to cancel.
    pub fn notification(&self, now_ms: f64) -> Option<&'static str> {
        self.banner
            .as_ref()
            .filter(|banner| now_ms < banner.until_ms)
            .map(|banner| banner.name)
    }

    /// New run: score back to zero. High score and unlocks persist.
    pub fn reset(&mut self) {
        self.current = 0.0;
        self.banner = None;
    }

    /// The back-to-menu quirk: the high score goes too.
    pub fn reset_high_score(&mut self) {
        self.high = 0.0;
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn high(&self) -> f32 {
        self.high
    }

    /// Current score as whole points, for display and the leaderboard.
    pub fn rounded(&self) -> u32 {
        self.current.round() as u32
    }

    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }
}
