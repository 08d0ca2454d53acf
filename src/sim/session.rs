//! The top-level game state machine and per-tick orchestration.

use super::clock::GameClock;
use super::field::ObstacleField;
use super::input::TickInput;
use super::player::PlayerState;
use super::score::ScoreTracker;
use super::state::{Difficulty, GameEvent, GamePhase, ObstacleKind, Theme};
use crate::consts::{CUBE_HALF_SIZE, LANE_ACCEL, LANE_SPEED, LANE_Z, SHIELD_DURATION_MS, TILT_SPEED};
use crate::highscores::Leaderboard;
use crate::settings::Settings;

/// One full game: player, obstacle field, score tracker, and the phase
/// machine tying them together. The process-wide leaderboard is passed
/// in by the caller rather than owned here.
#[derive(Debug)]
pub struct GameSession {
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub theme: Theme,
    pub player: PlayerState,
    pub field: ObstacleField,
    pub score: ScoreTracker,
    pub music_enabled: bool,
    pub outline_enabled: bool,
    /// Cubes that made it past the ship this run
    pub obstacles_dodged: u32,
    /// Shield pickups grabbed this run
    pub shields_collected: u32,
    clock: GameClock,
    events: Vec<GameEvent>,
    awaiting_name: bool,
}

impl GameSession {
    pub fn new(seed: u64) -> Self {
        let difficulty = Difficulty::default();
        Self {
            phase: GamePhase::Menu,
            difficulty,
            theme: Theme::default(),
            player: PlayerState::new(),
            field: ObstacleField::new(seed, difficulty),
            score: ScoreTracker::new(),
            music_enabled: true,
            outline_enabled: false,
            obstacles_dodged: 0,
            shields_collected: 0,
            clock: GameClock::new(),
            events: Vec::new(),
            awaiting_name: false,
        }
    }

    /// Session pre-configured from stored preferences.
    pub fn with_settings(seed: u64, settings: &Settings) -> Self {
        let mut session = Self::new(seed);
        session.difficulty = settings.difficulty;
        session.theme = settings.theme;
        session.music_enabled = settings.music_enabled;
        session.field.configure(settings.difficulty);
        session
    }

    /// Menu → Playing. No-op from any other phase.
    pub fn start(&mut self, now_ms: f64) {
        if self.phase != GamePhase::Menu {
            return;
        }
        self.begin_run(now_ms);
    }

    /// GameOver → Playing with the same difficulty and theme. The high
    /// score survives.
    pub fn reset_game(&mut self, now_ms: f64) {
        if self.phase != GamePhase::GameOver {
            return;
        }
        self.begin_run(now_ms);
    }

    /// GameOver → Menu. Also wipes the high score, matching the original
    /// game's menu button.
    pub fn main_menu(&mut self) {
        if self.phase != GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::Menu;
        self.score.reset();
        self.score.reset_high_score();
        self.awaiting_name = false;
    }

    fn begin_run(&mut self, now_ms: f64) {
        self.phase = GamePhase::Playing;
        self.player.reset();
        self.field.configure(self.difficulty);
        self.field.reset(now_ms);
        self.score.reset();
        self.obstacles_dodged = 0;
        self.shields_collected = 0;
        self.awaiting_name = false;
        log::info!(
            "Run started ({} / {})",
            self.difficulty.as_str(),
            self.theme.as_str()
        );
    }

    /// Advance the session by one frame.
    ///
    /// The order is fixed: input effects, clock, spawn, advance,
    /// collisions (pickups before lethal hits), prune, player movement,
    /// shield expiry, score, achievements.
    pub fn update(&mut self, input: &TickInput, now_ms: f64, leaderboard: &Leaderboard) {
        // Menu selections only apply before a run starts.
        if self.phase == GamePhase::Menu {
            if let Some(difficulty) = input.difficulty {
                self.difficulty = difficulty;
                self.field.configure(difficulty);
            }
            if let Some(theme) = input.theme {
                self.theme = theme;
            }
        }

        if input.toggle_music {
            self.music_enabled = !self.music_enabled;
        }
        if input.toggle_outline {
            self.outline_enabled = !self.outline_enabled;
        }

        if input.pause {
            match self.phase {
                GamePhase::Playing => self.phase = GamePhase::Paused,
                GamePhase::Paused => self.phase = GamePhase::Playing,
                _ => {}
            }
        }

        let dt = self.clock.delta(now_ms, self.phase != GamePhase::Playing);
        if self.phase != GamePhase::Playing {
            return;
        }

        if input.activate_shield && self.player.activate_shield(now_ms, SHIELD_DURATION_MS) {
            self.events.push(GameEvent::ShieldActivated);
        }

        self.field.maybe_spawn(now_ms, self.player.lane_position);
        self.field.advance(dt);
        if self.resolve_collisions(leaderboard) {
            // Lethal hit: the scene freezes at the moment of impact.
            return;
        }
        self.obstacles_dodged += self.field.prune();
        self.player.integrate(
            dt,
            input.left_held,
            input.right_held,
            LANE_SPEED,
            TILT_SPEED,
            LANE_ACCEL,
        );
        if self.player.tick_shield(now_ms) {
            self.events.push(GameEvent::ShieldExpired);
        }
        self.score.tick(dt, false);
        for threshold in self.score.check_achievements(now_ms) {
            self.events.push(GameEvent::AchievementUnlocked { threshold });
        }
    }

    /// Pickups resolve strictly before lethal checks, so colliding with a
    /// shield cube can never end the run. Returns true on a lethal hit.
    fn resolve_collisions(&mut self, leaderboard: &Leaderboard) -> bool {
        let hits = self
            .field
            .collisions_against(self.player.lane_position, LANE_Z, CUBE_HALF_SIZE);

        for &id in &hits {
            if self
                .field
                .get(id)
                .is_some_and(|o| o.kind == ObstacleKind::Shield)
            {
                self.field.deactivate(id);
                self.player.has_shield = true;
                self.shields_collected += 1;
                self.events.push(GameEvent::ShieldCollected);
            }
        }

        for &id in &hits {
            let Some(obstacle) = self.field.get(id) else {
                continue;
            };
            if obstacle.kind != ObstacleKind::Normal || !obstacle.active {
                continue;
            }
            if self.player.shield_active {
                self.field.deactivate(id);
                self.events.push(GameEvent::ShieldAbsorbed);
                continue;
            }
            self.phase = GamePhase::GameOver;
            let score = self.score.rounded();
            let qualifies = leaderboard.qualifies(score);
            self.awaiting_name = qualifies;
            self.events.push(GameEvent::GameOver { score, qualifies });
            log::info!(
                "Game over at {} points{}",
                score,
                if qualifies { ", leaderboard entry" } else { "" }
            );
            return true;
        }
        false
    }

    /// Record the pending leaderboard entry once game-over name input
    /// arrives. Returns the 1-indexed rank.
    pub fn submit_name(&mut self, name: &str, leaderboard: &mut Leaderboard) -> Option<usize> {
        if self.phase != GamePhase::GameOver || !self.awaiting_name {
            return None;
        }
        self.awaiting_name = false;
        leaderboard.insert(name, self.score.rounded())
    }

    /// True between a qualifying game-over and the name submission.
    pub fn awaiting_name_entry(&self) -> bool {
        self.awaiting_name
    }

    /// Queued simulation events, clearing the queue.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
