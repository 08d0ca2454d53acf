//! Input capture decoupled from the simulation step.
//!
//! Browser events land in [`InputState`] asynchronously; the session
//! consumes one [`TickInput`] snapshot per tick so every tick sees a
//! consistent view. One-shot triggers fire exactly once per occurrence.

use super::state::{Difficulty, Theme};

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left_held: bool,
    pub right_held: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
    /// Music on/off toggle (one-shot)
    pub toggle_music: bool,
    /// Activate a held shield (one-shot)
    pub activate_shield: bool,
    /// Wireframe outline toggle (one-shot)
    pub toggle_outline: bool,
    /// Menu difficulty pick, if one arrived since the last tick
    pub difficulty: Option<Difficulty>,
    /// Menu theme pick
    pub theme: Option<Theme>,
}

/// Accumulates raw input events between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left_held: bool,
    right_held: bool,
    pause_toggled: bool,
    music_toggled: bool,
    shield_requested: bool,
    outline_toggled: bool,
    difficulty_selected: Option<Difficulty>,
    theme_selected: Option<Theme>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_left(&mut self, held: bool) {
        self.left_held = held;
    }

    pub fn set_right(&mut self, held: bool) {
        self.right_held = held;
    }

    pub fn trigger_pause(&mut self) {
        self.pause_toggled = true;
    }

    pub fn trigger_music(&mut self) {
        self.music_toggled = true;
    }

    pub fn trigger_shield(&mut self) {
        self.shield_requested = true;
    }

    pub fn trigger_outline(&mut self) {
        self.outline_toggled = true;
    }

    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty_selected = Some(difficulty);
    }

    pub fn select_theme(&mut self, theme: Theme) {
        self.theme_selected = Some(theme);
    }

    /// Take the per-tick snapshot. Held keys persist; one-shot triggers
    /// and menu selections are consumed.
    pub fn sample(&mut self) -> TickInput {
        TickInput {
            left_held: self.left_held,
            right_held: self.right_held,
            pause: std::mem::take(&mut self.pause_toggled),
            toggle_music: std::mem::take(&mut self.music_toggled),
            activate_shield: std::mem::take(&mut self.shield_requested),
            toggle_outline: std::mem::take(&mut self.outline_toggled),
            difficulty: self.difficulty_selected.take(),
            theme: self.theme_selected.take(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shots_fire_once() {
        let mut input = InputState::new();
        input.trigger_pause();
        input.trigger_shield();
        let first = input.sample();
        assert!(first.pause);
        assert!(first.activate_shield);
        let second = input.sample();
        assert!(!second.pause);
        assert!(!second.activate_shield);
    }

    #[test]
    fn held_keys_persist_across_samples() {
        let mut input = InputState::new();
        input.set_left(true);
        assert!(input.sample().left_held);
        assert!(input.sample().left_held);
        input.set_left(false);
        assert!(!input.sample().left_held);
    }

    #[test]
    fn menu_selections_are_consumed() {
        let mut input = InputState::new();
        input.select_difficulty(Difficulty::Hard);
        input.select_theme(Theme::Sky);
        let first = input.sample();
        assert_eq!(first.difficulty, Some(Difficulty::Hard));
        assert_eq!(first.theme, Some(Theme::Sky));
        let second = input.sample();
        assert_eq!(second.difficulty, None);
        assert_eq!(second.theme, None);
    }
}
