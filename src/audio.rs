//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed.
//! Native builds compile to a silent stub.

use crate::settings::Settings;
use crate::sim::{GameEvent, Theme};

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Menu button press
    MenuSelect,
    /// Shield cube collected
    ShieldPickup,
    /// Held shield activated
    ShieldActivate,
    /// Immunity window ran out
    ShieldExpire,
    /// Lethal cube eaten by the shield
    ShieldAbsorb,
    /// Score milestone unlocked
    Achievement,
    /// Run ended on a collision
    Crash,
    /// Run ended with a leaderboard entry
    HighScore,
}

/// Background loop chosen by the selected theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    BasicLoop,
    SynthwaveLoop,
    SkyLoop,
}

impl MusicTrack {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Basic => MusicTrack::BasicLoop,
            Theme::Synthwave => MusicTrack::SynthwaveLoop,
            Theme::Sky => MusicTrack::SkyLoop,
        }
    }
}

/// Map a simulation event to the effect it should trigger
pub fn effect_for(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::ShieldCollected => Some(SoundEffect::ShieldPickup),
        GameEvent::ShieldActivated => Some(SoundEffect::ShieldActivate),
        GameEvent::ShieldExpired => Some(SoundEffect::ShieldExpire),
        GameEvent::ShieldAbsorbed => Some(SoundEffect::ShieldAbsorb),
        GameEvent::AchievementUnlocked { .. } => Some(SoundEffect::Achievement),
        GameEvent::GameOver {
            qualifies: true, ..
        } => Some(SoundEffect::HighScore),
        GameEvent::GameOver { .. } => Some(SoundEffect::Crash),
    }
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    music_enabled: bool,
    master_volume: f32,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        #[cfg(target_arch = "wasm32")]
        let ctx = {
            // May fail outside a secure context.
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            ctx
        };
        Self {
            #[cfg(target_arch = "wasm32")]
            ctx,
            music_enabled: settings.music_enabled,
            master_volume: settings.master_volume,
        }
    }

    /// Resume audio context (required after user gesture)
    #[cfg(target_arch = "wasm32")]
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn resume(&self) {}

    pub fn set_music_enabled(&mut self, enabled: bool) {
        if self.music_enabled != enabled {
            self.music_enabled = enabled;
            log::info!("Music {}", if enabled { "on" } else { "off" });
        }
    }

    pub fn music_enabled(&self) -> bool {
        self.music_enabled
    }

    /// The loop the frontend should have playing, or None when muted
    pub fn current_track(&self, theme: Theme) -> Option<MusicTrack> {
        self.music_enabled.then(|| MusicTrack::for_theme(theme))
    }

    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Play a sound effect
    #[cfg(target_arch = "wasm32")]
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.master_volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::MenuSelect => self.play_menu_select(ctx, vol),
            SoundEffect::ShieldPickup => self.play_shield_pickup(ctx, vol),
            SoundEffect::ShieldActivate => self.play_shield_activate(ctx, vol),
            SoundEffect::ShieldExpire => self.play_shield_expire(ctx, vol),
            SoundEffect::ShieldAbsorb => self.play_shield_absorb(ctx, vol),
            SoundEffect::Achievement => self.play_achievement(ctx, vol),
            SoundEffect::Crash => self.play_crash(ctx, vol),
            SoundEffect::HighScore => self.play_high_score(ctx, vol),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn play(&self, _effect: SoundEffect) {}

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    #[cfg(target_arch = "wasm32")]
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Menu select - short click
    #[cfg(target_arch = "wasm32")]
    fn play_menu_select(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 500.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.25, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.06)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.08).ok();
    }

    /// Shield pickup - rising chirp
    #[cfg(target_arch = "wasm32")]
    fn play_shield_pickup(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.2)
            .ok();
        osc.frequency().set_value_at_time(400.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(1200.0, t + 0.15)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.25).ok();
    }

    /// Shield activate - warm hum fading in and out
    #[cfg(target_arch = "wasm32")]
    fn play_shield_activate(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(0.01, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(vol * 0.45, t + 0.08)
            .ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.4)
            .ok();
        osc.frequency().set_value_at_time(220.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(440.0, t + 0.3)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.45).ok();
    }

    /// Shield expire - falling tone
    #[cfg(target_arch = "wasm32")]
    fn play_shield_expire(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 600.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.25)
            .ok();
        osc.frequency().set_value_at_time(600.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(200.0, t + 0.25)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.3).ok();
    }

    /// Shield absorb - muffled thump
    #[cfg(target_arch = "wasm32")]
    fn play_shield_absorb(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok();
        osc.frequency().set_value_at_time(120.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(50.0, t + 0.12)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Achievement - two-note fanfare
    #[cfg(target_arch = "wasm32")]
    fn play_achievement(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 523.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        if let Some((osc, gain)) = self.create_osc(ctx, 784.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(0.001, t).ok();
            gain.gain().set_value_at_time(vol * 0.25, t + 0.12).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.4).ok();
        }
    }

    /// Crash - low sawtooth rumble
    #[cfg(target_arch = "wasm32")]
    fn play_crash(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 110.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.6, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.6)
            .ok();
        osc.frequency().set_value_at_time(110.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(30.0, t + 0.6)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.7).ok();
    }

    /// High score - ascending arpeggio
    #[cfg(target_arch = "wasm32")]
    fn play_high_score(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        for (i, freq) in [523.0_f32, 659.0, 784.0, 1047.0].iter().enumerate() {
            let start = t + i as f64 * 0.12;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                gain.gain().set_value_at_time(0.001, t).ok();
                gain.gain().set_value_at_time(vol * 0.3, start).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, start + 0.25)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(start + 0.25).ok();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_event_maps_to_an_effect() {
        let events = [
            GameEvent::ShieldCollected,
            GameEvent::ShieldActivated,
            GameEvent::ShieldExpired,
            GameEvent::ShieldAbsorbed,
            GameEvent::AchievementUnlocked { threshold: 100 },
            GameEvent::GameOver {
                score: 10,
                qualifies: false,
            },
        ];
        for event in events {
            assert!(effect_for(&event).is_some());
        }
        assert_eq!(
            effect_for(&GameEvent::GameOver {
                score: 900,
                qualifies: true
            }),
            Some(SoundEffect::HighScore)
        );
    }

    #[test]
    fn muting_clears_the_track_selection() {
        let mut audio = AudioManager::new(&Settings::default());
        assert_eq!(
            audio.current_track(Theme::Synthwave),
            Some(MusicTrack::SynthwaveLoop)
        );
        audio.set_music_enabled(false);
        assert_eq!(audio.current_track(Theme::Synthwave), None);
    }
}
