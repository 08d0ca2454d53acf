//! Pausable frame clock.

use crate::consts::MAX_FRAME_DT;

/// Converts absolute timestamps into per-frame deltas.
///
/// A pure value source: the caller supplies `now` in milliseconds (from
/// requestAnimationFrame, or a counter in tests) and gets back elapsed
/// seconds. While paused the delta reads as zero but the reference time
/// still advances, so unpausing never produces a catch-up jump.
#[derive(Debug, Clone, Default)]
pub struct GameClock {
    last_ms: Option<f64>,
}

impl GameClock {
    pub fn new() -> Self {
        Self { last_ms: None }
    }

    /// Elapsed seconds since the previous call, zero while paused.
    pub fn delta(&mut self, now_ms: f64, paused: bool) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        if paused {
            0.0
        } else {
            dt.clamp(0.0, MAX_FRAME_DT)
        }
    }

    /// Forget the reference time; the next delta is zero.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
