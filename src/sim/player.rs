//! Player ship state: lane position, camera bank, shield lifecycle.

use glam::{Mat4, Vec3};

use crate::consts::TILT_LIMIT;

/// The ship's single horizontal degree of freedom plus its derived
/// banking feedback and power-up status.
#[derive(Debug, Clone, Default)]
pub struct PlayerState {
    /// Horizontal offset along the lane axis, unbounded
    pub lane_position: f32,
    /// Visual bank angle, bounded to the tilt limit
    pub tilt_angle: f32,
    /// A collected shield waiting for activation
    pub has_shield: bool,
    /// Immunity window currently running
    pub shield_active: bool,
    shield_expires_at_ms: f64,
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the lane center with no shield, for a fresh run.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Apply one tick of held-key movement.
    ///
    /// The ship banks toward the held direction and relaxes toward level
    /// when no key is down, never overshooting zero. The bank is visual
    /// feedback only; collision reads `lane_position` alone.
    pub fn integrate(
        &mut self,
        dt: f32,
        left_held: bool,
        right_held: bool,
        speed: f32,
        tilt_speed: f32,
        accel: f32,
    ) {
        let step = speed * dt - 0.5 * accel * dt * dt;
        let tilt_step = tilt_speed * dt - accel * dt * dt;
        if left_held {
            self.lane_position -= step;
            self.tilt_angle -= tilt_step;
        } else if right_held {
            self.lane_position += step;
            self.tilt_angle += tilt_step;
        } else {
            let decay = tilt_speed * dt + accel * dt * dt;
            if self.tilt_angle > 0.0 {
                self.tilt_angle = (self.tilt_angle - decay).max(0.0);
            } else if self.tilt_angle < 0.0 {
                self.tilt_angle = (self.tilt_angle + decay).min(0.0);
            }
        }
        self.tilt_angle = self.tilt_angle.clamp(-TILT_LIMIT, TILT_LIMIT);
    }

    /// Consume the held shield and start the immunity window. Silently
    /// does nothing without a held shield or while one is already running.
    pub fn activate_shield(&mut self, now_ms: f64, duration_ms: f64) -> bool {
        if !self.has_shield || self.shield_active {
            return false;
        }
        self.has_shield = false;
        self.shield_active = true;
        self.shield_expires_at_ms = now_ms + duration_ms;
        true
    }

    /// Expire the shield once its window has passed. True on the tick it
    /// expires.
    pub fn tick_shield(&mut self, now_ms: f64) -> bool {
        if self.shield_active && now_ms >= self.shield_expires_at_ms {
            self.shield_active = false;
            return true;
        }
        false
    }

    /// Camera pose derived from the bank angle alone: the inverse of
    /// `translate(0, 5, 30) · rotateZ(-tilt)`.
    ///
    /// The camera never follows `lane_position`; the world is rendered
    /// shifted by `-lane_position` instead, keeping the ship centered.
    pub fn camera_pose(&self) -> Mat4 {
        let placement = Mat4::from_translation(Vec3::new(0.0, 5.0, 30.0))
            * Mat4::from_rotation_z(-self.tilt_angle);
        placement.inverse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{LANE_ACCEL, LANE_SPEED, TILT_SPEED};
    use proptest::prelude::*;

    #[test]
    fn held_keys_move_the_lane() {
        let mut player = PlayerState::new();
        player.integrate(0.1, true, false, LANE_SPEED, TILT_SPEED, LANE_ACCEL);
        assert!(player.lane_position < 0.0);
        assert!(player.tilt_angle < 0.0);

        let mut player = PlayerState::new();
        player.integrate(0.1, false, true, LANE_SPEED, TILT_SPEED, LANE_ACCEL);
        assert!(player.lane_position > 0.0);
        assert!(player.tilt_angle > 0.0);
    }

    #[test]
    fn tilt_decays_to_level_without_overshoot() {
        let mut player = PlayerState::new();
        for _ in 0..30 {
            player.integrate(0.016, false, true, LANE_SPEED, TILT_SPEED, LANE_ACCEL);
        }
        assert!(player.tilt_angle > 0.0);

        for _ in 0..200 {
            player.integrate(0.016, false, false, LANE_SPEED, TILT_SPEED, LANE_ACCEL);
            assert!(player.tilt_angle >= 0.0);
        }
        assert_eq!(player.tilt_angle, 0.0);
    }

    #[test]
    fn shield_activation_consumes_the_held_shield() {
        let mut player = PlayerState::new();
        // Nothing held: silent no-op.
        assert!(!player.activate_shield(0.0, 5000.0));

        player.has_shield = true;
        assert!(player.activate_shield(1000.0, 5000.0));
        assert!(!player.has_shield);
        assert!(player.shield_active);

        // Still running at 5999ms, gone at 6000ms.
        assert!(!player.tick_shield(5999.0));
        assert!(player.shield_active);
        assert!(player.tick_shield(6000.0));
        assert!(!player.shield_active);
        // Expiry reports only once.
        assert!(!player.tick_shield(7000.0));
    }

    #[test]
    fn second_activation_waits_for_expiry() {
        let mut player = PlayerState::new();
        player.has_shield = true;
        assert!(player.activate_shield(0.0, 5000.0));

        // Banked a second pickup mid-window; activation stays a no-op.
        player.has_shield = true;
        assert!(!player.activate_shield(1000.0, 5000.0));
        assert!(player.has_shield);

        player.tick_shield(5000.0);
        assert!(player.activate_shield(5000.0, 5000.0));
    }

    #[test]
    fn camera_pose_inverts_the_placement() {
        let mut player = PlayerState::new();
        player.tilt_angle = 0.03;
        let placement = Mat4::from_translation(Vec3::new(0.0, 5.0, 30.0))
            * Mat4::from_rotation_z(-player.tilt_angle);
        let round_trip = player.camera_pose() * placement;
        assert!(round_trip.abs_diff_eq(Mat4::IDENTITY, 1e-5));
    }

    proptest! {
        #[test]
        fn tilt_stays_inside_the_limit(
            steps in prop::collection::vec((0.0f32..0.5, any::<bool>(), any::<bool>()), 1..200),
        ) {
            let mut player = PlayerState::new();
            for (dt, left, right) in steps {
                player.integrate(dt, left, right, LANE_SPEED, TILT_SPEED, LANE_ACCEL);
                prop_assert!(player.tilt_angle >= -crate::consts::TILT_LIMIT);
                prop_assert!(player.tilt_angle <= crate::consts::TILT_LIMIT);
            }
        }
    }
}
