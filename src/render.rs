//! Frame snapshots handed to the renderer.
//!
//! The simulation never issues draw calls. Once per frame the frontend
//! captures a [`FrameSnapshot`] and hands it to whatever draws the scene
//! (WebGL, a HUD layer, a test harness).

use glam::Mat4;

use crate::sim::{GamePhase, GameSession, ObstacleKind, Theme};

/// One obstacle as the renderer should place it.
///
/// `x` is already shifted into view space (world X minus the player's
/// lane): the camera stays fixed and the world slides past the ship.
#[derive(Debug, Clone, Copy)]
pub struct ObstacleInstance {
    pub x: f32,
    pub z: f32,
    pub kind: ObstacleKind,
}

/// Everything the renderer and HUD need for one frame.
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub theme: Theme,
    /// Draw wireframe outlines instead of shaded cubes
    pub outline: bool,
    pub lane_position: f32,
    pub tilt_angle: f32,
    /// View matrix, banking with the ship
    pub camera: Mat4,
    pub obstacles: Vec<ObstacleInstance>,
    pub score: u32,
    pub high_score: u32,
    pub shield_held: bool,
    pub shield_active: bool,
    /// Achievement banner text while its window is open
    pub banner: Option<&'static str>,
}

impl FrameSnapshot {
    pub fn capture(session: &GameSession, now_ms: f64) -> Self {
        let lane = session.player.lane_position;
        Self {
            phase: session.phase,
            theme: session.theme,
            outline: session.outline_enabled,
            lane_position: lane,
            tilt_angle: session.player.tilt_angle,
            camera: session.player.camera_pose(),
            obstacles: session
                .field
                .obstacles()
                .iter()
                .filter(|o| o.active)
                .map(|o| ObstacleInstance {
                    x: o.x - lane,
                    z: o.z,
                    kind: o.kind,
                })
                .collect(),
            score: session.score.rounded(),
            high_score: session.score.high().round() as u32,
            shield_held: session.player.has_shield,
            shield_active: session.player.shield_active,
            banner: session.score.notification(now_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::LANE_Z;

    #[test]
    fn obstacles_are_shifted_by_the_player_lane() {
        let mut session = GameSession::new(1);
        session.start(0.0);
        session.player.lane_position = 3.0;
        session.field.push(5.0, -20.0, ObstacleKind::Normal);

        let snapshot = FrameSnapshot::capture(&session, 0.0);
        assert_eq!(snapshot.obstacles.len(), 1);
        assert_eq!(snapshot.obstacles[0].x, 2.0);
        assert_eq!(snapshot.obstacles[0].z, -20.0);
        assert_eq!(snapshot.lane_position, 3.0);
    }

    #[test]
    fn consumed_obstacles_are_not_drawn() {
        let mut session = GameSession::new(1);
        session.start(0.0);
        let id = session.field.push(0.0, LANE_Z - 20.0, ObstacleKind::Shield).id;
        session.field.deactivate(id);

        let snapshot = FrameSnapshot::capture(&session, 0.0);
        assert!(snapshot.obstacles.is_empty());
    }
}
