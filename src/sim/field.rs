//! The live obstacle set: spawn cadence, advancement, pruning, queries.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::overlaps_xz;
use super::state::{Difficulty, Obstacle, ObstacleKind};
use crate::consts::{DESPAWN_Z, SHIELD_PROBABILITY, SPAWN_BAND, SPAWN_Z};

/// Owns every live obstacle plus the spawn schedule. Randomness comes
/// from a single seeded stream, so a field replays identically for the
/// same seed and call sequence.
#[derive(Debug, Clone)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    advance_speed: f32,
    spawn_interval_ms: f64,
    last_spawn_ms: f64,
    rng: Pcg32,
    next_id: u32,
}

impl ObstacleField {
    /// Empty field configured for `difficulty`, seeded for determinism.
    pub fn new(seed: u64, difficulty: Difficulty) -> Self {
        Self {
            obstacles: Vec::new(),
            advance_speed: difficulty.obstacle_speed(),
            spawn_interval_ms: difficulty.spawn_interval_ms(),
            last_spawn_ms: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Re-point speed and cadence at a difficulty row.
    pub fn configure(&mut self, difficulty: Difficulty) {
        self.advance_speed = difficulty.obstacle_speed();
        self.spawn_interval_ms = difficulty.spawn_interval_ms();
    }

    /// Clear the field and restart the spawn schedule at `now_ms`.
    pub fn reset(&mut self, now_ms: f64) {
        self.obstacles.clear();
        self.last_spawn_ms = now_ms;
    }

    /// Spawn at most one obstacle if the cadence interval has elapsed.
    ///
    /// New cubes appear far up the corridor at a random X anchored to the
    /// player's current lane, so they always land in a reachable band.
    pub fn maybe_spawn(&mut self, now_ms: f64, player_lane: f32) -> Option<&Obstacle> {
        if now_ms - self.last_spawn_ms < self.spawn_interval_ms {
            return None;
        }
        self.last_spawn_ms = now_ms;
        let kind = if self.rng.random_bool(SHIELD_PROBABILITY) {
            ObstacleKind::Shield
        } else {
            ObstacleKind::Normal
        };
        let x = player_lane + self.rng.random_range(-SPAWN_BAND..SPAWN_BAND);
        Some(self.push(x, SPAWN_Z, kind))
    }

    /// Add an obstacle at an explicit position, returning it.
    pub fn push(&mut self, x: f32, z: f32, kind: ObstacleKind) -> &Obstacle {
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle {
            id,
            x,
            z,
            kind,
            active: true,
        });
        let last = self.obstacles.len() - 1;
        &self.obstacles[last]
    }

    /// Move every active obstacle down the corridor.
    pub fn advance(&mut self, dt: f32) {
        for obstacle in self.obstacles.iter_mut().filter(|o| o.active) {
            obstacle.z += self.advance_speed * dt;
        }
    }

    /// Drop consumed obstacles and those past the despawn plane.
    ///
    /// Runs after collision resolution, so a cube consumed this tick is
    /// still present for the frame it was collected on. Returns how many
    /// active cubes left the corridor past the ship (dodged).
    pub fn prune(&mut self) -> u32 {
        let mut dodged = 0;
        self.obstacles.retain(|o| {
            if !o.active {
                return false;
            }
            if o.z >= DESPAWN_Z {
                dodged += 1;
                return false;
            }
            true
        });
        dodged
    }

    /// IDs of active obstacles overlapping the ship's box, in spawn order.
    pub fn collisions_against(&self, player_lane: f32, lane_z: f32, half_size: f32) -> Vec<u32> {
        self.obstacles
            .iter()
            .filter(|o| o.active && overlaps_xz(o.x, o.z, player_lane, lane_z, half_size))
            .map(|o| o.id)
            .collect()
    }

    /// Mark an obstacle consumed. It stays in the set until pruned, and
    /// no longer answers collision queries.
    pub fn deactivate(&mut self, id: u32) {
        if let Some(obstacle) = self.obstacles.iter_mut().find(|o| o.id == id) {
            obstacle.active = false;
        }
    }

    pub fn get(&self, id: u32) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id == id)
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CUBE_HALF_SIZE, LANE_Z};

    #[test]
    fn spawns_exactly_one_per_elapsed_interval() {
        let mut field = ObstacleField::new(7, Difficulty::Easy);
        field.reset(0.0);

        // Calls spaced at least an interval apart each create one cube.
        assert!(field.maybe_spawn(100.0, 0.0).is_some());
        assert!(field.maybe_spawn(200.0, 0.0).is_some());
        assert!(field.maybe_spawn(350.0, 0.0).is_some());
        assert_eq!(field.len(), 3);

        // Calls inside the interval create none.
        assert!(field.maybe_spawn(380.0, 0.0).is_none());
        assert!(field.maybe_spawn(449.0, 0.0).is_none());
        assert_eq!(field.len(), 3);
    }

    #[test]
    fn spawn_lands_in_reach_of_the_player_lane() {
        let mut field = ObstacleField::new(21, Difficulty::Medium);
        field.reset(0.0);
        let lane = 250.0;
        for i in 1..=50 {
            if let Some(obstacle) = field.maybe_spawn(i as f64 * 60.0, lane) {
                assert!((obstacle.x - lane).abs() <= crate::consts::SPAWN_BAND);
                assert_eq!(obstacle.z, crate::consts::SPAWN_Z);
            }
        }
        assert!(!field.is_empty());
    }

    #[test]
    fn advance_moves_active_cubes_only() {
        let mut field = ObstacleField::new(1, Difficulty::Easy);
        let moving = field.push(0.0, -50.0, ObstacleKind::Normal).id;
        let consumed = field.push(5.0, -50.0, ObstacleKind::Shield).id;
        field.deactivate(consumed);

        field.advance(2.0); // Easy speed 15 -> +30
        assert_eq!(field.get(moving).unwrap().z, -20.0);
        assert_eq!(field.get(consumed).unwrap().z, -50.0);
    }

    #[test]
    fn prune_is_idempotent_and_counts_dodges() {
        let mut field = ObstacleField::new(1, Difficulty::Easy);
        field.push(0.0, 35.0, ObstacleKind::Normal); // past the despawn plane
        field.push(0.0, 0.0, ObstacleKind::Normal); // still live
        let consumed = field.push(0.0, 5.0, ObstacleKind::Shield).id;
        field.deactivate(consumed);

        assert_eq!(field.prune(), 1);
        assert_eq!(field.len(), 1);
        // A second prune with no intervening advance changes nothing.
        assert_eq!(field.prune(), 0);
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn consumed_cubes_leave_collision_queries() {
        let mut field = ObstacleField::new(1, Difficulty::Easy);
        let id = field.push(0.0, LANE_Z, ObstacleKind::Shield).id;
        assert_eq!(field.collisions_against(0.0, LANE_Z, CUBE_HALF_SIZE), vec![id]);

        field.deactivate(id);
        assert!(field.collisions_against(0.0, LANE_Z, CUBE_HALF_SIZE).is_empty());
    }

    #[test]
    fn same_seed_replays_the_same_spawns() {
        let mut a = ObstacleField::new(99, Difficulty::Medium);
        let mut b = ObstacleField::new(99, Difficulty::Medium);
        a.reset(0.0);
        b.reset(0.0);
        for i in 1..=20 {
            let now = i as f64 * 60.0;
            a.maybe_spawn(now, 3.0);
            b.maybe_spawn(now, 3.0);
        }
        let xs_a: Vec<f32> = a.obstacles().iter().map(|o| o.x).collect();
        let xs_b: Vec<f32> = b.obstacles().iter().map(|o| o.x).collect();
        assert_eq!(xs_a, xs_b);
    }
}
