//! Procedural obstacle spawning
//!
//! Obstacles arrive along one of the four cardinal axes, aimed at the
//! platform. After each primary spawn the director may grow a chain of
//! face-adjacent obstacles ("gates") off it. Both the cadence and the chance
//! of gates rise with the number of spawns so far.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Axis;
use super::state::{ObstacleId, World};
use crate::tuning::Tuning;

/// Spawn cadence and difficulty bookkeeping for one session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnDirector {
    /// Primary spawns so far; difficulty is derived from this
    pub spawn_count: u32,
    /// Time since the last spawn (ms)
    pub elapsed_ms: f32,
}

/// A link that was just placed, so the next one can avoid doubling back
#[derive(Debug, Clone, Copy, PartialEq)]
struct Link {
    axis: Axis,
    sign: f32,
}

impl Link {
    fn reverses(&self, axis: Axis, sign: f32) -> bool {
        self.axis == axis && self.sign == -sign
    }
}

impl SpawnDirector {
    pub fn reset(&mut self) {
        self.spawn_count = 0;
        self.elapsed_ms = 0.0;
    }

    /// Advance the spawn clock by `dt_ms` and spawn if the interval has passed.
    /// Returns the IDs of all obstacles created this call (primary first).
    pub fn update(
        &mut self,
        dt_ms: f32,
        world: &mut World,
        rng: &mut Pcg32,
        tuning: &Tuning,
    ) -> Vec<ObstacleId> {
        self.elapsed_ms += dt_ms;
        let interval = tuning.spawn_interval_ms(tuning.difficulty(self.spawn_count));
        if self.elapsed_ms <= interval {
            return Vec::new();
        }
        self.elapsed_ms = 0.0;
        self.spawn(world, rng, tuning)
    }

    /// Spawn one primary obstacle and possibly a gate chain off it
    pub fn spawn(
        &mut self,
        world: &mut World,
        rng: &mut Pcg32,
        tuning: &Tuning,
    ) -> Vec<ObstacleId> {
        self.spawn_count += 1;
        let difficulty = tuning.difficulty(self.spawn_count);

        let (pos, vel) = primary_placement(rng, tuning, world.platform.center, difficulty);
        let root = world.spawn_obstacle(pos, vel);
        let mut created = vec![root];

        let probability = tuning.gate_probability(self.spawn_count);
        created.extend(grow_gate_chain(world, rng, tuning, root, probability));

        log::debug!(
            "Spawn #{} at ({:.0}, {:.0}, {:.0}) speed {:.2}, {} gate link(s)",
            self.spawn_count,
            pos.x,
            pos.y,
            pos.z,
            vel.length(),
            created.len() - 1
        );
        created
    }
}

/// Position and velocity for a primary obstacle
///
/// Distance along the approach axis is `base + r * range`, with lateral
/// jitter on both horizontal axes. Height starts at the platform top plus a
/// margin; the squared-random downward bias is clamped so obstacles never
/// sit lower than that margin.
pub fn primary_placement(
    rng: &mut Pcg32,
    tuning: &Tuning,
    platform_center: Vec3,
    difficulty: f32,
) -> (Vec3, Vec3) {
    let dist = tuning.spawn_distance_base + rng.random::<f32>() * tuning.spawn_distance_range;
    let dir = rng.random_range(0..4u8);

    let base_y = tuning.min_obstacle_y();
    let bias = rng.random::<f32>();
    let y = base_y.max(base_y - bias * bias * tuning.spawn_height_drop);

    let jitter_x = (rng.random::<f32>() - 0.5) * tuning.spawn_lateral_jitter;
    let jitter_z = (rng.random::<f32>() - 0.5) * tuning.spawn_lateral_jitter;
    let speed = (tuning.obstacle_speed_base + rng.random::<f32>() * tuning.obstacle_speed_range)
        * difficulty;

    // Side of the platform the obstacle starts on; it heads back the other way
    let side = match dir {
        0 => Vec3::X,
        1 => Vec3::NEG_X,
        2 => Vec3::Z,
        _ => Vec3::NEG_Z,
    };

    let mut pos = platform_center + side * dist + Vec3::new(jitter_x, 0.0, jitter_z);
    pos.y = y;
    (pos, -side * speed)
}

/// Grow a chain of face-adjacent obstacles starting at `root`
///
/// Each link is attempted only after a successful roll against
/// `probability`. A link tries up to `gate_attempts` random axis/sign
/// choices, rejecting the one that doubles back onto the previous link and
/// any that would sit below the minimum obstacle height. A new obstacle is
/// paired with its parent when the parent is still unpaired, so every pairing
/// stays mutual and is never retargeted. Returns the obstacles created.
pub fn grow_gate_chain(
    world: &mut World,
    rng: &mut Pcg32,
    tuning: &Tuning,
    root: ObstacleId,
    probability: f32,
) -> Vec<ObstacleId> {
    let mut created = Vec::new();
    let mut tail = root;
    let mut previous: Option<Link> = None;

    while created.len() < tuning.gate_max_links as usize && rng.random::<f32>() < probability {
        let Some(parent) = world.obstacle(tail) else {
            break;
        };
        let (parent_pos, parent_vel) = (parent.pos, parent.vel);

        let Some((link, pos)) = adjacent_slot(rng, tuning, parent_pos, previous) else {
            let links = created.len();
            log::debug!("Gate chain stopped after {} link(s): no free slot", links);
            break;
        };

        let id = world.spawn_obstacle(pos, parent_vel);
        world.pair(tail, id);
        created.push(id);
        tail = id;
        previous = Some(link);
    }

    created
}

/// Pick a face-adjacent position next to `parent`, or `None` after the attempt cap
fn adjacent_slot(
    rng: &mut Pcg32,
    tuning: &Tuning,
    parent: Vec3,
    previous: Option<Link>,
) -> Option<(Link, Vec3)> {
    let min_y = tuning.min_obstacle_y();
    for _ in 0..tuning.gate_attempts {
        let axis = Axis::ALL[rng.random_range(0..3usize)];
        let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };

        if previous.is_some_and(|p| p.reverses(axis, sign)) {
            continue;
        }

        let pos = parent + axis.unit() * sign * tuning.obstacle_size;
        if pos.y < min_y {
            continue;
        }

        return Some((Link { axis, sign }, pos));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn setup() -> (World, Pcg32, Tuning) {
        let tuning = Tuning::default();
        (World::new(&tuning), Pcg32::seed_from_u64(42), tuning)
    }

    #[test]
    fn test_no_spawn_before_interval() {
        let (mut world, mut rng, tuning) = setup();
        let mut director = SpawnDirector::default();
        let created = director.update(2500.0, &mut world, &mut rng, &tuning);
        assert!(created.is_empty());
        assert!(world.obstacles.is_empty());
        let created = director.update(1.0, &mut world, &mut rng, &tuning);
        assert!(!created.is_empty());
        assert_eq!(director.spawn_count, 1);
        assert_eq!(director.elapsed_ms, 0.0);
    }

    #[test]
    fn test_cadence_speeds_up_with_difficulty() {
        let (mut world, mut rng, tuning) = setup();
        let mut director = SpawnDirector {
            spawn_count: 100,
            elapsed_ms: 0.0,
        };
        // Difficulty 2.0 halves the interval
        let early = director.update(1250.0, &mut world, &mut rng, &tuning);
        assert!(early.is_empty());
        let due = director.update(1.0, &mut world, &mut rng, &tuning);
        assert!(!due.is_empty());
    }

    #[test]
    fn test_primary_placement_approaches_platform() {
        let (_, mut rng, tuning) = setup();
        for _ in 0..200 {
            let (pos, vel) = primary_placement(&mut rng, &tuning, Vec3::new(0.0, 300.0, 0.0), 1.0);
            assert_eq!(pos.y, tuning.min_obstacle_y());
            assert_eq!(vel.y, 0.0);
            let horizontal = Vec3::new(pos.x, 0.0, pos.z);
            let d = horizontal.length();
            assert!(d >= 1200.0 - 150.0 && d <= 1600.0 + 150.0, "distance {d}");
            // Moving toward the platform
            assert!(horizontal.dot(vel) < 0.0);
            let speed = vel.length();
            assert!((2.0..=4.0).contains(&speed));
            // Velocity lies on exactly one horizontal axis
            assert!(vel.x == 0.0 || vel.z == 0.0);
        }
    }

    #[test]
    fn test_speed_scales_with_difficulty() {
        let (_, mut rng_a, tuning) = setup();
        let mut rng_b = rng_a.clone();
        let (_, slow) = primary_placement(&mut rng_a, &tuning, Vec3::ZERO, 1.0);
        let (_, fast) = primary_placement(&mut rng_b, &tuning, Vec3::ZERO, 2.5);
        assert!((fast.length() - slow.length() * 2.5).abs() < 1e-4);
    }

    #[test]
    fn test_certain_gate_chain_is_adjacent_and_mutual() {
        let (mut world, mut rng, mut tuning) = setup();
        tuning.gate_max_links = 5;
        let root = world.spawn_obstacle(Vec3::new(1300.0, 340.0, 0.0), Vec3::new(-3.0, 0.0, 0.0));
        let chain = grow_gate_chain(&mut world, &mut rng, &tuning, root, 1.0);
        assert!(!chain.is_empty());
        assert!(chain.len() <= 5);

        let mut parent = root;
        for &id in &chain {
            let p = world.obstacle(parent).unwrap().pos;
            let o = world.obstacle(id).unwrap();
            assert!(((o.pos - p).length() - 40.0).abs() < 1e-3);
            assert!(o.pos.y >= tuning.min_obstacle_y());
            assert_eq!(o.vel, Vec3::new(-3.0, 0.0, 0.0));
            parent = id;
        }

        // Root always gets a partner; every pairing is mutual
        assert_eq!(world.obstacle(root).unwrap().paired_with, Some(chain[0]));
        for o in &world.obstacles {
            if let Some(partner) = o.paired_with {
                assert_eq!(world.obstacle(partner).unwrap().paired_with, Some(o.id));
            }
        }
    }

    #[test]
    fn test_zero_probability_never_grows() {
        let (mut world, mut rng, tuning) = setup();
        let root = world.spawn_obstacle(Vec3::new(0.0, 340.0, 1300.0), Vec3::new(0.0, 0.0, -3.0));
        let chain = grow_gate_chain(&mut world, &mut rng, &tuning, root, 0.0);
        assert!(chain.is_empty());
        assert_eq!(world.obstacles.len(), 1);
    }

    #[test]
    fn test_adjacent_slot_never_doubles_back_or_dips() {
        let (_, mut rng, tuning) = setup();
        let parent = Vec3::new(0.0, tuning.min_obstacle_y(), 0.0);
        let previous = Some(Link {
            axis: Axis::X,
            sign: 1.0,
        });
        for _ in 0..500 {
            if let Some((link, pos)) = adjacent_slot(&mut rng, &tuning, parent, previous) {
                assert!(!(link.axis == Axis::X && link.sign == -1.0));
                assert!(pos.y >= tuning.min_obstacle_y());
            }
        }
    }

    #[test]
    fn test_spawn_count_drives_difficulty() {
        let (mut world, mut rng, tuning) = setup();
        let mut director = SpawnDirector::default();
        for _ in 0..500 {
            director.spawn(&mut world, &mut rng, &tuning);
        }
        assert_eq!(director.spawn_count, 500);
        let difficulty = tuning.difficulty(director.spawn_count);
        assert_eq!(difficulty, tuning.difficulty_cap);
        director.reset();
        assert_eq!(director.spawn_count, 0);
    }
}
