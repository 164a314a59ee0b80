//! Fixed-tick player physics, obstacle kinematics and despawning
//!
//! Velocities are per tick. Nothing here can fail: out-of-range states are
//! clamped or snapped and the simulation carries on. The single terminal
//! condition (falling to the ground) is reported, not raised.

use glam::Vec3;

use super::aabb::Aabb;
use super::collision::{Axis, in_gate_gap, push_out, separating_pushes};
use super::state::{Obstacle, ObstacleId, Player, World};
use crate::tuning::Tuning;

/// Outcome of the vertical step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalStep {
    /// Still in the air
    Airborne,
    /// Snapped onto the platform top this tick
    Landed,
    /// Fell past the ground next to the platform; the run is over
    FellToGround,
}

/// Apply gravity and resolve against the platform and ground
///
/// On [`VerticalStep::FellToGround`] the player's position is left
/// uncommitted (the last on-screen pose is kept for the game-over frame).
pub fn step_vertical(
    player: &mut Player,
    world: &World,
    tuning: &Tuning,
    difficulty: f32,
) -> VerticalStep {
    player.vel_y += tuning.gravity * difficulty;
    let mut new_y = player.pos.y + player.vel_y;
    let bottom = new_y - player.half_size;

    let platform = &world.platform;
    let top = platform.top();
    let over_platform = platform.contains_xz(player.pos);

    let mut outcome = VerticalStep::Airborne;
    if over_platform && bottom < top && bottom > top - tuning.landing_band && player.vel_y <= 0.0 {
        new_y = top + player.half_size;
        player.vel_y = 0.0;
        outcome = VerticalStep::Landed;
    }

    if !over_platform && bottom < world.ground_y {
        return VerticalStep::FellToGround;
    }

    player.pos.y = new_y;
    outcome
}

/// Passes over the obstacle set before a wedged player is left where it is
const MAX_RESOLVE_PASSES: usize = 4;

/// Push the player out of every obstacle it overlaps
///
/// Paired obstacles are skipped while the player stands in their shared gap.
/// Each collision is resolved along its minimum-penetration axis unless that
/// push would bury the player in another solid obstacle, in which case the
/// next shallowest axis is tried. Passes repeat until nothing is hit. On the
/// vertical axis, velocity is zeroed only when it points into the obstacle.
/// Returns how many obstacles were resolved.
pub fn resolve_obstacles(player: &mut Player, world: &World, tuning: &Tuning) -> usize {
    let mut resolved = 0;
    for _ in 0..MAX_RESOLVE_PASSES {
        let hits = resolve_pass(player, world, tuning.obstacle_size);
        if hits == 0 {
            break;
        }
        resolved += hits;
    }
    resolved
}

fn resolve_pass(player: &mut Player, world: &World, edge: f32) -> usize {
    let mut resolved = 0;

    for obstacle in &world.obstacles {
        if in_gate(player.pos, obstacle, world, edge) {
            continue;
        }

        let obstacle_box = obstacle.bounds(edge);
        let player_box = player.bounds();
        let Some(pushes) = separating_pushes(&player_box, &obstacle_box) else {
            continue;
        };

        let clear = pushes.iter().find_map(|result| {
            let pos = push_out(&player_box, &obstacle_box, result);
            let moved = Aabb {
                center: pos,
                ..player_box
            };
            (!buried(&moved, obstacle.id, world, edge)).then_some((result, pos))
        });
        let (result, pos) = match clear {
            Some(found) => found,
            None => (&pushes[0], push_out(&player_box, &obstacle_box, &pushes[0])),
        };

        player.pos = pos;
        if result.axis == Axis::Y {
            let pushed_down = result.normal.y < 0.0;
            if (pushed_down && player.vel_y > 0.0) || (!pushed_down && player.vel_y < 0.0) {
                player.vel_y = 0.0;
            }
        }
        resolved += 1;
    }

    resolved
}

fn in_gate(point: Vec3, obstacle: &Obstacle, world: &World, edge: f32) -> bool {
    let partner = obstacle.paired_with.and_then(|id| world.obstacle(id));
    partner.is_some_and(|p| in_gate_gap(point, obstacle.pos, p.pos, edge))
}

/// Whether `mover` overlaps any solid obstacle other than `except`
fn buried(mover: &Aabb, except: ObstacleId, world: &World, edge: f32) -> bool {
    world
        .obstacles
        .iter()
        .filter(|o| o.id != except && !in_gate(mover.center, o, world, edge))
        .any(|o| mover.overlap(&o.bounds(edge)).is_some())
}

/// Advance every obstacle by its constant velocity
pub fn advance_obstacles(world: &mut World) {
    for obstacle in &mut world.obstacles {
        obstacle.pos += obstacle.vel;
    }
}

/// Remove obstacles that have passed the platform and left the despawn radius
///
/// Distance is measured in 3D from the platform center; "passed" means the
/// horizontal offset from the platform points the same way as the velocity.
/// Returns how many were removed.
pub fn despawn_passed(world: &mut World, tuning: &Tuning) -> usize {
    let center = world.platform.center;
    let max_dist = tuning.despawn_distance;
    world.remove_obstacles(|o| {
        let offset = o.pos - center;
        let moving_away = offset.x * o.vel.x + offset.z * o.vel.z > 0.0;
        offset.length() > max_dist && moving_away
    })
}

/// Whether the player is resting on something it can jump from
pub fn is_supported(player: &Player, world: &World, tuning: &Tuning) -> bool {
    const TOLERANCE: f32 = 0.01;
    let bottom = player.bottom();

    let on_ground = (bottom - world.ground_y).abs() < TOLERANCE;
    let on_platform = world.platform.contains_xz(player.pos)
        && (bottom - world.platform.top()).abs() < TOLERANCE;
    let on_obstacle = world.obstacles.iter().any(|o| {
        let b = o.bounds(tuning.obstacle_size);
        b.contains_xz(player.pos) && (bottom - b.top()).abs() < TOLERANCE
    });

    on_ground || on_platform || on_obstacle
}

/// Apply one tick of horizontal movement (`dir` is a camera-relative sum of unit vectors)
pub fn move_horizontal(player: &mut Player, dir: Vec3, speed: f32) {
    player.pos.x += dir.x * speed;
    player.pos.z += dir.z * speed;
}
