//! Data-driven game balance
//!
//! Every gameplay constant lives here so balance can be tweaked from a JSON
//! file without recompiling. Velocities are in world units per tick; times
//! are in milliseconds.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{OBSTACLE_SIZE, PLAYER_SIZE};
use crate::error::ConfigError;
use crate::persistence;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    /// Platform center
    pub platform_center: Vec3,
    /// Platform full extents (width, height, depth)
    pub platform_size: Vec3,
    /// Height of the ground plane; falling below it off-platform ends the run
    pub ground_y: f32,

    // === Player ===
    /// Player cube edge length
    pub player_size: f32,
    /// Downward acceleration per tick (negative)
    pub gravity: f32,
    /// Horizontal move speed per tick
    pub move_speed: f32,
    /// Vertical velocity applied on jump
    pub jump_impulse: f32,
    /// How far below the platform top a falling player is still snapped onto it
    pub landing_band: f32,

    // === Obstacles ===
    /// Obstacle cube edge length
    pub obstacle_size: f32,
    /// Minimum spawn distance from the platform along the approach axis
    pub spawn_distance_base: f32,
    /// Random extra spawn distance
    pub spawn_distance_range: f32,
    /// Width of the random lateral jitter
    pub spawn_lateral_jitter: f32,
    /// Clearance above the platform top for spawned obstacles
    pub spawn_height_margin: f32,
    /// Largest downward height bias before clamping
    pub spawn_height_drop: f32,
    /// Minimum obstacle speed before difficulty scaling
    pub obstacle_speed_base: f32,
    /// Random extra obstacle speed
    pub obstacle_speed_range: f32,
    /// Distance from the platform center beyond which passed obstacles despawn
    pub despawn_distance: f32,

    // === Spawn cadence ===
    /// Time between spawns at difficulty 1.0
    pub spawn_interval_ms: f32,
    /// Spawns never come faster than this
    pub spawn_interval_floor_ms: f32,

    // === Gates ===
    /// Chance of attaching a paired obstacle on the first spawn
    pub gate_probability_base: f32,
    /// Added chance per spawn
    pub gate_probability_per_spawn: f32,
    /// Upper bound on the attach chance
    pub gate_probability_cap: f32,
    /// Placement attempts per link before giving up
    pub gate_attempts: u32,
    /// Hard bound on links in one chain
    pub gate_max_links: u32,

    // === Difficulty ===
    /// Multiplier growth per spawn
    pub difficulty_per_spawn: f32,
    /// Multiplier ceiling
    pub difficulty_cap: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            platform_center: Vec3::new(0.0, 300.0, 0.0),
            platform_size: Vec3::new(240.0, 40.0, 240.0),
            ground_y: 0.0,

            player_size: PLAYER_SIZE,
            gravity: -0.98,
            move_speed: 5.0,
            jump_impulse: 15.0,
            landing_band: 50.0,

            obstacle_size: OBSTACLE_SIZE,
            spawn_distance_base: 1200.0,
            spawn_distance_range: 400.0,
            spawn_lateral_jitter: 200.0,
            spawn_height_margin: 20.0,
            spawn_height_drop: 200.0,
            obstacle_speed_base: 2.0,
            obstacle_speed_range: 2.0,
            despawn_distance: 1500.0,

            spawn_interval_ms: 2500.0,
            spawn_interval_floor_ms: 300.0,

            gate_probability_base: 0.25,
            gate_probability_per_spawn: 0.01,
            gate_probability_cap: 0.9,
            gate_attempts: 6,
            gate_max_links: 16,

            difficulty_per_spawn: 0.01,
            difficulty_cap: 3.0,
        }
    }
}

impl Tuning {
    /// Y coordinate of the platform's top face
    #[inline]
    pub fn platform_top(&self) -> f32 {
        self.platform_center.y + self.platform_size.y / 2.0
    }

    /// Lowest allowed obstacle center height
    #[inline]
    pub fn min_obstacle_y(&self) -> f32 {
        self.platform_top() + self.spawn_height_margin
    }

    /// Difficulty multiplier for a spawn count
    pub fn difficulty(&self, spawn_count: u32) -> f32 {
        (1.0 + self.difficulty_per_spawn * spawn_count as f32).min(self.difficulty_cap)
    }

    /// Chance of growing a gate for a spawn count
    pub fn gate_probability(&self, spawn_count: u32) -> f32 {
        (self.gate_probability_base + self.gate_probability_per_spawn * spawn_count as f32)
            .min(self.gate_probability_cap)
    }

    /// Spawn interval (ms) at a given difficulty
    pub fn spawn_interval_ms(&self, difficulty: f32) -> f32 {
        (self.spawn_interval_ms / difficulty).max(self.spawn_interval_floor_ms)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        persistence::load_json(path)
    }

    /// Load tuning, falling back to defaults on any problem
    pub fn load(path: &Path) -> Self {
        persistence::load_json_or_default(path, "tuning")
    }
}
