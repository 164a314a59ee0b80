//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod aabb;
pub mod collision;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use aabb::{Aabb, BOX_EDGES};
pub use collision::{Axis, CollisionResult, box_collision, in_gate_gap, push_out, separating_pushes};
pub use spawn::SpawnDirector;
pub use state::{
    BoxInstance, DisplayTag, FrameSnapshot, GameEvent, GamePhase, GameState, Obstacle, ObstacleId,
    Player, World,
};
pub use tick::{Control, TickInput, tick};
