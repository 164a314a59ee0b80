//! Game state and core simulation types
//!
//! All state that must survive between ticks lives in [`GameState`], which is
//! serializable so a session (including its RNG) can be snapshotted and
//! replayed deterministically.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::spawn::SpawnDirector;
use crate::camera::{CameraControls, CameraPose, CameraState};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Player fell to the ground; the run is over
    GameOver,
}

/// What a body represents, for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayTag {
    Platform,
    Player,
    Obstacle,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// New obstacles entered the world (primary plus any gate links)
    Spawned { count: u32 },
    /// Obstacles passed the platform and left; each is worth one point
    Despawned { count: u32 },
    /// Terminal transition with the final score
    GameOver { score: u64 },
}

/// Stable handle to an obstacle in [`World::obstacles`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObstacleId(pub u32);

/// An approaching cube
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub pos: Vec3,
    /// Constant horizontal velocity (y is always 0)
    pub vel: Vec3,
    pub tag: DisplayTag,
    /// Partner forming a gate with this obstacle; always mutual
    pub paired_with: Option<ObstacleId>,
}

impl Obstacle {
    pub fn new(id: ObstacleId, pos: Vec3, vel: Vec3) -> Self {
        Self {
            id,
            pos,
            vel: Vec3::new(vel.x, 0.0, vel.z),
            tag: DisplayTag::Obstacle,
            paired_with: None,
        }
    }

    pub fn bounds(&self, edge: f32) -> Aabb {
        Aabb::cube(self.pos, edge)
    }
}

/// The player's cube
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec3,
    /// Only vertical velocity is integrated; horizontal motion is position-driven
    pub vel_y: f32,
    pub half_size: f32,
    pub tag: DisplayTag,
}

impl Player {
    pub fn new(pos: Vec3, size: f32) -> Self {
        Self {
            pos,
            vel_y: 0.0,
            half_size: size / 2.0,
            tag: DisplayTag::Player,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y - self.half_size
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::cube(self.pos, self.half_size * 2.0)
    }
}

/// Static world geometry plus the live obstacle set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub platform: Aabb,
    pub ground_y: f32,
    /// Obstacles; order carries no meaning
    pub obstacles: Vec<Obstacle>,
    /// Next obstacle ID
    next_id: u32,
}

impl World {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            platform: Aabb::new(tuning.platform_center, tuning.platform_size),
            ground_y: tuning.ground_y,
            obstacles: Vec::new(),
            next_id: 1,
        }
    }

    /// Insert a new, unpaired obstacle and return its handle
    pub fn spawn_obstacle(&mut self, pos: Vec3, vel: Vec3) -> ObstacleId {
        let id = ObstacleId(self.next_id);
        self.next_id += 1;
        self.obstacles.push(Obstacle::new(id, pos, vel));
        id
    }

    pub fn obstacle(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id == id)
    }

    pub fn obstacle_mut(&mut self, id: ObstacleId) -> Option<&mut Obstacle> {
        self.obstacles.iter_mut().find(|o| o.id == id)
    }

    /// Mark two obstacles as a gate. Returns false (and changes nothing) if
    /// either is missing or already paired.
    pub fn pair(&mut self, a: ObstacleId, b: ObstacleId) -> bool {
        if a == b {
            return false;
        }
        let free = |id: ObstacleId| self.obstacle(id).is_some_and(|o| o.paired_with.is_none());
        if !free(a) || !free(b) {
            return false;
        }
        for (me, other) in [(a, b), (b, a)] {
            if let Some(o) = self.obstacle_mut(me) {
                o.paired_with = Some(other);
            }
        }
        true
    }

    /// Remove every obstacle matching `remove`, clearing dangling partner links.
    /// Returns how many were removed.
    pub fn remove_obstacles<F>(&mut self, mut remove: F) -> usize
    where
        F: FnMut(&Obstacle) -> bool,
    {
        let before = self.obstacles.len();
        let mut removed_ids = Vec::new();
        self.obstacles.retain(|o| {
            if remove(o) {
                removed_ids.push(o.id);
                false
            } else {
                true
            }
        });
        if !removed_ids.is_empty() {
            for o in &mut self.obstacles {
                if o.paired_with.is_some_and(|p| removed_ids.contains(&p)) {
                    o.paired_with = None;
                }
            }
        }
        before - self.obstacles.len()
    }
}

/// One box to draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxInstance {
    pub bounds: Aabb,
    pub tag: DisplayTag,
}

/// Read-only view of a tick's result for the rendering surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub camera: CameraPose,
    pub platform: BoxInstance,
    pub player: BoxInstance,
    pub obstacles: Vec<BoxInstance>,
    pub score: u64,
    pub phase: GamePhase,
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Shared pseudo-random source; only the spawn director draws from it
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub world: World,
    pub player: Player,
    pub camera: CameraState,
    pub controls: CameraControls,
    pub spawner: SpawnDirector,
    /// Obstacles that made it past the platform
    pub score: u64,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a new session with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let world = World::new(&tuning);
        let player = Player::new(Vec3::ZERO, tuning.player_size);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            world,
            player,
            camera: CameraState::default(),
            controls: CameraControls::default(),
            spawner: SpawnDirector::default(),
            score: 0,
            phase: GamePhase::Playing,
            time_ticks: 0,
        };
        state.place_player_on_platform();
        state
    }

    /// Current difficulty multiplier
    pub fn difficulty(&self) -> f32 {
        self.tuning.difficulty(self.spawner.spawn_count)
    }

    /// Start over: used both for "restart after game over" and "new game from title".
    /// The camera orbit is kept.
    pub fn reset(&mut self) {
        self.score = 0;
        self.spawner.reset();
        self.world.obstacles.clear();
        self.time_ticks = 0;
        self.place_player_on_platform();
        self.phase = GamePhase::Playing;
        log::info!("Session reset (seed {})", self.seed);
    }

    /// Resting pose: centered on the platform, bottom on its top face, not moving
    fn place_player_on_platform(&mut self) {
        let platform = &self.world.platform;
        self.player.pos = Vec3::new(
            platform.center.x,
            platform.top() + self.player.half_size,
            platform.center.z,
        );
        self.player.vel_y = 0.0;
    }

    /// Toggle between playing and paused; no effect after game over
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            GamePhase::GameOver => GamePhase::GameOver,
        };
    }

    /// Camera pose following the player this frame
    pub fn camera_pose(&self) -> CameraPose {
        self.camera.pose(self.player.pos)
    }

    /// Everything the renderer needs, detached from the live state
    pub fn snapshot(&self) -> FrameSnapshot {
        let edge = self.tuning.obstacle_size;
        FrameSnapshot {
            camera: self.camera_pose(),
            platform: BoxInstance {
                bounds: self.world.platform,
                tag: DisplayTag::Platform,
            },
            player: BoxInstance {
                bounds: self.player.bounds(),
                tag: self.player.tag,
            },
            obstacles: self
                .world
                .obstacles
                .iter()
                .map(|o| BoxInstance {
                    bounds: o.bounds(edge),
                    tag: o.tag,
                })
                .collect(),
            score: self.score,
            phase: self.phase,
        }
    }
}
