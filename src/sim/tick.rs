//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::{Vec2, Vec3};

use super::physics::{
    VerticalStep, advance_obstacles, despawn_passed, is_supported, move_horizontal,
    resolve_obstacles, step_vertical,
};
use super::state::{GameEvent, GamePhase, GameState};

/// Every discrete control the player can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,
    Jump,
    OrbitLeft,
    OrbitRight,
    OrbitUp,
    OrbitDown,
    ZoomIn,
    ZoomOut,
    Pause,
    Autopilot,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_forward: bool,
    pub move_back: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub orbit_left: bool,
    pub orbit_right: bool,
    pub orbit_up: bool,
    pub orbit_down: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
    /// Pause toggle (edge-triggered by the caller)
    pub pause: bool,
    /// Let the built-in pilot drive movement and jumping
    pub autopilot: bool,
    /// Pointer movement since the last tick
    pub look_delta: Vec2,
}

impl TickInput {
    pub fn is_active(&self, control: Control) -> bool {
        match control {
            Control::MoveForward => self.move_forward,
            Control::MoveBack => self.move_back,
            Control::MoveLeft => self.move_left,
            Control::MoveRight => self.move_right,
            Control::Jump => self.jump,
            Control::OrbitLeft => self.orbit_left,
            Control::OrbitRight => self.orbit_right,
            Control::OrbitUp => self.orbit_up,
            Control::OrbitDown => self.orbit_down,
            Control::ZoomIn => self.zoom_in,
            Control::ZoomOut => self.zoom_out,
            Control::Pause => self.pause,
            Control::Autopilot => self.autopilot,
        }
    }
}

/// +1, -1 or 0 from a pair of opposing controls
fn axis_value(input: &TickInput, positive: Control, negative: Control) -> f32 {
    match (input.is_active(positive), input.is_active(negative)) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

/// Advance the game state by one fixed timestep
///
/// `dt` is the elapsed time in seconds and only drives the spawn clock; all
/// motion is per tick. Returns the events raised this tick.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.is_active(Control::Pause) {
        state.toggle_pause();
        log::info!("Phase now {:?}", state.phase);
        if state.phase == GamePhase::Paused {
            return events;
        }
    }

    if state.phase != GamePhase::Playing {
        return events;
    }

    state.time_ticks += 1;

    let mut input = input.clone();
    if input.is_active(Control::Autopilot) {
        autopilot(state, &mut input);
    }
    let input = &input;

    apply_camera_input(state, input);

    // Movement and jump, relative to where the camera looks
    let m = state.difficulty();
    let forward = axis_value(input, Control::MoveForward, Control::MoveBack);
    let right = axis_value(input, Control::MoveRight, Control::MoveLeft);
    let dir = state.camera.forward() * forward + state.camera.right() * right;
    move_horizontal(&mut state.player, dir, state.tuning.move_speed * m);

    if input.is_active(Control::Jump) && is_supported(&state.player, &state.world, &state.tuning) {
        state.player.vel_y = state.tuning.jump_impulse * m;
    }

    let spawned = state
        .spawner
        .update(dt * 1000.0, &mut state.world, &mut state.rng, &state.tuning);
    if !spawned.is_empty() {
        events.push(GameEvent::Spawned {
            count: spawned.len() as u32,
        });
    }

    // Physics uses the multiplier after this tick's spawns
    let m = state.difficulty();
    let step = step_vertical(&mut state.player, &state.world, &state.tuning, m);
    if step == VerticalStep::FellToGround {
        state.phase = GamePhase::GameOver;
        log::info!("Game over with score {}", state.score);
        events.push(GameEvent::GameOver { score: state.score });
        return events;
    }

    resolve_obstacles(&mut state.player, &state.world, &state.tuning);
    advance_obstacles(&mut state.world);

    let removed = despawn_passed(&mut state.world, &state.tuning);
    if removed > 0 {
        state.score += removed as u64;
        log::debug!("{} obstacle(s) passed, score {}", removed, state.score);
        events.push(GameEvent::Despawned {
            count: removed as u32,
        });
    }

    events
}

fn apply_camera_input(state: &mut GameState, input: &TickInput) {
    let controls = state.controls;
    let camera = &mut state.camera;

    if input.look_delta != Vec2::ZERO {
        let delta = input.look_delta;
        camera.apply_look_delta(delta.x, delta.y, controls.look_sensitivity);
    }

    let speed = controls.orbit_key_speed;
    let yaw = axis_value(input, Control::OrbitRight, Control::OrbitLeft) * speed;
    let pitch = axis_value(input, Control::OrbitUp, Control::OrbitDown) * speed;
    if yaw != 0.0 || pitch != 0.0 {
        camera.orbit(yaw, pitch);
    }

    let zoom = axis_value(input, Control::ZoomOut, Control::ZoomIn);
    if zoom != 0.0 {
        camera.zoom(zoom * controls.zoom_step);
    }
}

/// Fill in movement and jump for a hands-off session
///
/// Jumps when an approaching obstacle is on a collision course and about to
/// arrive. Steers back toward the platform center once the player drifts
/// near an edge. Camera controls are left untouched.
fn autopilot(state: &GameState, input: &mut TickInput) {
    const JUMP_LEAD_TICKS: f32 = 12.0;
    const EDGE_FRACTION: f32 = 0.6;

    let player = &state.player;
    let tuning = &state.tuning;
    let reach = (tuning.obstacle_size + tuning.player_size) / 2.0;

    let threat = state.world.obstacles.iter().any(|o| {
        let to_player = Vec3::new(player.pos.x - o.pos.x, 0.0, player.pos.z - o.pos.z);
        let speed = o.vel.length();
        if speed <= f32::EPSILON {
            return false;
        }
        let heading = o.vel / speed;
        let along = to_player.dot(heading);
        let across = (to_player - heading * along).length();
        let vertical = (player.pos.y - o.pos.y).abs();
        along > 0.0
            && across < reach
            && vertical < reach
            && (along - reach) / speed < JUMP_LEAD_TICKS
    });
    input.jump = threat;

    let platform = &state.world.platform;
    let offset = Vec3::new(
        platform.center.x - player.pos.x,
        0.0,
        platform.center.z - player.pos.z,
    );
    let limit = platform.half_extents.x.min(platform.half_extents.z) * EDGE_FRACTION;
    if offset.x.abs().max(offset.z.abs()) > limit {
        let forward = offset.dot(state.camera.forward());
        let right = offset.dot(state.camera.right());
        input.move_forward = forward > 1.0;
        input.move_back = forward < -1.0;
        input.move_right = right > 1.0;
        input.move_left = right < -1.0;
    } else {
        input.move_forward = false;
        input.move_back = false;
        input.move_left = false;
        input.move_right = false;
    }
}
