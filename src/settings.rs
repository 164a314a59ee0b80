//! Player settings and preferences
//!
//! Persisted separately from tuning and high scores, as JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::camera::{CameraControls, CameraState};
use crate::consts::TICK_DT;
use crate::error::ConfigError;
use crate::persistence;
use crate::renderer::Viewport;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Camera ===
    /// Degrees of yaw/pitch per unit of pointer movement
    pub look_sensitivity: f32,
    /// Degrees per tick while an orbit key is held
    pub orbit_key_speed: f32,
    /// Distance change per tick while a zoom key is held
    pub zoom_step: f32,
    /// Orbit distance at the start of a session
    pub camera_distance: f32,

    // === Display ===
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Loop ===
    /// Wall-clock period of one tick (ms)
    pub tick_period_ms: u64,
    /// Let the built-in pilot play; otherwise the headless runner stands idle
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let controls = CameraControls::default();
        Self {
            look_sensitivity: controls.look_sensitivity,
            orbit_key_speed: controls.orbit_key_speed,
            zoom_step: controls.zoom_step,
            camera_distance: CameraState::default().distance(),

            viewport_width: 800.0,
            viewport_height: 600.0,

            tick_period_ms: (TICK_DT * 1000.0).round() as u64,
            autopilot: true,
        }
    }
}

impl Settings {
    pub fn camera_controls(&self) -> CameraControls {
        CameraControls {
            look_sensitivity: self.look_sensitivity,
            orbit_key_speed: self.orbit_key_speed,
            zoom_step: self.zoom_step,
        }
    }

    /// Starting orbit: default angles at the preferred distance (clamped)
    pub fn initial_camera(&self) -> CameraState {
        let default = CameraState::default();
        CameraState::new(default.yaw(), default.pitch(), self.camera_distance)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport_width, self.viewport_height)
    }

    /// Tick period in seconds, as passed to the simulation
    pub fn tick_seconds(&self) -> f32 {
        self.tick_period_ms as f32 / 1000.0
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        persistence::load_json(path)
    }

    /// Load settings, falling back to defaults when the file is missing or bad
    pub fn load(path: &Path) -> Self {
        persistence::load_json_or_default(path, "settings")
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        persistence::save_json(path, self)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
