//! Voxel Vault - A wireframe obstacle-dodging game
//!
//! Core modules:
//! - `camera`: Orbit camera that re-derives its look direction every frame
//! - `renderer`: World-to-screen projection with near-plane line clipping
//! - `sim`: Deterministic simulation (physics, collisions, spawning, game state)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `highscores`: Top-N leaderboard
//! - `persistence`: JSON load/save helpers

pub mod camera;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use camera::CameraState;
pub use error::ConfigError;
pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Target tick period in seconds (~60 Hz)
    pub const TICK_DT: f32 = 0.016;

    /// Perspective focal constant (pixels at unit depth)
    pub const FOCAL_LENGTH: f32 = 400.0;
    /// Camera-space depth below which geometry is clipped
    pub const NEAR_PLANE: f32 = 1.0;
    /// Tolerance used when comparing depths against the near plane
    pub const NEAR_EPSILON: f32 = 1e-4;

    /// Orbit pitch limits (degrees) - keeps the spherical placement off the poles
    pub const PITCH_MIN: f32 = -89.0;
    pub const PITCH_MAX: f32 = 89.0;
    /// Orbit distance limits
    pub const CAMERA_MIN_DISTANCE: f32 = 40.0;
    pub const CAMERA_MAX_DISTANCE: f32 = 800.0;

    /// Player cube edge length
    pub const PLAYER_SIZE: f32 = 20.0;
    /// Obstacle cube edge length
    pub const OBSTACLE_SIZE: f32 = 40.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit vector in the XZ plane for a yaw given in degrees (0° = +Z, 90° = +X)
#[inline]
pub fn yaw_direction(yaw_degrees: f32) -> Vec3 {
    let yaw = yaw_degrees.to_radians();
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert!((normalize_degrees(370.0) - 10.0).abs() < 1e-4);
        assert!((normalize_degrees(-90.0) - 270.0).abs() < 1e-4);
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert!(normalize_degrees(-1e-9) < 360.0);
    }

    #[test]
    fn test_yaw_direction() {
        let north = yaw_direction(0.0);
        assert!((north - Vec3::Z).length() < 1e-6);
        let east = yaw_direction(90.0);
        assert!((east - Vec3::X).length() < 1e-6);
    }
}
