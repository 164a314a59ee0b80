//! Orbit camera
//!
//! The camera only stores orbit parameters (yaw, pitch, distance) around a
//! moving target. Its viewing direction is never stored: each frame the
//! viewer position is placed on the orbit sphere and the look angles are
//! recomputed from the viewer-to-target vector, so the camera always faces
//! the target exactly.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{CAMERA_MAX_DISTANCE, CAMERA_MIN_DISTANCE, PITCH_MAX, PITCH_MIN};
use crate::yaw_direction;

/// Orbit parameters, mutated by look/orbit/zoom input
///
/// Fields are only reachable through the clamping constructors and mutators;
/// a deserialized camera goes through [`CameraState::new`] too.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "OrbitParams")]
pub struct CameraState {
    /// Orbit yaw (degrees, unbounded)
    yaw: f32,
    /// Orbit pitch (degrees, always within [PITCH_MIN, PITCH_MAX])
    pitch: f32,
    /// Distance from target (always within [CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE])
    distance: f32,
}

/// Unchecked wire form of [`CameraState`]
#[derive(Deserialize)]
struct OrbitParams {
    yaw: f32,
    pitch: f32,
    distance: f32,
}

impl From<OrbitParams> for CameraState {
    fn from(raw: OrbitParams) -> Self {
        Self::new(raw.yaw, raw.pitch, raw.distance)
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 20.0,
            distance: 200.0,
        }
    }
}

/// Where the viewer is and which way it looks, for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    /// Look yaw (degrees)
    pub yaw: f32,
    /// Look pitch (degrees, positive looks down)
    pub pitch: f32,
}

/// How strongly camera input moves the orbit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraControls {
    /// Degrees per unit of look delta
    pub look_sensitivity: f32,
    /// Degrees per tick while an orbit key is held
    pub orbit_key_speed: f32,
    /// Distance change per tick while a zoom key is held
    pub zoom_step: f32,
}

impl Default for CameraControls {
    fn default() -> Self {
        Self {
            look_sensitivity: 0.5,
            orbit_key_speed: 2.0,
            zoom_step: 10.0,
        }
    }
}

impl CameraState {
    pub fn new(yaw: f32, pitch: f32, distance: f32) -> Self {
        let mut camera = Self {
            yaw,
            pitch,
            distance,
        };
        camera.clamp();
        camera
    }

    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Mouse-drag style look: horizontal delta turns, vertical delta tilts
    pub fn apply_look_delta(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        self.yaw += dx * sensitivity;
        self.pitch -= dy * sensitivity;
        self.clamp();
    }

    /// Key-driven orbit by fixed angles (degrees)
    pub fn orbit(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch += pitch_delta;
        self.clamp();
    }

    /// Move toward (negative) or away from (positive) the target
    pub fn zoom(&mut self, delta: f32) {
        self.distance += delta;
        self.clamp();
    }

    fn clamp(&mut self) {
        self.pitch = self.pitch.clamp(PITCH_MIN, PITCH_MAX);
        self.distance = self.distance.clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
    }

    /// Viewer position and look angles for this frame
    pub fn pose(&self, target: Vec3) -> CameraPose {
        let position = viewer_position(target, self.yaw, self.pitch, self.distance);
        let (yaw, pitch) = look_angles(position, target);
        CameraPose {
            position,
            yaw,
            pitch,
        }
    }

    /// Horizontal unit vector pointing away from the viewer (used for movement)
    pub fn forward(&self) -> Vec3 {
        yaw_direction(self.yaw)
    }

    /// Horizontal unit vector to the viewer's right
    pub fn right(&self) -> Vec3 {
        let f = self.forward();
        Vec3::new(f.z, 0.0, -f.x)
    }
}

/// Place the viewer on the orbit sphere around `target`
///
/// The horizontal offset (`distance * cos(pitch)`) points opposite the yaw
/// direction, so a viewer at yaw 0 sits on the -Z side looking toward +Z.
/// Positive pitch raises the viewer above the target.
pub fn viewer_position(target: Vec3, yaw: f32, pitch: f32, distance: f32) -> Vec3 {
    let pitch_rad = pitch.to_radians();
    let horizontal = distance * pitch_rad.cos();
    let vertical = distance * pitch_rad.sin();
    target - yaw_direction(yaw) * horizontal + Vec3::Y * vertical
}

/// Look yaw/pitch (degrees) of the vector from `viewer` to `target`
///
/// Yaw is `atan2(dx, dz)`; pitch is `-atan2(dy, hypot(dx, dz))`, so looking
/// down at the target gives a positive pitch.
pub fn look_angles(viewer: Vec3, target: Vec3) -> (f32, f32) {
    let d = target - viewer;
    let yaw = d.x.atan2(d.z).to_degrees();
    let pitch = -d.y.atan2(d.x.hypot(d.z)).to_degrees();
    (yaw, pitch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize_degrees;
    use proptest::prelude::*;

    fn angle_diff(a: f32, b: f32) -> f32 {
        let d = normalize_degrees(a - b);
        d.min(360.0 - d)
    }

    #[test]
    fn test_default_pose_looks_down_at_target() {
        let camera = CameraState::default();
        let target = Vec3::new(0.0, 330.0, 0.0);
        let pose = camera.pose(target);
        assert!(pose.position.y > target.y);
        assert!(pose.position.z < target.z);
        assert!((pose.position.distance(target) - 200.0).abs() < 1e-3);
        assert!((pose.pitch - 20.0).abs() < 1e-3);
        assert!(angle_diff(pose.yaw, 0.0) < 1e-3);
    }

    #[test]
    fn test_pitch_clamped_after_every_mutation() {
        let mut camera = CameraState::default();
        camera.orbit(0.0, 500.0);
        assert_eq!(camera.pitch, PITCH_MAX);
        camera.apply_look_delta(0.0, 10_000.0, 0.5);
        assert_eq!(camera.pitch, PITCH_MIN);
        let camera = CameraState::new(0.0, -120.0, 100.0);
        assert_eq!(camera.pitch, PITCH_MIN);
    }

    #[test]
    fn test_distance_never_negative() {
        let mut camera = CameraState::default();
        camera.zoom(-10_000.0);
        assert_eq!(camera.distance, CAMERA_MIN_DISTANCE);
        camera.zoom(10_000.0);
        assert_eq!(camera.distance, CAMERA_MAX_DISTANCE);
    }

    #[test]
    fn test_deserialized_camera_is_clamped() {
        let camera: CameraState =
            serde_json::from_str(r#"{"yaw": 30.0, "pitch": 200.0, "distance": -5.0}"#).unwrap();
        assert_eq!(camera.yaw(), 30.0);
        assert_eq!(camera.pitch(), PITCH_MAX);
        assert_eq!(camera.distance(), CAMERA_MIN_DISTANCE);

        let json = serde_json::to_string(&CameraState::default()).unwrap();
        let back: CameraState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CameraState::default());
    }

    #[test]
    fn test_forward_and_right_are_perpendicular() {
        let camera = CameraState::new(37.0, 10.0, 200.0);
        assert!(camera.forward().dot(camera.right()).abs() < 1e-6);
        // forward x right = up
        let up = camera.forward().cross(camera.right());
        assert!((up - Vec3::Y).length() < 1e-5);
    }

    proptest! {
        #[test]
        fn look_angles_round_trip(
            tx in -2000.0f32..2000.0,
            ty in -500.0f32..1000.0,
            tz in -2000.0f32..2000.0,
            yaw in 0.0f32..360.0,
            pitch in -89.0f32..=89.0,
            distance in 50.0f32..800.0,
        ) {
            let target = Vec3::new(tx, ty, tz);
            let viewer = viewer_position(target, yaw, pitch, distance);
            let (look_yaw, look_pitch) = look_angles(viewer, target);
            // Yaw error grows as the horizontal offset shrinks toward the poles
            let horizontal = distance * pitch.to_radians().cos();
            let yaw_tolerance = (0.1 / horizontal).max(0.05);
            prop_assert!(angle_diff(look_yaw, yaw) < yaw_tolerance,
                "yaw {} -> {}", yaw, look_yaw);
            prop_assert!((look_pitch - pitch).abs() < 0.05,
                "pitch {} -> {}", pitch, look_pitch);
        }
    }
}
