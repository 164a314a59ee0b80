//! World-to-screen projection with near-plane clipping
//!
//! Every line drawn by the game goes through the same path:
//! world space -> camera space -> clip against the near plane -> perspective
//! divide. Projecting a raw point with non-positive camera depth would divide
//! by zero or mirror the point through the viewer, so [`project`] is only
//! ever reached through [`clip_segment`].

use glam::{Vec2, Vec3};

use super::vertex::{LineSink, LineStyle};
use crate::consts::{FOCAL_LENGTH, NEAR_EPSILON, NEAR_PLANE};

/// Screen dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Orthonormal camera basis for one frame
///
/// `right` (U), `up` (V) and `forward` (N) are rebuilt from the look angles
/// each frame; V is recomputed from N x U so the basis stays orthogonal even
/// when U picked up rounding error during normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub origin: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

impl ViewTransform {
    /// Build the basis for a viewer at `origin` looking along yaw/pitch (degrees)
    pub fn new(origin: Vec3, yaw: f32, pitch: f32) -> Self {
        let yaw = yaw.to_radians();
        let pitch = pitch.to_radians();
        let forward = Vec3::new(
            yaw.sin() * pitch.cos(),
            -pitch.sin(),
            yaw.cos() * pitch.cos(),
        );
        // Looking straight up/down leaves up x N degenerate; any horizontal axis will do
        let right = Vec3::Y.cross(forward);
        let right = if right.length_squared() > 1e-12 {
            right.normalize()
        } else {
            Vec3::X
        };
        let up = forward.cross(right);
        Self {
            origin,
            right,
            up,
            forward,
        }
    }

    /// Express a world point in camera space (x right, y up, z depth)
    #[inline]
    pub fn to_camera_space(&self, world: Vec3) -> Vec3 {
        let p = world - self.origin;
        Vec3::new(p.dot(self.right), p.dot(self.up), p.dot(self.forward))
    }
}

/// Express `world` in the camera space of a viewer at `camera_pos` looking along yaw/pitch
pub fn to_camera_space(world: Vec3, camera_pos: Vec3, yaw: f32, pitch: f32) -> Vec3 {
    ViewTransform::new(camera_pos, yaw, pitch).to_camera_space(world)
}

/// Perspective divide onto the screen
///
/// `cam.z` must be at least [`NEAR_PLANE`]; callers get there via [`clip_segment`].
#[inline]
pub fn project(cam: Vec3, viewport: Viewport) -> Vec2 {
    debug_assert!(
        cam.z >= NEAR_PLANE - NEAR_EPSILON,
        "projecting behind near plane: {cam}"
    );
    let scale = FOCAL_LENGTH / cam.z;
    viewport.center() + Vec2::new(cam.x, -cam.y) * scale
}

#[inline]
fn behind_near_plane(z: f32) -> bool {
    z < NEAR_PLANE - NEAR_EPSILON
}

/// Clip a camera-space segment against the near plane
///
/// Returns `None` when both endpoints are behind the plane. When exactly one
/// is, it is replaced by the point on the segment whose depth is exactly
/// [`NEAR_PLANE`].
pub fn clip_segment(a: Vec3, b: Vec3) -> Option<(Vec3, Vec3)> {
    match (behind_near_plane(a.z), behind_near_plane(b.z)) {
        (true, true) => None,
        (false, false) => Some((a, b)),
        (true, false) => Some((clip_point(b, a), b)),
        (false, true) => Some((a, clip_point(a, b))),
    }
}

/// Point between `inside` and `outside` where depth equals the near plane
fn clip_point(inside: Vec3, outside: Vec3) -> Vec3 {
    // inside.z >= near - eps > outside.z, so the denominator is strictly negative
    let t = (NEAR_PLANE - inside.z) / (outside.z - inside.z);
    let mut clipped = inside.lerp(outside, t);
    clipped.z = NEAR_PLANE;
    clipped
}

/// Transform, clip, project and draw a world-space segment
///
/// Emits nothing when the segment is entirely behind the viewer.
/// Returns whether a line was drawn.
pub fn draw_clipped_segment<S: LineSink + ?Sized>(
    p1: Vec3,
    p2: Vec3,
    view: &ViewTransform,
    viewport: Viewport,
    style: LineStyle,
    sink: &mut S,
) -> bool {
    let a = view.to_camera_space(p1);
    let b = view.to_camera_space(p2);
    match clip_segment(a, b) {
        Some((a, b)) => {
            sink.line(project(a, viewport), project(b, viewport), style);
            true
        }
        None => false,
    }
}
