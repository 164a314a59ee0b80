//! Collision detection and response for axis-aligned boxes
//!
//! When the player box overlaps an obstacle on all three axes it is pushed
//! out along the single axis with the smallest overlap, to the obstacle's
//! near face on that axis.

use glam::Vec3;

use super::aabb::Aabb;

/// Tolerance for "these two obstacles sit exactly one edge apart"
const ADJACENCY_EPSILON: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    #[inline]
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the boxes overlap on all three axes
    pub hit: bool,
    /// Axis of minimum penetration
    pub axis: Axis,
    /// Direction the mover must be pushed (unit, along `axis`)
    pub normal: Vec3,
    /// Overlap along `axis`
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            axis: Axis::X,
            normal: Vec3::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check a moving box against a static one
///
/// Ties between axes resolve in X, Y, Z order.
pub fn box_collision(mover: &Aabb, obstacle: &Aabb) -> CollisionResult {
    match separating_pushes(mover, obstacle) {
        Some([shallowest, ..]) => shallowest,
        None => CollisionResult::miss(),
    }
}

/// One push per axis for an overlapping pair, shallowest first
///
/// `None` when the boxes do not overlap. Ties keep X, Y, Z order.
pub fn separating_pushes(mover: &Aabb, obstacle: &Aabb) -> Option<[CollisionResult; 3]> {
    let overlap = mover.overlap(obstacle)?;

    let mut axes = Axis::ALL;
    axes.sort_by(|a, b| overlap[a.index()].total_cmp(&overlap[b.index()]));

    Some(axes.map(|axis| {
        let i = axis.index();
        let normal = if mover.center[i] < obstacle.center[i] {
            -axis.unit()
        } else {
            axis.unit()
        };
        CollisionResult {
            hit: true,
            axis,
            normal,
            penetration: overlap[i],
        }
    }))
}

/// Center of `mover` after pushing it flush against the near face of `obstacle`
pub fn push_out(mover: &Aabb, obstacle: &Aabb, result: &CollisionResult) -> Vec3 {
    let i = result.axis.index();
    let mut center = mover.center;
    center[i] = if result.normal[i] < 0.0 {
        obstacle.min()[i] - mover.half_extents[i]
    } else {
        obstacle.max()[i] + mover.half_extents[i]
    };
    center
}

/// Whether `point` is inside the shared gap of a paired obstacle
///
/// The pair must sit exactly one `edge` apart along X or Z; a stacked pair is
/// never a gate. The point is in the gap when, on the pair axis, it is within
/// half an edge of the pair's midpoint and, on the other two axes, within
/// half an edge of `obstacle`.
pub fn in_gate_gap(point: Vec3, obstacle: Vec3, partner: Vec3, edge: f32) -> bool {
    let half = edge / 2.0;
    let offset = (obstacle - partner).abs();
    let midpoint = (obstacle + partner) / 2.0;

    [Axis::X, Axis::Z].into_iter().any(|axis| {
        let i = axis.index();
        if (offset[i] - edge).abs() > ADJACENCY_EPSILON {
            return false;
        }
        Axis::ALL.into_iter().all(|other| {
            let j = other.index();
            if j == i {
                (point[j] - midpoint[j]).abs() < half
            } else {
                (point[j] - obstacle[j]).abs() < half
            }
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_min_axis_push_out_x() {
        let player = Aabb::cube(Vec3::new(-25.0, 0.0, 0.0), 20.0);
        let obstacle = Aabb::cube(Vec3::ZERO, 40.0);
        let result = box_collision(&player, &obstacle);
        assert!(result.hit);
        assert_eq!(result.axis, Axis::X);
        assert_eq!(result.normal, -Vec3::X);
        assert_eq!(result.penetration, 5.0);
        let resolved = push_out(&player, &obstacle, &result);
        assert_eq!(resolved, Vec3::new(-30.0, 0.0, 0.0));
    }

    #[test]
    fn test_landing_on_top() {
        let player = Aabb::cube(Vec3::new(3.0, 28.0, -2.0), 20.0);
        let obstacle = Aabb::cube(Vec3::ZERO, 40.0);
        let result = box_collision(&player, &obstacle);
        assert_eq!(result.axis, Axis::Y);
        assert_eq!(result.normal, Vec3::Y);
        let resolved = push_out(&player, &obstacle, &result);
        assert_eq!(resolved, Vec3::new(3.0, 30.0, -2.0));
    }

    #[test]
    fn test_no_collision_when_apart() {
        let player = Aabb::cube(Vec3::new(0.0, 100.0, 0.0), 20.0);
        let obstacle = Aabb::cube(Vec3::ZERO, 40.0);
        assert!(!box_collision(&player, &obstacle).hit);
    }

    #[test]
    fn test_gate_gap_along_x() {
        let a = Vec3::new(0.0, 340.0, 0.0);
        let b = Vec3::new(40.0, 340.0, 0.0);
        // At the shared face
        assert!(in_gate_gap(Vec3::new(20.0, 340.0, 0.0), a, b, 40.0));
        assert!(in_gate_gap(Vec3::new(20.0, 340.0, 0.0), b, a, 40.0));
        // Too far along the pair axis
        assert!(!in_gate_gap(Vec3::new(45.0, 340.0, 0.0), a, b, 40.0));
        // Off to the side
        assert!(!in_gate_gap(Vec3::new(20.0, 340.0, 25.0), a, b, 40.0));
    }

    #[test]
    fn test_gate_gap_requires_adjacency() {
        let a = Vec3::new(0.0, 340.0, 0.0);
        let b = Vec3::new(55.0, 340.0, 0.0);
        assert!(!in_gate_gap(Vec3::new(27.5, 340.0, 0.0), a, b, 40.0));
    }

    #[test]
    fn test_stacked_pair_is_not_a_gate() {
        let a = Vec3::new(0.0, 340.0, 0.0);
        let b = Vec3::new(0.0, 380.0, 0.0);
        assert!(!in_gate_gap(Vec3::new(5.0, 362.0, -5.0), a, b, 40.0));
        assert!(!in_gate_gap(Vec3::new(-15.0, 360.0, 0.0), b, a, 40.0));
    }

    #[test]
    fn test_gate_gap_along_z() {
        let a = Vec3::new(0.0, 340.0, 0.0);
        let b = Vec3::new(0.0, 340.0, -40.0);
        assert!(in_gate_gap(Vec3::new(3.0, 335.0, -20.0), a, b, 40.0));
    }

    #[test]
    fn test_pushes_ordered_by_depth() {
        let player = Aabb::cube(Vec3::new(-15.0, 350.0, 0.0), 20.0);
        let obstacle = Aabb::cube(Vec3::new(0.0, 340.0, 0.0), 40.0);
        let Some(pushes) = separating_pushes(&player, &obstacle) else {
            panic!("boxes overlap");
        };
        let axes: Vec<Axis> = pushes.iter().map(|r| r.axis).collect();
        assert_eq!(axes, vec![Axis::X, Axis::Y, Axis::Z]);
        assert_eq!(pushes[1].normal, Vec3::Y);
        let far = Aabb::cube(Vec3::splat(500.0), 40.0);
        assert!(separating_pushes(&player, &far).is_none());
    }

    proptest! {
        #[test]
        fn resolved_boxes_do_not_overlap(
            px in -40.0f32..40.0, py in -40.0f32..40.0, pz in -40.0f32..40.0,
        ) {
            let player = Aabb::cube(Vec3::new(px, py, pz), 20.0);
            let obstacle = Aabb::cube(Vec3::ZERO, 40.0);
            let result = box_collision(&player, &obstacle);
            if result.hit {
                let resolved = Aabb::cube(push_out(&player, &obstacle, &result), 20.0);
                // Flush faces may differ by rounding; anything deeper is a real overlap
                if let Some(overlap) = resolved.overlap(&obstacle) {
                    prop_assert!(overlap.min_element() < 1e-3, "still overlapping: {overlap}");
                }
            }
        }
    }
}
