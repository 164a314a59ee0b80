//! Axis-aligned boxes
//!
//! Everything in the world is a box: the platform, the player and the
//! obstacle cubes. A box is its center plus half extents on each axis.

use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Aabb {
    /// Box from its center and full size (width, height, depth)
    pub fn new(center: Vec3, size: Vec3) -> Self {
        Self {
            center,
            half_extents: size / 2.0,
        }
    }

    /// Cube with the given edge length
    pub fn cube(center: Vec3, edge: f32) -> Self {
        Self::new(center, Vec3::splat(edge))
    }

    #[inline]
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// Full size (width, height, depth)
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.half_extents * 2.0
    }

    /// Y of the top face
    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y + self.half_extents.y
    }

    /// Y of the bottom face
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y - self.half_extents.y
    }

    /// Whether a point lies over the box's horizontal footprint (edges inclusive)
    pub fn contains_xz(&self, point: Vec3) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x && point.x <= max.x && point.z >= min.z && point.z <= max.z
    }

    /// Per-axis overlap lengths with another box, or `None` unless all three axes overlap
    ///
    /// Touching faces do not count as overlap.
    pub fn overlap(&self, other: &Aabb) -> Option<Vec3> {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        let overlapping = a_max.cmpgt(b_min) & a_min.cmplt(b_max);
        if !overlapping.all() {
            return None;
        }
        Some(a_max.min(b_max) - a_min.max(b_min))
    }

    /// The 8 corners: back face (-z) counter-clockwise from bottom-left, then front face
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min(), self.max());
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
        ]
    }
}

/// Corner index pairs for the 12 box edges, matching [`Aabb::corners`]
pub const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_geometry() {
        let platform = Aabb::new(Vec3::new(0.0, 300.0, 0.0), Vec3::new(240.0, 40.0, 240.0));
        assert_eq!(platform.top(), 320.0);
        assert_eq!(platform.bottom(), 280.0);
        assert!(platform.contains_xz(Vec3::new(120.0, 0.0, -120.0)));
        assert!(!platform.contains_xz(Vec3::new(120.1, 0.0, 0.0)));
    }

    #[test]
    fn test_overlap() {
        let a = Aabb::cube(Vec3::ZERO, 20.0);
        let b = Aabb::cube(Vec3::new(25.0, 5.0, 0.0), 40.0);
        let overlap = a.overlap(&b).unwrap();
        assert_eq!(overlap, Vec3::new(5.0, 20.0, 20.0));
    }

    #[test]
    fn test_touching_is_not_overlap() {
        let a = Aabb::cube(Vec3::ZERO, 20.0);
        let b = Aabb::cube(Vec3::new(30.0, 0.0, 0.0), 40.0);
        assert!(a.overlap(&b).is_none());
    }

    #[test]
    fn test_edges_connect_adjacent_corners() {
        let cube = Aabb::cube(Vec3::ZERO, 2.0);
        let corners = cube.corners();
        for (i, j) in BOX_EDGES {
            // Every edge differs on exactly one axis
            let d = (corners[i] - corners[j]).abs();
            let axes = [d.x, d.y, d.z].iter().filter(|v| **v > 0.0).count();
            assert_eq!(axes, 1);
            assert_eq!(d.max_element(), 2.0);
        }
    }
}
