use crate::Transform;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box.
///
/// Bounds are inclusive: two boxes that share a face intersect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Box from two corners in any order.
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Tightest box enclosing a box of `dimensions` placed by `transform`.
    ///
    /// The eight corners of the local box are scaled, rotated and translated,
    /// then the world-space extremes are taken.
    pub fn from_oriented_box(transform: &Transform, dimensions: Vec3) -> Self {
        let half = dimensions * 0.5;
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for i in 0..8u8 {
            let local = Vec3::new(
                if i & 1 == 0 { -half.x } else { half.x },
                if i & 2 == 0 { -half.y } else { half.y },
                if i & 4 == 0 { -half.z } else { half.z },
            );
            let world = transform.position + transform.rotation * (local * transform.scale);
            min = min.min(world);
            max = max.max(world);
        }
        Self { min, max }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// A copy of this box moved by `offset`.
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        !(other.max.x < self.min.x
            || other.min.x > self.max.x
            || other.max.y < self.min.y
            || other.min.y > self.max.y
            || other.max.z < self.min.z
            || other.min.z > self.max.z)
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-4;

    #[test]
    fn corners_are_normalized() {
        let b = Aabb::from_corners(Vec3::new(1.0, -1.0, 2.0), Vec3::new(-1.0, 1.0, 0.0));
        assert_eq!(b.min, Vec3::new(-1.0, -1.0, 0.0));
        assert_eq!(b.max, Vec3::new(1.0, 1.0, 2.0));
    }

    #[test]
    fn overlapping_boxes_intersect() {
        let a = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.5));
        let b = Aabb::from_center_half_extents(Vec3::new(0.8, 0.0, 0.0), Vec3::splat(0.5));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn touching_faces_intersect() {
        let a = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.5));
        let b = Aabb::from_center_half_extents(Vec3::new(1.0, 0.0, 0.0), Vec3::splat(0.5));
        assert!(a.intersects(&b));
    }

    #[test]
    fn separated_boxes_do_not_intersect() {
        let a = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.5));
        let b = Aabb::from_center_half_extents(Vec3::new(0.0, 0.0, 1.01), Vec3::splat(0.5));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn translated_moves_both_corners() {
        let a = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.5));
        let t = a.translated(Vec3::new(0.0, 0.0, -2.0));
        assert_eq!(t.center(), Vec3::new(0.0, 0.0, -2.0));
        assert_eq!(t.size(), a.size());
    }

    #[test]
    fn oriented_box_without_rotation_matches_dimensions() {
        let t = Transform::from_position(Vec3::new(0.0, 2.5, 15.0));
        let b = Aabb::from_oriented_box(&t, Vec3::new(30.0, 5.0, 1.0));
        assert!((b.min - Vec3::new(-15.0, 0.0, 14.5)).length() < EPS);
        assert!((b.max - Vec3::new(15.0, 5.0, 15.5)).length() < EPS);
    }

    #[test]
    fn quarter_turn_swaps_width_and_depth() {
        let t = Transform {
            position: Vec3::new(-15.0, 2.5, 0.0),
            rotation: Quat::from_rotation_y(FRAC_PI_2),
            ..Transform::default()
        };
        let b = Aabb::from_oriented_box(&t, Vec3::new(30.0, 5.0, 1.0));
        let size = b.size();
        assert!((size.x - 1.0).abs() < EPS);
        assert!((size.y - 5.0).abs() < EPS);
        assert!((size.z - 30.0).abs() < EPS);
        assert!((b.center() - t.position).length() < EPS);
    }

    #[test]
    fn contains_point_is_inclusive() {
        let b = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE);
        assert!(b.contains_point(Vec3::ONE));
        assert!(!b.contains_point(Vec3::new(1.1, 0.0, 0.0)));
    }
}
