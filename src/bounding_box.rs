//! Axis-aligned bounds, recomputed conservatively under a transform.

use crate::math::{Matrix, Point, Vector};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// The unit cube centered at the origin.
    pub fn unit() -> Self {
        Self::new(Point::new(-0.5, -0.5, -0.5), Point::new(0.5, 0.5, 0.5))
    }

    /// Recomputes tight axis-aligned bounds of the transformed box using
    /// per-axis absolute sums of the transformed half-extents: the new
    /// center is the transformed old center, and each output half-extent is
    /// the sum of the absolute x/y/z components of the transformed
    /// half-extent vectors along each input axis. This over-approximates
    /// (never under-approximates) the true bounds of a rotated box.
    pub fn apply(&self, transform: &Matrix) -> Self {
        let center = Point::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        );
        let half = Vector::new(
            (self.max.x - self.min.x) * 0.5,
            (self.max.y - self.min.y) * 0.5,
            (self.max.z - self.min.z) * 0.5,
        );
        let new_center = transform.transform_point(center);
        let vx = transform.transform_vector(Vector::new(half.x, 0.0, 0.0));
        let vy = transform.transform_vector(Vector::new(0.0, half.y, 0.0));
        let vz = transform.transform_vector(Vector::new(0.0, 0.0, half.z));
        let new_half = Vector::new(
            vx.x.abs() + vy.x.abs() + vz.x.abs(),
            vx.y.abs() + vy.y.abs() + vz.y.abs(),
            vx.z.abs() + vy.z.abs() + vz.z.abs(),
        );
        Self::new(new_center - new_half, new_center + new_half)
    }

    /// The smallest box containing both `a` and `b`.
    pub fn merge(a: &Self, b: &Self) -> Self {
        Self::new(
            Point::new(a.min.x.min(b.min.x), a.min.y.min(b.min.y), a.min.z.min(b.min.z)),
            Point::new(a.max.x.max(b.max.x), a.max.y.max(b.max.y), a.max.z.max(b.max.z)),
        )
    }

    pub fn intersects(a: &Self, b: &Self) -> bool {
        a.min.x <= b.max.x
            && a.max.x >= b.min.x
            && a.min.y <= b.max.y
            && a.max.y >= b.min.y
            && a.min.z <= b.max.z
            && a.max.z >= b.min.z
    }

    /// Inclusive of the boundary.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_apply_translate_shifts_both_corners() {
        let offset = Vector::new(1.0, 2.0, 3.0);
        let moved = BoundingBox::unit().apply(&Matrix::translate(offset));
        assert_relative_eq!(moved.min.x, BoundingBox::unit().min.x + offset.x);
        assert_relative_eq!(moved.min.y, BoundingBox::unit().min.y + offset.y);
        assert_relative_eq!(moved.min.z, BoundingBox::unit().min.z + offset.z);
        assert_relative_eq!(moved.max.x, BoundingBox::unit().max.x + offset.x);
    }

    #[test]
    fn test_apply_90_degree_rotation_of_centered_cube_is_unchanged() {
        let rotated = BoundingBox::unit().apply(&Matrix::yaw(FRAC_PI_2));
        assert_relative_eq!(rotated.min.x, BoundingBox::unit().min.x, epsilon = 1e-5);
        assert_relative_eq!(rotated.max.x, BoundingBox::unit().max.x, epsilon = 1e-5);
        assert_relative_eq!(rotated.min.z, BoundingBox::unit().min.z, epsilon = 1e-5);
    }

    #[test]
    fn test_merge_is_commutative_and_idempotent() {
        let a = BoundingBox::new(Point::new(0.0, 0.0, 0.0), Point::new(1.0, 1.0, 1.0));
        let b = BoundingBox::new(Point::new(-1.0, -1.0, -1.0), Point::new(0.5, 0.5, 0.5));
        assert_eq!(BoundingBox::merge(&a, &b), BoundingBox::merge(&b, &a));
        assert_eq!(BoundingBox::merge(&a, &a), a);
    }

    #[test]
    fn test_contains_is_inclusive_of_boundary() {
        let b = BoundingBox::unit();
        assert!(b.contains(Point::new(0.5, 0.5, 0.5)));
        assert!(b.contains(Point::new(-0.5, 0.0, 0.0)));
        assert!(!b.contains(Point::new(0.50001, 0.0, 0.0)));
    }
}
