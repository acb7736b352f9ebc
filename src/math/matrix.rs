//! 4x4 homogeneous transformation matrix.
//!
//! Elements are stored as a flat array indexed `x + WIDTH * y`, where `x` is
//! the column and `y` is the row — the same layout the renderer this crate
//! is descended from used for its `Matrix` type. `IDENTITY` is the neutral
//! element under multiplication; every other constructor builds a matrix
//! relative to it.

use std::ops::Mul;

use super::point::Point;
use super::vector::Vector;

const WIDTH: usize = 4;
const HEIGHT: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix {
    elements: [f32; WIDTH * HEIGHT],
}

impl Matrix {
    pub const IDENTITY: Self = Self {
        elements: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, //
        ],
    };

    /// Reads the element at column `x`, row `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.elements[x + WIDTH * y]
    }

    /// Writes the element at column `x`, row `y`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        self.elements[x + WIDTH * y] = value;
    }

    pub fn translate(offset: Vector) -> Self {
        let mut m = Self::IDENTITY;
        m.set(3, 0, offset.x);
        m.set(3, 1, offset.y);
        m.set(3, 2, offset.z);
        m
    }

    pub fn scale_x(factor: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.set(0, 0, factor);
        m
    }

    pub fn scale_y(factor: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.set(1, 1, factor);
        m
    }

    pub fn scale_z(factor: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.set(2, 2, factor);
        m
    }

    /// Uniform scale along all three axes.
    pub fn scale(factor: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.set(0, 0, factor);
        m.set(1, 1, factor);
        m.set(2, 2, factor);
        m
    }

    /// Rotation about the x-axis.
    pub fn pitch(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        let mut m = Self::IDENTITY;
        m.set(1, 1, c);
        m.set(2, 1, -s);
        m.set(1, 2, s);
        m.set(2, 2, c);
        m
    }

    /// Rotation about the y-axis.
    pub fn yaw(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        let mut m = Self::IDENTITY;
        m.set(0, 0, c);
        m.set(2, 0, s);
        m.set(0, 2, -s);
        m.set(2, 2, c);
        m
    }

    /// Rotation about the z-axis.
    pub fn roll(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        let mut m = Self::IDENTITY;
        m.set(0, 0, c);
        m.set(1, 0, -s);
        m.set(0, 1, s);
        m.set(1, 1, c);
        m
    }

    /// Rotation by `radians` about an arbitrary unit-length `axis` (Rodrigues' formula).
    pub fn rotate(axis: Vector, radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        let t = 1.0 - c;
        let (x, y, z) = (axis.x, axis.y, axis.z);
        let mut m = Self::IDENTITY;
        m.set(0, 0, t * x * x + c);
        m.set(1, 0, t * x * y - s * z);
        m.set(2, 0, t * x * z + s * y);
        m.set(0, 1, t * x * y + s * z);
        m.set(1, 1, t * y * y + c);
        m.set(2, 1, t * y * z - s * x);
        m.set(0, 2, t * x * z - s * y);
        m.set(1, 2, t * y * z + s * x);
        m.set(2, 2, t * z * z + c);
        m
    }

    /// Applies the full homogeneous transform to a point. `P`'s implicit `w` is 1;
    /// the result is not perspective-divided — that only ever happens in the
    /// rasterizer's and screen-projection's own code, never here.
    pub fn transform_point(&self, p: Point) -> Point {
        Point::new(
            self.get(0, 0) * p.x + self.get(1, 0) * p.y + self.get(2, 0) * p.z + self.get(3, 0),
            self.get(0, 1) * p.x + self.get(1, 1) * p.y + self.get(2, 1) * p.z + self.get(3, 1),
            self.get(0, 2) * p.x + self.get(1, 2) * p.y + self.get(2, 2) * p.z + self.get(3, 2),
        )
    }

    /// Applies only the linear (upper-left 3x3) part of the transform. `V`'s
    /// implicit `w` is 0, so translation has no effect.
    pub fn transform_vector(&self, v: Vector) -> Vector {
        Vector::new(
            self.get(0, 0) * v.x + self.get(1, 0) * v.y + self.get(2, 0) * v.z,
            self.get(0, 1) * v.x + self.get(1, 1) * v.y + self.get(2, 1) * v.z,
            self.get(0, 2) * v.x + self.get(1, 2) * v.y + self.get(2, 2) * v.z,
        )
    }

    /// Returns the inverse of an invertible matrix, or `None` if it is singular.
    pub fn invert(&self) -> Option<Matrix> {
        let m = &self.elements;
        // 2x2 sub-determinants of the bottom two rows, reused across the
        // cofactor expansion below (classic adjugate-by-cofactors scheme).
        let g = |x: usize, y: usize| m[x + WIDTH * y];

        let c00 = g(1, 1) * (g(2, 2) * g(3, 3) - g(2, 3) * g(3, 2))
            - g(2, 1) * (g(1, 2) * g(3, 3) - g(1, 3) * g(3, 2))
            + g(3, 1) * (g(1, 2) * g(2, 3) - g(1, 3) * g(2, 2));
        let c01 = -(g(0, 1) * (g(2, 2) * g(3, 3) - g(2, 3) * g(3, 2))
            - g(2, 1) * (g(0, 2) * g(3, 3) - g(0, 3) * g(3, 2))
            + g(3, 1) * (g(0, 2) * g(2, 3) - g(0, 3) * g(2, 2)));
        let c02 = g(0, 1) * (g(1, 2) * g(3, 3) - g(1, 3) * g(3, 2))
            - g(1, 1) * (g(0, 2) * g(3, 3) - g(0, 3) * g(3, 2))
            + g(3, 1) * (g(0, 2) * g(1, 3) - g(0, 3) * g(1, 2));
        let c03 = -(g(0, 1) * (g(1, 2) * g(2, 3) - g(1, 3) * g(2, 2))
            - g(1, 1) * (g(0, 2) * g(2, 3) - g(0, 3) * g(2, 2))
            + g(2, 1) * (g(0, 2) * g(1, 3) - g(0, 3) * g(1, 2)));

        let det = g(0, 0) * c00 + g(1, 0) * c01 + g(2, 0) * c02 + g(3, 0) * c03;
        if det.abs() < f32::EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;

        let c10 = -(g(1, 0) * (g(2, 2) * g(3, 3) - g(2, 3) * g(3, 2))
            - g(2, 0) * (g(1, 2) * g(3, 3) - g(1, 3) * g(3, 2))
            + g(3, 0) * (g(1, 2) * g(2, 3) - g(1, 3) * g(2, 2)));
        let c11 = g(0, 0) * (g(2, 2) * g(3, 3) - g(2, 3) * g(3, 2))
            - g(2, 0) * (g(0, 2) * g(3, 3) - g(0, 3) * g(3, 2))
            + g(3, 0) * (g(0, 2) * g(2, 3) - g(0, 3) * g(2, 2));
        let c12 = -(g(0, 0) * (g(1, 2) * g(3, 3) - g(1, 3) * g(3, 2))
            - g(1, 0) * (g(0, 2) * g(3, 3) - g(0, 3) * g(3, 2))
            + g(3, 0) * (g(0, 2) * g(1, 3) - g(0, 3) * g(1, 2)));
        let c13 = g(0, 0) * (g(1, 2) * g(2, 3) - g(1, 3) * g(2, 2))
            - g(1, 0) * (g(0, 2) * g(2, 3) - g(0, 3) * g(2, 2))
            + g(2, 0) * (g(0, 2) * g(1, 3) - g(0, 3) * g(1, 2));

        let c20 = g(1, 0) * (g(2, 1) * g(3, 3) - g(2, 3) * g(3, 1))
            - g(2, 0) * (g(1, 1) * g(3, 3) - g(1, 3) * g(3, 1))
            + g(3, 0) * (g(1, 1) * g(2, 3) - g(1, 3) * g(2, 1));
        let c21 = -(g(0, 0) * (g(2, 1) * g(3, 3) - g(2, 3) * g(3, 1))
            - g(2, 0) * (g(0, 1) * g(3, 3) - g(0, 3) * g(3, 1))
            + g(3, 0) * (g(0, 1) * g(2, 3) - g(0, 3) * g(2, 1)));
        let c22 = g(0, 0) * (g(1, 1) * g(3, 3) - g(1, 3) * g(3, 1))
            - g(1, 0) * (g(0, 1) * g(3, 3) - g(0, 3) * g(3, 1))
            + g(3, 0) * (g(0, 1) * g(1, 3) - g(0, 3) * g(1, 1));
        let c23 = -(g(0, 0) * (g(1, 1) * g(2, 3) - g(1, 3) * g(2, 1))
            - g(1, 0) * (g(0, 1) * g(2, 3) - g(0, 3) * g(2, 1))
            + g(2, 0) * (g(0, 1) * g(1, 3) - g(0, 3) * g(1, 1)));

        let c30 = -(g(1, 0) * (g(2, 1) * g(3, 2) - g(2, 2) * g(3, 1))
            - g(2, 0) * (g(1, 1) * g(3, 2) - g(1, 2) * g(3, 1))
            + g(3, 0) * (g(1, 1) * g(2, 2) - g(1, 2) * g(2, 1)));
        let c31 = g(0, 0) * (g(2, 1) * g(3, 2) - g(2, 2) * g(3, 1))
            - g(2, 0) * (g(0, 1) * g(3, 2) - g(0, 2) * g(3, 1))
            + g(3, 0) * (g(0, 1) * g(2, 2) - g(0, 2) * g(2, 1));
        let c32 = -(g(0, 0) * (g(1, 1) * g(3, 2) - g(1, 2) * g(3, 1))
            - g(1, 0) * (g(0, 1) * g(3, 2) - g(0, 2) * g(3, 1))
            + g(3, 0) * (g(0, 1) * g(1, 2) - g(0, 2) * g(1, 1)));
        let c33 = g(0, 0) * (g(1, 1) * g(2, 2) - g(1, 2) * g(2, 1))
            - g(1, 0) * (g(0, 1) * g(2, 2) - g(0, 2) * g(2, 1))
            + g(2, 0) * (g(0, 1) * g(1, 2) - g(0, 2) * g(1, 1));

        let mut result = Matrix::IDENTITY;
        let cofactors = [
            [c00, c10, c20, c30],
            [c01, c11, c21, c31],
            [c02, c12, c22, c32],
            [c03, c13, c23, c33],
        ];
        for (y, row) in cofactors.iter().enumerate() {
            for (x, cofactor) in row.iter().enumerate() {
                result.set(x, y, cofactor * inv_det);
            }
        }
        Some(result)
    }
}

impl Mul<Matrix> for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Self::Output {
        let mut result = Matrix::IDENTITY;
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                let mut e = 0.0;
                for z in 0..WIDTH {
                    e += self.get(z, y) * rhs.get(x, z);
                }
                result.set(x, y, e);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_matrix_eq(a: Matrix, b: Matrix) {
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                assert_relative_eq!(a.get(x, y), b.get(x, y), epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_identity_is_neutral() {
        let m = Matrix::translate(Vector::new(1.0, 2.0, 3.0)) * Matrix::scale(2.0);
        assert_matrix_eq(Matrix::IDENTITY * m, m);
        assert_matrix_eq(m * Matrix::IDENTITY, m);
    }

    #[test]
    fn test_invert_translate() {
        let v = Vector::new(1.0, -2.0, 3.5);
        let inverted = Matrix::translate(v).invert().unwrap();
        assert_matrix_eq(inverted, Matrix::translate(-v));
    }

    #[test]
    fn test_invert_round_trip() {
        let m = Matrix::translate(Vector::new(2.0, 0.0, -1.0))
            * Matrix::yaw(0.7)
            * Matrix::scale(1.5);
        let product = m * m.invert().unwrap();
        assert_matrix_eq(product, Matrix::IDENTITY);
    }

    #[test]
    fn test_transform_point_applies_translation() {
        let m = Matrix::translate(Vector::new(1.0, 2.0, 3.0));
        let p = m.transform_point(Point::ORIGIN);
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 2.0);
        assert_relative_eq!(p.z, 3.0);
    }

    #[test]
    fn test_transform_vector_ignores_translation() {
        let m = Matrix::translate(Vector::new(5.0, 5.0, 5.0));
        let v = m.transform_vector(Vector::new(1.0, 0.0, 0.0));
        assert_relative_eq!(v.x, 1.0);
        assert_relative_eq!(v.y, 0.0);
        assert_relative_eq!(v.z, 0.0);
    }

    #[test]
    fn test_rotate_matches_named_axis_helpers() {
        let angle = 0.3;
        assert_matrix_eq(Matrix::rotate(Vector::X_AXIS, angle), Matrix::pitch(angle));
        assert_matrix_eq(Matrix::rotate(Vector::Y_AXIS, angle), Matrix::yaw(angle));
        assert_matrix_eq(Matrix::rotate(Vector::Z_AXIS, angle), Matrix::roll(angle));
    }
}
