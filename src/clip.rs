//! Near-plane triangle clipping.
//!
//! Only the near plane is clipped analytically; the four side planes are
//! merely clamped by the rasterizer's bounding rectangle (§4.7) — a cheap
//! substitute for full frustum clipping that this crate deliberately does
//! not implement.

use crate::color::ShadingTerm;
use crate::math::Point;
use crate::sampler::TextureCoordinate;

pub const NEAR_Z: f32 = -1.0;
const EPSILON: f32 = 1e-5;

/// `true` iff `point` (in view space) lies in front of the near plane.
pub fn is_in_front(point: Point) -> bool {
    point.z < NEAR_Z
}

/// A fully lit triangle vertex in view space, ready for clipping and
/// projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadedVertex {
    pub position: Point,
    pub uv: TextureCoordinate,
    pub shading: ShadingTerm,
}

impl ShadedVertex {
    pub fn new(position: Point, uv: TextureCoordinate, shading: ShadingTerm) -> Self {
        Self { position, uv, shading }
    }
}

/// The intersection of edge `(a, b)` with the near plane. `z` is biased
/// away from the plane by `EPSILON` so the generated vertex does not
/// re-fail [`is_in_front`]. `uv` interpolates linearly; the shading term is
/// *not* interpolated — it always copies `b`'s, a known limitation this
/// crate preserves rather than silently fixing (see the design notes on
/// near-plane clipping).
fn intersect(a: ShadedVertex, b: ShadedVertex) -> ShadedVertex {
    let t = (a.position.z + NEAR_Z) / (a.position.z - b.position.z);
    let lerp = |from: f32, to: f32| from + (to - from) * t;
    let position = Point::new(
        lerp(a.position.x, b.position.x),
        lerp(a.position.y, b.position.y),
        -NEAR_Z - EPSILON,
    );
    let uv = TextureCoordinate::new(lerp(a.uv.u, b.uv.u), lerp(a.uv.v, b.uv.v));
    ShadedVertex::new(position, uv, b.shading)
}

/// Clips a triangle against the near plane, producing 0, 3, or 4 vertices in
/// a fixed 4-slot buffer (the first `len` entries are populated).
pub struct ClippedPolygon {
    vertices: [ShadedVertex; 4],
    len: usize,
}

impl ClippedPolygon {
    pub fn vertices(&self) -> &[ShadedVertex] {
        &self.vertices[..self.len]
    }

    /// The triangles the clipped polygon decomposes into: one if `len ==
    /// 3`, two (fan-triangulated) if `len == 4`, none otherwise.
    pub fn triangles(&self) -> Vec<[ShadedVertex; 3]> {
        match self.len {
            3 => vec![[self.vertices[0], self.vertices[1], self.vertices[2]]],
            4 => vec![
                [self.vertices[0], self.vertices[1], self.vertices[2]],
                [self.vertices[0], self.vertices[2], self.vertices[3]],
            ],
            _ => Vec::new(),
        }
    }
}

pub fn clip_near(triangle: [ShadedVertex; 3]) -> ClippedPolygon {
    let placeholder = triangle[0];
    let mut out = [placeholder; 4];
    let mut len = 0;

    for i in 0..3 {
        let a = triangle[i];
        let b = triangle[(i + 1) % 3];
        match (is_in_front(a.position), is_in_front(b.position)) {
            (true, true) => {
                out[len] = b;
                len += 1;
            }
            (true, false) => {
                out[len] = intersect(a, b);
                len += 1;
            }
            (false, true) => {
                out[len] = intersect(a, b);
                len += 1;
                out[len] = b;
                len += 1;
            }
            (false, false) => {}
        }
    }

    ClippedPolygon { vertices: out, len }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use approx::assert_relative_eq;

    fn vertex(z: f32) -> ShadedVertex {
        ShadedVertex::new(Point::new(0.0, 0.0, z), TextureCoordinate::new(0.0, 0.0), ShadingTerm::new(Color::WHITE, 1.0))
    }

    #[test]
    fn test_entirely_in_front_is_unchanged() {
        let triangle = [vertex(-2.0), vertex(-3.0), vertex(-4.0)];
        let clipped = clip_near(triangle);
        assert_eq!(clipped.vertices(), &triangle);
    }

    #[test]
    fn test_entirely_behind_is_empty() {
        let triangle = [vertex(-0.5), vertex(-0.2), vertex(0.0)];
        let clipped = clip_near(triangle);
        assert_eq!(clipped.vertices().len(), 0);
        assert!(clipped.triangles().is_empty());
    }

    #[test]
    fn test_straddling_triangle_yields_three_or_four_vertices() {
        let triangle = [vertex(-2.0), vertex(-0.5), vertex(-0.5)];
        let clipped = clip_near(triangle);
        assert!(clipped.vertices().len() == 3 || clipped.vertices().len() == 4);
    }

    #[test]
    fn test_generated_vertices_lie_on_near_plane() {
        let triangle = [vertex(-2.0), vertex(-0.5), vertex(-0.5)];
        let clipped = clip_near(triangle);
        for v in clipped.vertices() {
            if (v.position.z - (-NEAR_Z - EPSILON)).abs() < 1e-6 {
                assert_relative_eq!(v.position.z, -NEAR_Z - EPSILON, epsilon = 2.0 * EPSILON);
            }
        }
    }

    #[test]
    fn test_four_vertex_case_triangulates_as_fan() {
        let triangle = [vertex(-2.0), vertex(0.0), vertex(0.0)];
        let clipped = clip_near(triangle);
        if clipped.vertices().len() == 4 {
            let triangles = clipped.triangles();
            assert_eq!(triangles.len(), 2);
            assert_eq!(triangles[0][0], triangles[1][0]);
        }
    }

    #[test]
    fn test_generated_vertex_inherits_shading_from_b_not_interpolated() {
        let a = ShadedVertex::new(Point::new(0.0, 0.0, -2.0), TextureCoordinate::new(0.0, 0.0), ShadingTerm::new(Color::WHITE, 1.0));
        let b = ShadedVertex::new(Point::new(0.0, 0.0, 0.0), TextureCoordinate::new(0.0, 0.0), ShadingTerm::new(Color::BLACK, 0.0));
        let generated = intersect(a, b);
        assert_eq!(generated.shading, b.shading);
    }
}
