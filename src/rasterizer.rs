//! Edge-function triangle traversal with perspective-correct `(u, v)` and
//! shading-term interpolation, writing through a depth test.
//!
//! Reference: Pineda, "A Parallel Algorithm for Polygon Rasterization"
//! (1988); the three-edge-function inside test and the "barycentric weight
//! = normalized edge function" identity are standard (see also
//! scratchapixel's rasterization stage articles), but the depth and uv
//! interpolation biases below (`inv_z = -1 / (z - 1)`) are this renderer's
//! own and are preserved exactly for numerical parity.

use crate::clip::NEAR_Z;
use crate::clip::ShadedVertex;
use crate::color::{Color, ShadingTerm};
use crate::material::Material;
use crate::raster::{DepthBuffer, FrameBuffer};
use crate::sampler::TextureCoordinate;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenCoordinate {
    pub x: i32,
    pub y: i32,
}

/// Projects a view-space point to integer screen coordinates (§4.6 of the
/// design this crate follows). `z' = p.z + |NEAR_Z|` is clamped away from
/// zero; all real inputs are negative here because they have already passed
/// near-plane clipping, so the clamp only guards degenerate callers.
pub fn project_to_screen(x: f32, y: f32, z: f32, width: u32, height: u32) -> ScreenCoordinate {
    const THRESHOLD: f32 = 1e-5;
    let mut z_prime = z + NEAR_Z.abs();
    if z_prime >= 0.0 {
        z_prime = -THRESHOLD;
    }
    let (w, h) = (width as f32, height as f32);
    let nx = (h * x) / (w * -z_prime);
    let ny = y / -z_prime;
    let fx = (nx + 1.0) * 0.5 * w;
    let fy = (1.0 - (ny + 1.0) * 0.5) * h;
    ScreenCoordinate { x: fx.floor() as i32, y: fy.floor() as i32 }
}

fn edge_function(a: (f32, f32), b: (f32, f32), p: (f32, f32)) -> f32 {
    (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0)
}

/// Weighted sum of three shading terms by barycentric weights: intensities
/// add as floats, color channels as 8-bit values rounded after the weighted
/// sum.
fn blend_shading(terms: [ShadingTerm; 3], weights: [f32; 3]) -> ShadingTerm {
    let channel = |pick: fn(Color) -> u8| -> u8 {
        let sum: f32 = (0..3).map(|i| pick(terms[i].color) as f32 * weights[i]).sum();
        sum.round().clamp(0.0, 255.0) as u8
    };
    let intensity: f32 = (0..3).map(|i| terms[i].intensity * weights[i]).sum();
    let color = Color::new(channel(|c| c.r), channel(|c| c.g), channel(|c| c.b), channel(|c| c.a));
    ShadingTerm::new(color, intensity)
}

/// Rasterizes one triangle of three already-clipped, already-lit view-space
/// vertices into `framebuffer`/`depth_buffer`.
pub fn rasterize_triangle(
    vertices: [ShadedVertex; 3],
    material: &Material,
    framebuffer: &mut FrameBuffer,
    depth_buffer: &mut DepthBuffer,
) {
    let width = framebuffer.width();
    let height = framebuffer.height();
    let screen: Vec<ScreenCoordinate> = vertices
        .iter()
        .map(|v| project_to_screen(v.position.x, v.position.y, v.position.z, width, height))
        .collect();
    let (a, b, c) = (screen[0], screen[1], screen[2]);

    let min_x = a.x.min(b.x).min(c.x).max(0);
    let max_x = a.x.max(b.x).max(c.x).min(width as i32 - 1);
    let min_y = a.y.min(b.y).min(c.y).max(0);
    let max_y = a.y.max(b.y).max(c.y).min(height as i32 - 1);
    if min_x > max_x || min_y > max_y {
        return;
    }

    // inv_z keeps the interpolation weight strictly positive over the
    // post-clip z range; the "-1" shift is an implementation-defined bias,
    // not a general-purpose projective depth — preserved exactly.
    let inv_z: Vec<f32> = vertices.iter().map(|v| -1.0 / (v.position.z - 1.0)).collect();
    let uoz: Vec<f32> = (0..3).map(|i| vertices[i].uv.u * inv_z[i]).collect();
    let voz: Vec<f32> = (0..3).map(|i| vertices[i].uv.v * inv_z[i]).collect();

    let pa = (a.x as f32, a.y as f32);
    let pb = (b.x as f32, b.y as f32);
    let pc = (c.x as f32, c.y as f32);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = (x as f32 + 0.5, y as f32 + 0.5);
            let w0 = edge_function(pb, pc, p);
            let w1 = edge_function(pc, pa, p);
            let w2 = edge_function(pa, pb, p);
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }
            let sum = w0 + w1 + w2;
            if sum == 0.0 {
                continue;
            }
            let weights = [w0 / sum, w1 / sum, w2 / sum];

            let interpolated_inv_z = weights[0] * inv_z[0] + weights[1] * inv_z[1] + weights[2] * inv_z[2];
            let z = 1.0 / interpolated_inv_z;

            let (x, y) = (x as u32, y as u32);
            if !(z < *depth_buffer.get(x, y)) {
                continue;
            }

            let u = (weights[0] * uoz[0] + weights[1] * uoz[1] + weights[2] * uoz[2]) / interpolated_inv_z;
            let v = (weights[0] * voz[0] + weights[1] * voz[1] + weights[2] * voz[2]) / interpolated_inv_z;
            let texel = material.sample(TextureCoordinate::new(u, v));
            let shading = blend_shading([vertices[0].shading, vertices[1].shading, vertices[2].shading], weights);

            framebuffer.set(x, y, shading.apply(texel));
            depth_buffer.set(x, y, z);
        }
    }
}
