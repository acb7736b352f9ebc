//! Samplers map a texture coordinate to a [`Color`]. The pipeline only ever
//! needs the `sample` capability, so it is modeled as a small trait with two
//! concrete implementations rather than a class hierarchy.

use crate::color::Color;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextureCoordinate {
    pub u: f32,
    pub v: f32,
}

impl TextureCoordinate {
    pub const fn new(u: f32, v: f32) -> Self {
        Self { u, v }
    }
}

pub trait Sampler {
    fn sample(&self, uv: TextureCoordinate) -> Color;
}

/// Always returns the same color, regardless of `(u, v)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Solid {
    color: Color,
}

impl Solid {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Sampler for Solid {
    fn sample(&self, _uv: TextureCoordinate) -> Color {
        self.color
    }
}

/// A 2D RGBA8 pixel grid sampled nearest-neighbor. `(0, 0)` in `uv` space is
/// the bottom-left texel; `v` is flipped on lookup to match a top-origin
/// pixel buffer, mirroring how the teacher's bitmap sampler and the original
/// `SdlSurfaceColorSampler` both read `(1 - v)` rows.
#[derive(Clone, Debug, PartialEq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Bitmap {
    /// Builds a bitmap sampler from an already-decoded RGBA8 pixel grid.
    /// Decoding an on-disk image is a host-side concern; see
    /// [`crate::error::RenderError`] for the failures that boundary can
    /// produce before a `Bitmap` ever exists.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<Color>) -> Self {
        debug_assert_eq!(pixels.len(), (width as usize) * (height as usize));
        Self { width, height, pixels }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Sampler for Bitmap {
    fn sample(&self, uv: TextureCoordinate) -> Color {
        let column = (uv.u * (self.width.saturating_sub(1)) as f32) as i64;
        let row = ((1.0 - uv.v) * (self.height.saturating_sub(1)) as f32) as i64;
        let column = column.rem_euclid(self.width.max(1) as i64) as u32;
        let row = row.rem_euclid(self.height.max(1) as i64) as u32;
        self.pixels[(row * self.width + column) as usize]
    }
}
