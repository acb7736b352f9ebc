//! The host-facing boundary that decodes an on-disk image into a [`Bitmap`]
//! sampler. Decoding itself (and the failures it can produce) lives here,
//! outside the core renderer; the `image` crate dependency exists to serve
//! this one boundary function.

use std::path::Path;

use crate::color::Color;
use crate::error::RenderError;
use crate::sampler::Bitmap;

/// Decodes the image at `path` and wraps it in a [`Bitmap`] sampler.
pub fn load_bitmap_sampler(path: impl AsRef<Path>) -> Result<Bitmap, RenderError> {
    let decoded = image::open(path)?.to_rgba8();
    bitmap_from_rgba8(decoded.width(), decoded.height(), decoded.into_raw())
}

/// Builds a [`Bitmap`] from raw, already-decoded RGBA8 bytes (4 bytes per
/// pixel, row-major, top-origin) — the shape `image::RgbaImage::into_raw`
/// produces and the shape a host with its own decoder would already have.
pub fn bitmap_from_rgba8(width: u32, height: u32, bytes: Vec<u8>) -> Result<Bitmap, RenderError> {
    if bytes.is_empty() {
        return Err(RenderError::EmptyPixelBuffer);
    }
    let expected = (width as usize) * (height as usize) * 4;
    if bytes.len() != expected {
        return Err(RenderError::DimensionMismatch { expected, actual: bytes.len() });
    }
    let pixels = bytes.chunks_exact(4).map(|c| Color::new(c[0], c[1], c[2], c[3])).collect();
    Ok(Bitmap::from_rgba(width, height, pixels))
}
