//! Text overlay boundary (§4.10 of the design this crate follows).
//!
//! Glyph rasterization is out of scope for the core renderer — the host
//! owns its own font stack and hands this module an already-rendered glyph
//! bitmap (one alpha byte per pixel). This module only knows how to
//! alpha-blend that bitmap onto a [`FrameBuffer`]; it never depends on a
//! font-rendering crate.

use crate::color::Color;
use crate::raster::FrameBuffer;

/// An already-rasterized run of glyphs: one 8-bit alpha value per pixel,
/// row-major, `width * height` long. Produced by the host's own text
/// shaping/rasterization stack (e.g. a glyph atlas or an SDL_ttf-rendered
/// surface); this crate never constructs one itself.
pub struct GlyphBitmap {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
}

impl GlyphBitmap {
    pub fn new(width: u32, height: u32, alpha: Vec<u8>) -> Self {
        debug_assert_eq!(alpha.len(), (width as usize) * (height as usize));
        Self { width, height, alpha }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Blits `glyphs` onto `framebuffer` at `(x, y)` in `color`, alpha-blending
/// per pixel: `out = src * alpha + dst * (1 - alpha)` on each of r/g/b, with
/// alpha itself accumulating toward opaque the same way. Pixels with zero
/// source alpha are skipped; pixels that land outside the framebuffer are
/// silently clipped, not an error.
pub fn render(glyphs: &GlyphBitmap, x: i32, y: i32, color: Color, framebuffer: &mut FrameBuffer) {
    for row in 0..glyphs.height as i32 {
        for column in 0..glyphs.width as i32 {
            let source_alpha = glyphs.alpha[(row as u32 * glyphs.width + column as u32) as usize];
            if source_alpha == 0 {
                continue;
            }
            let frame_x = x + column;
            let frame_y = y + row;
            if frame_x < 0 || frame_x >= framebuffer.width() as i32 || frame_y < 0 || frame_y >= framebuffer.height() as i32 {
                continue;
            }
            let (frame_x, frame_y) = (frame_x as u32, frame_y as u32);
            let destination = *framebuffer.get(frame_x, frame_y);
            let alpha = source_alpha as f32 / 255.0;
            let blend = |source: u8, dest: u8| -> u8 {
                (source as f32 * alpha + dest as f32 * (1.0 - alpha)) as u8
            };
            let out = Color::new(
                blend(color.r, destination.r),
                blend(color.g, destination.g),
                blend(color.b, destination.b),
                (source_alpha as f32 + destination.a as f32 * (1.0 - alpha)) as u8,
            );
            framebuffer.set(frame_x, frame_y, out);
        }
    }
}
