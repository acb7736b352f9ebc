//! 8-bit RGBA color and the shading terms that modulate it.

use std::ops::Add;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Saturating add on r/g/b; alpha is carried through from the left operand.
impl Add<Color> for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Self::Output {
        Self::new(
            self.r.saturating_add(rhs.r),
            self.g.saturating_add(rhs.g),
            self.b.saturating_add(rhs.b),
            self.a,
        )
    }
}

/// A `(color, intensity)` pair accumulating light contributions before
/// modulation with a texel. Addition is component-wise: colors
/// saturating-add, intensities add as floats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadingTerm {
    pub color: Color,
    pub intensity: f32,
}

impl ShadingTerm {
    pub const fn new(color: Color, intensity: f32) -> Self {
        Self { color, intensity }
    }

    /// Modulates `texel` by this shading term: `out.rgb = term.color.rgb *
    /// texel.rgb * term.intensity / 255`, truncated to 8 bits. `out.a` is
    /// `texel.a` unchanged. Intensities above 1.0 may saturate channels.
    pub fn apply(&self, texel: Color) -> Color {
        let channel = |shading: u8, tex: u8| -> u8 {
            let mixed = shading as f32 * tex as f32 * self.intensity / 255.0;
            mixed.clamp(0.0, 255.0) as u8
        };
        Color::new(
            channel(self.color.r, texel.r),
            channel(self.color.g, texel.g),
            channel(self.color.b, texel.b),
            texel.a,
        )
    }
}

impl Add<ShadingTerm> for ShadingTerm {
    type Output = ShadingTerm;

    fn add(self, rhs: ShadingTerm) -> Self::Output {
        Self::new(self.color + rhs.color, self.intensity + rhs.intensity)
    }
}

/// Linear interpolation between two shading terms, used by the rasterizer
/// when assembling the per-pixel term from barycentric weights.
pub fn lerp_shading_term(a: ShadingTerm, b: ShadingTerm, t: f32) -> ShadingTerm {
    ShadingTerm::new(lerp_color(a.color, b.color, t), a.intensity + (b.intensity - a.intensity) * t)
}

/// Linear interpolation of 8-bit color channels, each rounded independently.
pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let channel = |from: u8, to: u8| -> u8 {
        (from as f32 + (to as f32 - from as f32) * t).round().clamp(0.0, 255.0) as u8
    };
    Color::new(channel(a.r, b.r), channel(a.g, b.g), channel(a.b, b.b), channel(a.a, b.a))
}
