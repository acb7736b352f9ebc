//! Ambient and directional light evaluation, producing shading terms.

use crate::color::{Color, ShadingTerm};
use crate::math::Vector;

/// Contributes a constant shading term with no directional factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

impl AmbientLight {
    pub const fn new(color: Color, intensity: f32) -> Self {
        Self { color, intensity }
    }

    pub fn shading_term(&self) -> ShadingTerm {
        ShadingTerm::new(self.color, self.intensity)
    }
}

/// A light whose rays are parallel, as if infinitely distant (e.g. the sun).
/// `direction` points from the light outwards, not towards it, and is unit
/// length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vector,
    pub color: Color,
    pub intensity: f32,
}

impl DirectionalLight {
    pub fn new(direction: Vector, color: Color, intensity: f32) -> Self {
        Self { direction: direction.normalize(), color, intensity }
    }

    /// `max(0, dot(normal, -direction))`. `intensity` is not a factor here —
    /// it only scales the light's GPU shading path, which this crate does
    /// not implement.
    fn calculate_intensity(&self, normal: Vector) -> f32 {
        normal.dot(-self.direction).max(0.0)
    }

    pub fn shading_term(&self, normal: Vector) -> ShadingTerm {
        ShadingTerm::new(self.color, self.calculate_intensity(normal))
    }
}
