//! A fragment's shading inputs: a single diffuse sampler.

use std::sync::Arc;

use crate::color::Color;
use crate::sampler::{Sampler, TextureCoordinate};

/// Owns one [`Sampler`] used as the diffuse map. Materials are immutable
/// during rendering and may be shared by multiple fragments or models, so
/// the sampler is held behind an `Arc` rather than owned uniquely — the same
/// sharing the original renderer expressed with `shared_ptr<ColorSampler>`.
#[derive(Clone)]
pub struct Material {
    diffuse: Arc<dyn Sampler + Send + Sync>,
}

impl Material {
    pub fn new(diffuse: Arc<dyn Sampler + Send + Sync>) -> Self {
        Self { diffuse }
    }

    pub fn solid(color: Color) -> Self {
        Self::new(Arc::new(crate::sampler::Solid::new(color)))
    }

    pub fn sample(&self, uv: TextureCoordinate) -> Color {
        self.diffuse.sample(uv)
    }
}
