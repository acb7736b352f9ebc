//! Boundary failures. Core rendering functions never return a `Result` —
//! rendering either completes or is a precondition violation (see the
//! module-level docs on [`crate::render::render`]). Only the bitmap-sampler
//! construction boundary is fallible.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to decode bitmap: {0}")]
    BitmapDecode(#[from] image::ImageError),
    #[error("decoded image is {actual} bytes, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("pixel buffer is empty")]
    EmptyPixelBuffer,
}
