//! Rendering error.

use image::ImageError;
use thiserror::Error;

use crate::validation::Validation;


/// Error that may occur during the rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The config didn't pass validation.
    #[error("invalid config: {0}")]
    InvalidConfig(Validation),
    /// The drawing surface cannot be allocated with the requested dimensions.
    #[error("cannot create drawing surface: {0}")]
    Surface(String),
    /// The font cannot be used to draw the text.
    #[error("unusable font `{0}`")]
    Font(String),
    /// The final image couldn't be encoded.
    #[error("failed to encode the final image: {0}")]
    Encode(#[from] ImageError),
}
