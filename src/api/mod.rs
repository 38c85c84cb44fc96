pub mod client;
pub mod error;
pub mod types;

pub use client::{GeminiClient, GeminiConfig};
pub use error::{ApiError, GenerationError};

use crate::image::ImageAttachment;

/// Narrow seam in front of the hosted model: one prompt and one image in,
/// free text out. The report flow only talks to this trait, so tests swap
/// in a fake without touching the network.
pub trait GenerationService {
    async fn generate(
        &self,
        prompt: &str,
        image: &ImageAttachment,
    ) -> Result<String, GenerationError>;
}
