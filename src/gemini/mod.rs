pub mod image_client;

use crate::{composer::ComposedPrompt, error::Result, models::GeneratedImage};
use async_trait::async_trait;

pub use image_client::GeminiClient;

/// Boundary to a multimodal model that turns image parts plus one prompt into
/// a single image. Retries, timeouts and rate limits live behind this trait.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, prompt: ComposedPrompt) -> Result<GeneratedImage>;
}
