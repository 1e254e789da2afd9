//! ImageProvider trait definition.

use hairfit_types::llm::{GeneratedImage, ImageGenerationRequest, LlmError};

/// Trait for text-to-image backends.
///
/// One call produces at most one image. Retries are the caller's business.
pub trait ImageProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Whether the backend makes use of `reference_image_b64`.
    ///
    /// Providers that return `false` receive requests with the reference
    /// image stripped.
    fn accepts_reference_image(&self) -> bool {
        false
    }

    /// Generate a single image for the request.
    fn generate(
        &self,
        request: &ImageGenerationRequest,
    ) -> impl std::future::Future<Output = Result<GeneratedImage, LlmError>> + Send;
}
