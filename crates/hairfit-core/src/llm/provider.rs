//! VisionLlmProvider trait definition.
//!
//! This is the abstraction the recommendation text client talks to. Uses
//! RPITIT for `complete`; `BoxVisionProvider` erases the concrete type.

use hairfit_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for chat-completion backends that accept inline images.
///
/// Implementations live in hairfit-infra (e.g., `OpenAiVisionProvider`).
pub trait VisionLlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Default model identifier used when a request leaves `model` empty.
    fn model(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
