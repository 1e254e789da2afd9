//! BoxVisionProvider -- object-safe dynamic dispatch wrapper for VisionLlmProvider.
//!
//! 1. Define an object-safe `VisionLlmProviderDyn` trait with boxed futures
//! 2. Blanket-impl `VisionLlmProviderDyn` for all `T: VisionLlmProvider`
//! 3. `BoxVisionProvider` wraps `Box<dyn VisionLlmProviderDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use hairfit_types::llm::{CompletionRequest, CompletionResponse, LlmError};

use super::provider::VisionLlmProvider;

/// Object-safe version of [`VisionLlmProvider`] with boxed futures.
pub trait VisionLlmProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn model(&self) -> &str;

    fn complete_boxed<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CompletionResponse, LlmError>> + Send + 'a>>;
}

impl<T: VisionLlmProvider> VisionLlmProviderDyn for T {
    fn name(&self) -> &str {
        VisionLlmProvider::name(self)
    }

    fn model(&self) -> &str {
        VisionLlmProvider::model(self)
    }

    fn complete_boxed<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CompletionResponse, LlmError>> + Send + 'a>> {
        Box::pin(self.complete(request))
    }
}

/// Type-erased vision provider for runtime provider selection.
///
/// Since `VisionLlmProvider` uses RPITIT, it cannot be used as a trait object
/// directly; this wrapper provides equivalent methods that delegate to the
/// inner `VisionLlmProviderDyn` trait object.
pub struct BoxVisionProvider {
    inner: Box<dyn VisionLlmProviderDyn + Send + Sync>,
}

impl BoxVisionProvider {
    /// Wrap a concrete `VisionLlmProvider` in a type-erased box.
    pub fn new<T: VisionLlmProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }

    /// Human-readable provider name.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Default model identifier.
    pub fn model(&self) -> &str {
        self.inner.model()
    }

    /// Send a completion request and receive the full response.
    pub async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, LlmError> {
        self.inner.complete_boxed(request).await
    }
}
