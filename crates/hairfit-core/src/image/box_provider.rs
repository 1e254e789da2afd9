//! BoxImageProvider -- object-safe wrapper for ImageProvider.
//!
//! Same pattern as [`crate::llm::box_provider`]: a blanket-implemented
//! `ImageProviderDyn` with boxed futures behind a concrete wrapper type.

use std::future::Future;
use std::pin::Pin;

use hairfit_types::llm::{GeneratedImage, ImageGenerationRequest, LlmError};

use super::provider::ImageProvider;

/// Object-safe version of [`ImageProvider`] with boxed futures.
pub trait ImageProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn accepts_reference_image(&self) -> bool;

    fn generate_boxed<'a>(
        &'a self,
        request: &'a ImageGenerationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<GeneratedImage, LlmError>> + Send + 'a>>;
}

impl<T: ImageProvider> ImageProviderDyn for T {
    fn name(&self) -> &str {
        ImageProvider::name(self)
    }

    fn accepts_reference_image(&self) -> bool {
        ImageProvider::accepts_reference_image(self)
    }

    fn generate_boxed<'a>(
        &'a self,
        request: &'a ImageGenerationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<GeneratedImage, LlmError>> + Send + 'a>> {
        Box::pin(self.generate(request))
    }
}

/// Type-erased image provider for runtime provider selection.
pub struct BoxImageProvider {
    inner: Box<dyn ImageProviderDyn + Send + Sync>,
}

impl BoxImageProvider {
    /// Wrap a concrete `ImageProvider` in a type-erased box.
    pub fn new<T: ImageProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn accepts_reference_image(&self) -> bool {
        self.inner.accepts_reference_image()
    }

    /// Generate a single image for the request.
    pub async fn generate(
        &self,
        request: &ImageGenerationRequest,
    ) -> Result<GeneratedImage, LlmError> {
        self.inner.generate_boxed(request).await
    }
}
