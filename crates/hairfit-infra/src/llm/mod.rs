//! Provider implementations and factories.
//!
//! [`create_text_provider`] and [`create_image_provider`] construct the
//! boxed providers the orchestrator consumes from the loaded configuration
//! and a resolved API key.

pub mod openai;

use secrecy::SecretString;

use hairfit_core::image::box_provider::BoxImageProvider;
use hairfit_core::llm::box_provider::BoxVisionProvider;
use hairfit_types::config::{ImageProviderConfig, TextProviderConfig};
use hairfit_types::llm::LlmError;

use self::openai::chat::OpenAiVisionProvider;
use self::openai::images::OpenAiImageProvider;

/// Create the vision provider that writes recommendation text.
pub fn create_text_provider(
    config: &TextProviderConfig,
    api_key: SecretString,
) -> Result<BoxVisionProvider, LlmError> {
    let provider = OpenAiVisionProvider::new(api_key, config)?;
    tracing::debug!(model = %config.model, base_url = %config.base_url, "created text provider");
    Ok(BoxVisionProvider::new(provider))
}

/// Create the image provider, or `None` when synthesis is disabled.
pub fn create_image_provider(
    config: &ImageProviderConfig,
    api_key: SecretString,
) -> Result<Option<BoxImageProvider>, LlmError> {
    if !config.enabled {
        tracing::debug!("image synthesis disabled by configuration");
        return Ok(None);
    }
    let provider = OpenAiImageProvider::new(api_key, config)?;
    tracing::debug!(model = %config.model, size = %config.size, "created image provider");
    Ok(Some(BoxImageProvider::new(provider)))
}
