//! Recommendation text client.
//!
//! Wraps a vision provider and issues exactly one completion per call.
//! Failures are mapped into [`SuggestionError`] and never retried here.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{Instrument, info_span};

use hairfit_types::config::{ResponseLanguage, TextProviderConfig};
use hairfit_types::error::SuggestionError;
use hairfit_types::face::{Classification, FaceShape};
use hairfit_types::llm::{CompletionRequest, ContentPart, Message, MessageRole};

use super::prompt::PromptBuilder;
use crate::llm::box_provider::BoxVisionProvider;

/// Asks a vision model for hairstyle recommendations for one photo.
pub struct RecommendationTextClient {
    provider: BoxVisionProvider,
    model: String,
    max_tokens_guided: u32,
    max_tokens_direct: u32,
    language: ResponseLanguage,
}

impl RecommendationTextClient {
    pub fn new(
        provider: BoxVisionProvider,
        config: &TextProviderConfig,
        language: ResponseLanguage,
    ) -> Self {
        Self {
            provider,
            model: config.model.clone(),
            max_tokens_guided: config.max_tokens_guided,
            max_tokens_direct: config.max_tokens_direct,
            language,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Build the completion request for a photo.
    ///
    /// `shape` is `None` in direct mode.
    pub fn build_request(&self, photo: &[u8], shape: Option<FaceShape>) -> CompletionRequest {
        let image_url = format!("data:image/jpeg;base64,{}", STANDARD.encode(photo));
        let max_tokens = match shape {
            Some(_) => self.max_tokens_guided,
            None => self.max_tokens_direct,
        };
        let model = if self.model.is_empty() {
            self.provider.model().to_string()
        } else {
            self.model.clone()
        };

        CompletionRequest {
            model,
            messages: vec![Message {
                role: MessageRole::User,
                content: vec![
                    ContentPart::Text {
                        text: PromptBuilder::user(shape, &self.language),
                    },
                    ContentPart::ImageUrl { url: image_url },
                ],
            }],
            system: Some(PromptBuilder::system(shape, &self.language)),
            max_tokens,
            temperature: None,
        }
    }

    /// Request recommendations and return the model's raw text.
    pub async fn generate(
        &self,
        photo: &[u8],
        classification: Option<&Classification>,
    ) -> Result<String, SuggestionError> {
        if photo.is_empty() {
            return Err(SuggestionError::InvalidInput("photo is empty".to_string()));
        }

        let shape = classification.map(|c| c.face_shape);
        let request = self.build_request(photo, shape);

        let span = info_span!(
            "gen_ai.recommend",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            face_shape = ?shape,
        );

        let response = self.provider.complete(&request).instrument(span).await?;

        let content = response.content.trim();
        if content.is_empty() {
            return Err(SuggestionError::EmptyResponse);
        }

        tracing::debug!(
            response_id = %response.id,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            chars = content.len(),
            "received recommendation text"
        );
        Ok(content.to_string())
    }
}
