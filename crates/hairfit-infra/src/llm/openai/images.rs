//! OpenAiImageProvider -- [`ImageProvider`] over `POST /images/generations`.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::{Instrument, field, info_span};

use hairfit_core::image::provider::ImageProvider;
use hairfit_observe::genai_attrs::{OP_IMAGE_GENERATION, PROVIDER_OPENAI};
use hairfit_types::config::ImageProviderConfig;
use hairfit_types::llm::{GeneratedImage, ImageGenerationRequest, LlmError};

use super::types::{ImageRequest, ImageResponse};
use super::{build_client, endpoint, map_send_error, map_status};

/// DALL-E style image generation. Text prompt only; the reference photo in
/// [`ImageGenerationRequest`] is never sent.
pub struct OpenAiImageProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    size: String,
    quality: String,
}

impl OpenAiImageProvider {
    pub fn new(api_key: SecretString, config: &ImageProviderConfig) -> Result<Self, LlmError> {
        Ok(Self {
            client: build_client(Duration::from_secs(config.timeout_secs))?,
            api_key,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            size: config.size.clone(),
            quality: config.quality.clone(),
        })
    }

    fn to_image_request(&self, request: &ImageGenerationRequest) -> ImageRequest {
        ImageRequest {
            model: self.model.clone(),
            prompt: request.prompt.clone(),
            n: 1,
            size: self.size.clone(),
            quality: self.quality.clone(),
            response_format: "url".to_string(),
        }
    }
}

impl ImageProvider for OpenAiImageProvider {
    fn name(&self) -> &str {
        PROVIDER_OPENAI
    }

    async fn generate(&self, request: &ImageGenerationRequest) -> Result<GeneratedImage, LlmError> {
        let body = self.to_image_request(request);
        let url = endpoint(&self.base_url, "images/generations");

        let span = info_span!(
            "gen_ai.image_generation",
            gen_ai.operation.name = OP_IMAGE_GENERATION,
            gen_ai.provider.name = PROVIDER_OPENAI,
            gen_ai.request.model = %body.model,
            image.size = %body.size,
            image.revised = field::Empty,
        );

        async {
            let response = self
                .client
                .post(&url)
                .bearer_auth(self.api_key.expose_secret())
                .json(&body)
                .send()
                .await
                .map_err(map_send_error)?;

            let status = response.status();
            if !status.is_success() {
                let headers = response.headers().clone();
                let error_body = response.text().await.unwrap_or_default();
                return Err(map_status(status, &headers, error_body));
            }

            let parsed: ImageResponse = response.json().await.map_err(|e| {
                LlmError::Deserialization(format!("failed to parse image response: {e}"))
            })?;

            let first = parsed.data.into_iter().next().ok_or_else(|| {
                LlmError::Deserialization("image response contained no data".to_string())
            })?;
            let url = first
                .url
                .filter(|u| !u.trim().is_empty())
                .ok_or_else(|| LlmError::Deserialization("image response had no url".to_string()))?;

            tracing::Span::current().record("image.revised", first.revised_prompt.is_some());

            Ok(GeneratedImage {
                url,
                revised_prompt: first.revised_prompt,
            })
        }
        .instrument(span)
        .await
    }
}
