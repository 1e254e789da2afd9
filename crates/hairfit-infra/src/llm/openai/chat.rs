//! OpenAiVisionProvider -- [`VisionLlmProvider`] over the Chat Completions API.
//!
//! Sends `POST {base_url}/chat/completions` with bearer auth. The system
//! prompt becomes a leading `system` message; user messages carrying an
//! image are sent as content-part arrays.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::{Instrument, field, info_span};

use hairfit_core::llm::provider::VisionLlmProvider;
use hairfit_observe::genai_attrs::{
    GEN_AI_RESPONSE_FINISH_REASONS, GEN_AI_RESPONSE_ID, GEN_AI_RESPONSE_MODEL,
    GEN_AI_USAGE_INPUT_TOKENS, GEN_AI_USAGE_OUTPUT_TOKENS, OP_CHAT, PROVIDER_OPENAI,
};
use hairfit_types::config::TextProviderConfig;
use hairfit_types::llm::{
    CompletionRequest, CompletionResponse, ContentPart, LlmError, Message, Usage,
};

use super::types::{ChatContent, ChatMessage, ChatPart, ChatRequest, ChatResponse, ImageUrlRef};
use super::{build_client, endpoint, map_send_error, map_status};

/// OpenAI chat-completions provider with vision input.
///
/// Does not derive Debug; the API key must never reach logs.
pub struct OpenAiVisionProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl OpenAiVisionProvider {
    pub fn new(api_key: SecretString, config: &TextProviderConfig) -> Result<Self, LlmError> {
        Ok(Self {
            client: build_client(Duration::from_secs(config.timeout_secs))?,
            api_key,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
        })
    }

    /// Convert a generic [`CompletionRequest`] into the wire format.
    fn to_chat_request(&self, request: &CompletionRequest) -> ChatRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(system) = &request.system {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: ChatContent::Text(system.clone()),
            });
        }
        messages.extend(request.messages.iter().map(to_chat_message));

        ChatRequest {
            model: if request.model.is_empty() {
                self.model.clone()
            } else {
                request.model.clone()
            },
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

fn to_chat_message(message: &Message) -> ChatMessage {
    let content = if message.has_image() {
        ChatContent::Parts(
            message
                .content
                .iter()
                .map(|part| match part {
                    ContentPart::Text { text } => ChatPart::Text { text: text.clone() },
                    ContentPart::ImageUrl { url } => ChatPart::ImageUrl {
                        image_url: ImageUrlRef { url: url.clone() },
                    },
                })
                .collect(),
        )
    } else {
        ChatContent::Text(message.text_content())
    };

    ChatMessage {
        role: message.role.to_string(),
        content,
    }
}

impl VisionLlmProvider for OpenAiVisionProvider {
    fn name(&self) -> &str {
        PROVIDER_OPENAI
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = self.to_chat_request(request);
        let url = endpoint(&self.base_url, "chat/completions");

        let span = info_span!(
            "gen_ai.chat",
            gen_ai.operation.name = OP_CHAT,
            gen_ai.provider.name = PROVIDER_OPENAI,
            gen_ai.request.model = %body.model,
            gen_ai.request.max_tokens = body.max_tokens,
            gen_ai.response.id = field::Empty,
            gen_ai.response.model = field::Empty,
            gen_ai.response.finish_reasons = field::Empty,
            gen_ai.usage.input_tokens = field::Empty,
            gen_ai.usage.output_tokens = field::Empty,
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

            let chat: ChatResponse = response.json().await.map_err(|e| {
                LlmError::Deserialization(format!("failed to parse response: {e}"))
            })?;

            let span = tracing::Span::current();
            span.record(GEN_AI_RESPONSE_ID, chat.id.as_str());
            span.record(GEN_AI_RESPONSE_MODEL, chat.model.as_str());

            let usage = chat
                .usage
                .as_ref()
                .map(|u| Usage {
                    input_tokens: u.prompt_tokens,
                    output_tokens: u.completion_tokens,
                })
                .unwrap_or_default();
            span.record(GEN_AI_USAGE_INPUT_TOKENS, usage.input_tokens);
            span.record(GEN_AI_USAGE_OUTPUT_TOKENS, usage.output_tokens);

            let first = chat.choices.into_iter().next();
            if let Some(reason) = first.as_ref().and_then(|c| c.finish_reason.as_deref()) {
                span.record(GEN_AI_RESPONSE_FINISH_REASONS, reason);
            }
            let content = first.and_then(|c| c.message.content).unwrap_or_default();

            Ok(CompletionResponse {
                id: chat.id,
                content,
                model: chat.model,
                usage,
            })
        }
        .instrument(span)
        .await
    }
}
