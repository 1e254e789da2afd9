//! Image synthesis with bounded retry.
//!
//! [`ImageSynthesisClient`] makes one best-effort call and turns every
//! failure into `None`. [`synthesize_with_retry`] layers the fixed-delay
//! retry, the per-record time budget and cancellation on top.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, info_span};

use hairfit_types::config::SynthesisConfig;
use hairfit_types::llm::ImageGenerationRequest;

use crate::image::box_provider::BoxImageProvider;

/// Static image used when synthesis gives up on the record at `position`.
pub fn fallback_image_url(position: usize) -> String {
    format!("https://i.imgur.com/example{}.jpg", position + 16)
}

/// One-shot image generation that never fails loudly.
pub struct ImageSynthesisClient {
    provider: BoxImageProvider,
}

impl ImageSynthesisClient {
    pub fn new(provider: BoxImageProvider) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Generate one image. Any failure is logged and yields `None`.
    pub async fn generate(&self, prompt: &str, photo: &[u8]) -> Option<String> {
        let reference_image_b64 = (self.provider.accepts_reference_image() && !photo.is_empty())
            .then(|| STANDARD.encode(photo));
        let request = ImageGenerationRequest {
            prompt: prompt.to_string(),
            reference_image_b64,
        };

        match self.provider.generate(&request).await {
            Ok(image) if !image.url.trim().is_empty() => Some(image.url),
            Ok(_) => {
                tracing::warn!(provider = self.provider.name(), "image response had no url");
                None
            }
            Err(e) => {
                tracing::warn!(provider = self.provider.name(), error = %e, "image generation failed");
                None
            }
        }
    }
}

/// Retry settings for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Never below 1.
    pub max_attempts: u32,
    /// Fixed pause between attempts.
    pub delay: Duration,
    /// Wall-clock limit for all attempts and pauses together.
    pub budget: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration, budget: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
            budget,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&SynthesisConfig::default())
    }
}

impl From<&SynthesisConfig> for RetryPolicy {
    fn from(config: &SynthesisConfig) -> Self {
        Self::new(
            config.max_attempts,
            Duration::from_millis(config.retry_delay_ms),
            Duration::from_secs(config.record_budget_secs),
        )
    }
}

/// How synthesis ended for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisOutcome {
    Generated { url: String, attempts: u32 },
    /// Attempts ran out, the budget expired, or the request was cancelled.
    Exhausted { attempts: u32 },
}

impl SynthesisOutcome {
    pub fn attempts(&self) -> u32 {
        match self {
            SynthesisOutcome::Generated { attempts, .. } | SynthesisOutcome::Exhausted { attempts } => {
                *attempts
            }
        }
    }
}

/// Generate an image for one record, retrying per `policy`.
pub async fn synthesize_with_retry(
    client: &ImageSynthesisClient,
    prompt: &str,
    photo: &[u8],
    policy: &RetryPolicy,
    position: usize,
    cancel: &CancellationToken,
) -> SynthesisOutcome {
    let span = info_span!(
        "gen_ai.synthesize",
        gen_ai.system = client.provider_name(),
        position,
        max_attempts = policy.max_attempts,
    );

    async {
        let mut attempts = 0u32;

        let attempt_loop = async {
            loop {
                attempts += 1;
                if let Some(url) = client.generate(prompt, photo).await {
                    return Some(url);
                }
                if attempts >= policy.max_attempts {
                    return None;
                }
                tracing::debug!(attempt = attempts, delay_ms = policy.delay.as_millis() as u64, "retrying image");
                tokio::time::sleep(policy.delay).await;
            }
        };

        let url = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("synthesis cancelled");
                None
            }
            result = tokio::time::timeout(policy.budget, attempt_loop) => match result {
                Ok(url) => url,
                Err(_) => {
                    tracing::warn!(budget_secs = policy.budget.as_secs(), "synthesis budget exceeded");
                    None
                }
            },
        };

        match url {
            Some(url) => SynthesisOutcome::Generated { url, attempts },
            None => SynthesisOutcome::Exhausted { attempts },
        }
    }
    .instrument(span)
    .await
}
