//! OpenAI provider implementations.
//!
//! - [`chat::OpenAiVisionProvider`]: chat completions with inline photos
//! - [`images::OpenAiImageProvider`]: DALL-E image generation
//!
//! Both talk to the HTTP API directly with `reqwest` and share the status
//! mapping below. API keys are held as [`secrecy::SecretString`] and only
//! exposed when building the `Authorization` header.

pub mod chat;
pub mod images;
pub mod types;

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};

use hairfit_types::llm::LlmError;

/// Build an HTTP client with the given request timeout.
pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::Provider {
            message: format!("failed to create HTTP client: {e}"),
        })
}

/// Map a transport-level failure.
pub(crate) fn map_send_error(err: reqwest::Error) -> LlmError {
    if err.is_timeout() {
        LlmError::Timeout
    } else {
        LlmError::Provider {
            message: format!("HTTP request failed: {err}"),
        }
    }
}

/// Map a non-success HTTP status to an [`LlmError`].
pub(crate) fn map_status(status: StatusCode, headers: &HeaderMap, body: String) -> LlmError {
    match status.as_u16() {
        400 => LlmError::InvalidRequest(body),
        401 | 403 => LlmError::AuthenticationFailed,
        429 => LlmError::RateLimited {
            retry_after_ms: retry_after_ms(headers),
        },
        503 | 529 => LlmError::Overloaded(body),
        _ => LlmError::Provider {
            message: format!("HTTP {status}: {body}"),
        },
    }
}

/// `Retry-After` in seconds, converted to milliseconds.
fn retry_after_ms(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(|secs| secs * 1000)
}

/// Join a base URL and an endpoint path without doubling the slash.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}
