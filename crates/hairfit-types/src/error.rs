use thiserror::Error;

use crate::llm::LlmError;

/// Failures inside the suggestion pipeline.
///
/// None of these ever reach the caller of the suggestion entry points: each
/// one has a defined fallback (mock dataset or placeholder image).
#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("upstream returned an empty response")]
    EmptyResponse,

    #[error("no recommendation could be extracted from the response")]
    ParseFailure,

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<LlmError> for SuggestionError {
    fn from(err: LlmError) -> Self {
        SuggestionError::UpstreamUnavailable(err.to_string())
    }
}

/// Errors from repository operations (used by trait definitions in hairfit-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors loading configuration or the mock catalog.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_error_maps_to_upstream_unavailable() {
        let err: SuggestionError = LlmError::AuthenticationFailed.into();
        match err {
            SuggestionError::UpstreamUnavailable(msg) => {
                assert_eq!(msg, "authentication failed");
            }
            other => panic!("expected UpstreamUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_suggestion_error_display() {
        assert_eq!(
            SuggestionError::EmptyResponse.to_string(),
            "upstream returned an empty response"
        );
        assert_eq!(
            SuggestionError::InvalidInput("empty photo".to_string()).to_string(),
            "invalid input: empty photo"
        );
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Parse {
            path: "/tmp/config.toml".to_string(),
            message: "expected `=`".to_string(),
        };
        assert!(err.to_string().contains("/tmp/config.toml"));
    }
}
