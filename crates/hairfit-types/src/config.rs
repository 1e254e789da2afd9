//! Global configuration types for HairFit.
//!
//! `HairfitConfig` represents the top-level `config.toml` that controls the
//! two provider endpoints, the image synthesis retry policy, and the response
//! language. Every field has a default so an empty file is valid.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from `~/.hairfit/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HairfitConfig {
    #[serde(default)]
    pub text: TextProviderConfig,

    #[serde(default)]
    pub images: ImageProviderConfig,

    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// Language the stylist answers in.
    #[serde(default = "default_response_language")]
    pub response_language: ResponseLanguage,

    /// Optional TOML file replacing the built-in mock catalog.
    #[serde(default)]
    pub mock_catalog_path: Option<PathBuf>,
}

/// The language model that writes the recommendations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_text_model")]
    pub model: String,
    /// Token cap for classification-guided requests.
    #[serde(default = "default_max_tokens_guided")]
    pub max_tokens_guided: u32,
    /// Token cap for direct-mode requests.
    #[serde(default = "default_max_tokens_direct")]
    pub max_tokens_direct: u32,
    #[serde(default = "default_text_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TextProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_text_model(),
            max_tokens_guided: default_max_tokens_guided(),
            max_tokens_direct: default_max_tokens_direct(),
            timeout_secs: default_text_timeout_secs(),
        }
    }
}

/// The image model that renders reference portraits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageProviderConfig {
    /// When false, every record gets its placeholder image without a call.
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_image_model")]
    pub model: String,
    #[serde(default = "default_image_size")]
    pub size: String,
    #[serde(default = "default_image_quality")]
    pub quality: String,
    #[serde(default = "default_image_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ImageProviderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_base_url(),
            model: default_image_model(),
            size: default_image_size(),
            quality: default_image_quality(),
            timeout_secs: default_image_timeout_secs(),
        }
    }
}

/// Retry policy for per-record image synthesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Total attempts per record, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Fixed pause between attempts.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Upper bound on all attempts plus delays for one record.
    #[serde(default = "default_record_budget_secs")]
    pub record_budget_secs: u64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            record_budget_secs: default_record_budget_secs(),
        }
    }
}

/// Language the recommendations are written in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseLanguage {
    Mongolian,
    English,
}

impl ResponseLanguage {
    /// Name of the language as it appears in prompt instructions.
    pub fn name(&self) -> &'static str {
        match self {
            ResponseLanguage::Mongolian => "Mongolian",
            ResponseLanguage::English => "English",
        }
    }
}

impl Default for ResponseLanguage {
    fn default() -> Self {
        default_response_language()
    }
}

fn default_response_language() -> ResponseLanguage {
    ResponseLanguage::Mongolian
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_text_model() -> String {
    "gpt-4o".to_string()
}

fn default_max_tokens_guided() -> u32 {
    1000
}

fn default_max_tokens_direct() -> u32 {
    1500
}

fn default_text_timeout_secs() -> u64 {
    120
}

fn default_true() -> bool {
    true
}

fn default_image_model() -> String {
    "dall-e-3".to_string()
}

fn default_image_size() -> String {
    "1024x1024".to_string()
}

fn default_image_quality() -> String {
    "standard".to_string()
}

fn default_image_timeout_secs() -> u64 {
    90
}

fn default_max_attempts() -> u32 {
    2
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_record_budget_secs() -> u64 {
    120
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_values() {
        let config = HairfitConfig::default();
        assert_eq!(config.text.model, "gpt-4o");
        assert_eq!(config.text.max_tokens_guided, 1000);
        assert_eq!(config.text.max_tokens_direct, 1500);
        assert!(config.images.enabled);
        assert_eq!(config.images.model, "dall-e-3");
        assert_eq!(config.synthesis.max_attempts, 2);
        assert_eq!(config.synthesis.retry_delay_ms, 1000);
        assert_eq!(config.response_language, ResponseLanguage::Mongolian);
        assert!(config.mock_catalog_path.is_none());
    }

    #[test]
    fn test_config_deserialize_empty() {
        let config: HairfitConfig = toml::from_str("").unwrap();
        assert_eq!(config.images.size, "1024x1024");
        assert_eq!(config.synthesis.record_budget_secs, 120);
    }

    #[test]
    fn test_config_deserialize_partial_sections() {
        let toml_str = r#"
response_language = "english"

[text]
model = "gpt-4o-mini"

[images]
enabled = false

[synthesis]
retry_delay_ms = 250
"#;
        let config: HairfitConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.response_language, ResponseLanguage::English);
        assert_eq!(config.text.model, "gpt-4o-mini");
        assert_eq!(config.text.base_url, "https://api.openai.com/v1");
        assert!(!config.images.enabled);
        assert_eq!(config.images.quality, "standard");
        assert_eq!(config.synthesis.retry_delay_ms, 250);
        assert_eq!(config.synthesis.max_attempts, 2);
    }
}
