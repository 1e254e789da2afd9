//! Configuration loader for HairFit.
//!
//! Reads `config.toml` from the data directory (`~/.hairfit/` in production)
//! and deserializes it into [`HairfitConfig`]. Falls back to defaults when
//! the file is missing or malformed. Also resolves the optional mock catalog
//! file named in the configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use hairfit_core::suggest::catalog::MockCatalog;
use hairfit_types::config::HairfitConfig;
use hairfit_types::error::ConfigError;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "HAIRFIT_DATA_DIR";

/// Resolve the data directory: `HAIRFIT_DATA_DIR`, else `~/.hairfit`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".hairfit")
}

/// Read and parse a config file, reporting every failure.
pub async fn read_config(path: &Path) -> Result<HairfitConfig, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    toml::from_str::<HairfitConfig>(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - Missing file: [`HairfitConfig::default()`].
/// - Unreadable or malformed file: logs a warning and returns the default.
pub async fn load_config(data_dir: &Path) -> HairfitConfig {
    load_config_file(&data_dir.join("config.toml")).await
}

/// Load configuration from an explicit path with the same fallbacks as
/// [`load_config`].
pub async fn load_config_file(path: &Path) -> HairfitConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", path.display());
            return HairfitConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return HairfitConfig::default();
        }
    };

    match toml::from_str::<HairfitConfig>(&content) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), "loaded configuration");
            config
        }
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            HairfitConfig::default()
        }
    }
}

/// Load a replacement mock catalog from a TOML file.
pub async fn load_mock_catalog(path: &Path) -> Result<MockCatalog, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
    MockCatalog::from_toml_str(&content)
}

/// The catalog the orchestrator should use.
///
/// Relative `mock_catalog_path` values resolve against `data_dir`. Any load
/// failure keeps the built-in catalog.
pub async fn resolve_mock_catalog(config: &HairfitConfig, data_dir: &Path) -> Arc<MockCatalog> {
    let Some(configured) = &config.mock_catalog_path else {
        return MockCatalog::builtin();
    };

    let path = if configured.is_absolute() {
        configured.clone()
    } else {
        data_dir.join(configured)
    };

    match load_mock_catalog(&path).await {
        Ok(catalog) => {
            tracing::info!(path = %path.display(), "using custom mock catalog");
            Arc::new(catalog)
        }
        Err(err) => {
            tracing::warn!("{err}, using built-in mock catalog");
            MockCatalog::builtin()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use hairfit_types::config::ResponseLanguage;
    use hairfit_types::face::FaceShape;
    use tempfile::TempDir;

    fn catalog_toml() -> String {
        let mut out = String::new();
        let section = |out: &mut String, table: &str, tag: &str| {
            out.push_str(&format!("[{table}]\nsummary = \"{tag} summary\"\n"));
            for i in 1..=5 {
                out.push_str(&format!(
                    "[[{table}.records]]\nname = \"{tag} style {i}\"\ndescription = \"d\"\nimage_url = \"https://img.example/{tag}{i}.jpg\"\n"
                ));
            }
        };
        section(&mut out, "direct", "direct");
        for shape in FaceShape::ALL {
            section(&mut out, &format!("shapes.{}", shape.as_str()), shape.as_str());
        }
        out
    }

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config.synthesis.max_attempts, 2);
        assert_eq!(config.response_language, ResponseLanguage::Mongolian);
        assert!(config.images.enabled);
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
response_language = "english"

[text]
model = "gpt-4o-mini"

[images]
enabled = false

[synthesis]
retry_delay_ms = 250
"#,
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.response_language, ResponseLanguage::English);
        assert_eq!(config.text.model, "gpt-4o-mini");
        assert_eq!(config.text.max_tokens_direct, 1500);
        assert!(!config.images.enabled);
        assert_eq!(config.synthesis.retry_delay_ms, 250);
        assert_eq!(config.synthesis.record_budget_secs, 120);
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.text.model, "gpt-4o");
    }

    #[tokio::test]
    async fn read_config_reports_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.toml");
        tokio::fs::write(&path, "[synthesis]\nmax_attempts = \"two\"").await.unwrap();

        let err = read_config(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[tokio::test]
    async fn resolve_mock_catalog_without_path_is_builtin() {
        let tmp = TempDir::new().unwrap();
        let catalog = resolve_mock_catalog(&HairfitConfig::default(), tmp.path()).await;
        assert!(Arc::ptr_eq(&catalog, &MockCatalog::builtin()));
    }

    #[tokio::test]
    async fn resolve_mock_catalog_loads_relative_path() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("catalog.toml"), catalog_toml())
            .await
            .unwrap();
        let config = HairfitConfig {
            mock_catalog_path: Some(PathBuf::from("catalog.toml")),
            ..HairfitConfig::default()
        };

        let catalog = resolve_mock_catalog(&config, tmp.path()).await;
        assert_eq!(catalog.direct().summary, "direct summary");
        assert_eq!(catalog.for_shape(FaceShape::Heart).records[0].name, "heart style 1");
    }

    #[tokio::test]
    async fn resolve_mock_catalog_bad_file_falls_back() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("catalog.toml"), "[direct]\nsummary = \"only\"")
            .await
            .unwrap();
        let config = HairfitConfig {
            mock_catalog_path: Some(tmp.path().join("catalog.toml")),
            ..HairfitConfig::default()
        };

        let catalog = resolve_mock_catalog(&config, tmp.path()).await;
        assert!(Arc::ptr_eq(&catalog, &MockCatalog::builtin()));
    }

    #[test]
    fn resolve_data_dir_ends_with_hairfit_or_env() {
        let dir = resolve_data_dir();
        match std::env::var(DATA_DIR_ENV) {
            Ok(env) if !env.trim().is_empty() => assert_eq!(dir, PathBuf::from(env)),
            _ => assert!(dir.ends_with(".hairfit")),
        }
    }
}
