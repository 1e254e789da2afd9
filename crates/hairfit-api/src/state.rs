//! Application state wiring the pipeline and storage together.
//!
//! AppState pins the core orchestrator and repository trait to the concrete
//! infra implementations. Without an API key the orchestrator runs offline
//! and every request is answered from the mock catalog.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use hairfit_core::suggest::SuggestionOrchestrator;
use hairfit_core::suggest::synthesis::{ImageSynthesisClient, RetryPolicy};
use hairfit_core::suggest::text_client::RecommendationTextClient;
use hairfit_infra::config::{load_config, load_config_file, resolve_data_dir, resolve_mock_catalog};
use hairfit_infra::llm::{create_image_provider, create_text_provider};
use hairfit_infra::secret::{EnvSecretProvider, OPENAI_API_KEY};
use hairfit_infra::sqlite::pool::{DatabasePool, default_database_url};
use hairfit_infra::sqlite::saved_analysis::SqliteSavedAnalysisRepository;
use hairfit_types::config::HairfitConfig;

/// Shared application state for CLI commands.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<SuggestionOrchestrator>,
    pub saved_repo: Arc<SqliteSavedAnalysisRepository>,
}

impl AppState {
    /// Load configuration, open the database and build the orchestrator.
    pub async fn init(config_path: Option<&Path>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir)
            .await
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

        let config = match config_path {
            Some(path) => load_config_file(path).await,
            None => load_config(&data_dir).await,
        };

        let db_pool = DatabasePool::new(&default_database_url(&data_dir))
            .await
            .context("failed to open the saved-analysis database")?;
        let saved_repo = SqliteSavedAnalysisRepository::new(db_pool);

        let orchestrator = build_orchestrator(&config, &data_dir).await?;

        Ok(Self {
            orchestrator: Arc::new(orchestrator),
            saved_repo: Arc::new(saved_repo),
        })
    }
}

/// Wire providers from configuration and the environment.
async fn build_orchestrator(
    config: &HairfitConfig,
    data_dir: &Path,
) -> anyhow::Result<SuggestionOrchestrator> {
    let catalog = resolve_mock_catalog(config, data_dir).await;
    let mut orchestrator = SuggestionOrchestrator::new()
        .with_catalog(catalog)
        .with_retry_policy(RetryPolicy::from(&config.synthesis));

    let secrets = EnvSecretProvider::new();
    let Some(text_key) = secrets.get(OPENAI_API_KEY) else {
        tracing::warn!("{OPENAI_API_KEY} is not set, suggestions will come from the mock catalog");
        return Ok(orchestrator);
    };

    let text_provider = create_text_provider(&config.text, text_key)?;
    orchestrator = orchestrator.with_text_client(RecommendationTextClient::new(
        text_provider,
        &config.text,
        config.response_language.clone(),
    ));

    if let Some(image_key) = secrets.get(OPENAI_API_KEY) {
        if let Some(image_provider) = create_image_provider(&config.images, image_key)? {
            orchestrator = orchestrator.with_image_client(ImageSynthesisClient::new(image_provider));
        }
    }

    tracing::info!(
        text_model = %config.text.model,
        images = config.images.enabled,
        "providers configured"
    );
    Ok(orchestrator)
}
