//! Saved-analysis repository trait definition.

use uuid::Uuid;

use hairfit_types::error::RepositoryError;
use hairfit_types::saved::SavedAnalysis;
use hairfit_types::suggestion::SuggestionResult;

/// Repository trait for persisted analyses.
///
/// Implementations live in hairfit-infra (e.g., SqliteSavedAnalysisRepository).
pub trait SavedAnalysisRepository: Send + Sync {
    /// Persist an analysis together with all of its suggestions.
    fn save(
        &self,
        analysis: &SavedAnalysis,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// All saved analyses, newest first.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<SavedAnalysis>, RepositoryError>> + Send;

    /// Get one analysis by id.
    fn get(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<SavedAnalysis>, RepositoryError>> + Send;

    /// Delete an analysis and its suggestions. Missing ids yield `NotFound`.
    fn delete(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Flip the favorite flag of one suggestion and return the new value.
    fn toggle_favorite(
        &self,
        analysis_id: &Uuid,
        suggestion_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}

/// Snapshot a suggestion result for saving.
///
/// Fresh ids are assigned and every suggestion starts unfavorited.
pub fn analysis_from_result(photo_uri: impl Into<String>, result: &SuggestionResult) -> SavedAnalysis {
    SavedAnalysis::new(
        photo_uri,
        result.face_shape.clone(),
        result.summary.clone(),
        result.records.iter().cloned(),
    )
}
