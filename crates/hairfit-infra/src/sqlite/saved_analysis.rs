//! SQLite saved-analysis repository implementation.
//!
//! Implements `SavedAnalysisRepository` from `hairfit-core` using sqlx with
//! split read/write pools. An analysis and its suggestions are written in one
//! transaction; suggestions keep their display order through `position`.

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::Row;
use uuid::Uuid;

use hairfit_core::storage::saved_store::SavedAnalysisRepository;
use hairfit_types::error::RepositoryError;
use hairfit_types::saved::{SavedAnalysis, SavedSuggestion};
use hairfit_types::suggestion::RecommendationRecord;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `SavedAnalysisRepository`.
pub struct SqliteSavedAnalysisRepository {
    pool: DatabasePool,
}

impl SqliteSavedAnalysisRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    async fn suggestions_for(
        &self,
        analysis_id: &str,
    ) -> Result<Vec<SavedSuggestion>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM saved_suggestions WHERE analysis_id = ? ORDER BY position ASC",
        )
        .bind(analysis_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                SuggestionRow::from_row(row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?
                    .into_suggestion()
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct AnalysisRow {
    id: String,
    photo_uri: String,
    face_shape: String,
    summary: String,
    created_at: String,
}

impl AnalysisRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            photo_uri: row.try_get("photo_uri")?,
            face_shape: row.try_get("face_shape")?,
            summary: row.try_get("summary")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_analysis(self, suggestions: Vec<SavedSuggestion>) -> Result<SavedAnalysis, RepositoryError> {
        Ok(SavedAnalysis {
            id: parse_uuid(&self.id)?,
            photo_uri: self.photo_uri,
            face_shape: self.face_shape,
            summary: self.summary,
            suggestions,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

struct SuggestionRow {
    id: String,
    analysis_id: String,
    name: String,
    description: String,
    image_url: Option<String>,
    is_ai_generated: i64,
    is_favorite: i64,
}

impl SuggestionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            analysis_id: row.try_get("analysis_id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            image_url: row.try_get("image_url")?,
            is_ai_generated: row.try_get("is_ai_generated")?,
            is_favorite: row.try_get("is_favorite")?,
        })
    }

    fn into_suggestion(self) -> Result<SavedSuggestion, RepositoryError> {
        Ok(SavedSuggestion {
            id: parse_uuid(&self.id)?,
            record: RecommendationRecord {
                name: self.name,
                description: self.description,
                image_url: self.image_url,
                is_ai_generated: self.is_ai_generated != 0,
                is_favorite: self.is_favorite != 0,
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_uuid(s: &str) -> Result<Uuid, RepositoryError> {
    Uuid::parse_str(s).map_err(|e| RepositoryError::Query(format!("invalid uuid: {e}")))
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

/// Fixed-width RFC 3339 so text ordering matches time ordering.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

// ---------------------------------------------------------------------------
// SavedAnalysisRepository implementation
// ---------------------------------------------------------------------------

impl SavedAnalysisRepository for SqliteSavedAnalysisRepository {
    async fn save(&self, analysis: &SavedAnalysis) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query(
            "INSERT INTO saved_analyses (id, photo_uri, face_shape, summary, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(analysis.id.to_string())
        .bind(&analysis.photo_uri)
        .bind(&analysis.face_shape)
        .bind(&analysis.summary)
        .bind(format_datetime(&analysis.created_at))
        .execute(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.message().contains("UNIQUE") => {
                RepositoryError::Conflict(format!("analysis {} already exists", analysis.id))
            }
            e => RepositoryError::Query(e.to_string()),
        })?;

        for (position, suggestion) in analysis.suggestions.iter().enumerate() {
            let record = &suggestion.record;
            sqlx::query(
                "INSERT INTO saved_suggestions
                 (id, analysis_id, position, name, description, image_url, is_ai_generated, is_favorite)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(suggestion.id.to_string())
            .bind(analysis.id.to_string())
            .bind(position as i64)
            .bind(&record.name)
            .bind(&record.description)
            .bind(&record.image_url)
            .bind(record.is_ai_generated as i64)
            .bind(record.is_favorite as i64)
            .execute(&mut *tx)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.message().contains("UNIQUE") => {
                    RepositoryError::Conflict(format!("suggestion {} already exists", suggestion.id))
                }
                e => RepositoryError::Query(e.to_string()),
            })?;
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        tracing::debug!(
            analysis_id = %analysis.id,
            suggestions = analysis.suggestions.len(),
            "saved analysis"
        );
        Ok(())
    }

    async fn list(&self) -> Result<Vec<SavedAnalysis>, RepositoryError> {
        let analysis_rows =
            sqlx::query("SELECT * FROM saved_analyses ORDER BY created_at DESC, id DESC")
                .fetch_all(&self.pool.reader)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let suggestion_rows =
            sqlx::query("SELECT * FROM saved_suggestions ORDER BY analysis_id, position ASC")
                .fetch_all(&self.pool.reader)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut grouped: HashMap<String, Vec<SavedSuggestion>> = HashMap::new();
        for row in &suggestion_rows {
            let row = SuggestionRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            let analysis_id = row.analysis_id.clone();
            grouped
                .entry(analysis_id)
                .or_default()
                .push(row.into_suggestion()?);
        }

        analysis_rows
            .iter()
            .map(|row| {
                let row =
                    AnalysisRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                let suggestions = grouped.remove(&row.id).unwrap_or_default();
                row.into_analysis(suggestions)
            })
            .collect()
    }

    async fn get(&self, id: &Uuid) -> Result<Option<SavedAnalysis>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM saved_analyses WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let row = AnalysisRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
        let suggestions = self.suggestions_for(&row.id).await?;
        row.into_analysis(suggestions).map(Some)
    }

    async fn delete(&self, id: &Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM saved_analyses WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        tracing::debug!(analysis_id = %id, "deleted analysis");
        Ok(())
    }

    async fn toggle_favorite(
        &self,
        analysis_id: &Uuid,
        suggestion_id: &Uuid,
    ) -> Result<bool, RepositoryError> {
        let row = sqlx::query(
            "UPDATE saved_suggestions SET is_favorite = 1 - is_favorite
             WHERE id = ? AND analysis_id = ?
             RETURNING is_favorite",
        )
        .bind(suggestion_id.to_string())
        .bind(analysis_id.to_string())
        .fetch_optional(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let row = row.ok_or(RepositoryError::NotFound)?;
        let is_favorite: i64 = row
            .try_get("is_favorite")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(is_favorite != 0)
    }
}
