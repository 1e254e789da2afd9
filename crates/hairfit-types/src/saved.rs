//! Saved analysis types.
//!
//! A saved analysis is a suggestion result the user chose to keep, together
//! with the photo it was produced from. Each suggestion gets a durable id so
//! it can be favorited independently.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::suggestion::RecommendationRecord;

/// A persisted hairstyle suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSuggestion {
    pub id: Uuid,
    #[serde(flatten)]
    pub record: RecommendationRecord,
}

/// A persisted analysis: one photo and the suggestions produced for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAnalysis {
    pub id: Uuid,
    /// Where the source photo lives on the device.
    pub photo_uri: String,
    /// Face-shape label of the result ("Oval", ..., or "Custom").
    pub face_shape: String,
    pub summary: String,
    pub suggestions: Vec<SavedSuggestion>,
    pub created_at: DateTime<Utc>,
}

impl SavedAnalysis {
    /// Build a new analysis with fresh ids; every suggestion starts unfavorited.
    pub fn new(
        photo_uri: impl Into<String>,
        face_shape: impl Into<String>,
        summary: impl Into<String>,
        records: impl IntoIterator<Item = RecommendationRecord>,
    ) -> Self {
        let suggestions = records
            .into_iter()
            .map(|mut record| {
                record.is_favorite = false;
                SavedSuggestion {
                    id: Uuid::now_v7(),
                    record,
                }
            })
            .collect();

        Self {
            id: Uuid::now_v7(),
            photo_uri: photo_uri.into(),
            face_shape: face_shape.into(),
            summary: summary.into(),
            suggestions,
            created_at: Utc::now(),
        }
    }

    /// Suggestions the user marked as favorite.
    pub fn favorites(&self) -> impl Iterator<Item = &SavedSuggestion> {
        self.suggestions.iter().filter(|s| s.record.is_favorite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_assigns_ids_and_clears_favorites() {
        let mut fav = RecommendationRecord::new("Bob", "Short");
        fav.is_favorite = true;
        let analysis = SavedAnalysis::new(
            "file:///photo.jpg",
            "Oval",
            "summary",
            vec![fav, RecommendationRecord::new("Lob", "Long bob")],
        );

        assert_eq!(analysis.suggestions.len(), 2);
        assert_ne!(analysis.suggestions[0].id, analysis.suggestions[1].id);
        assert_eq!(analysis.favorites().count(), 0);
    }

    #[test]
    fn test_saved_suggestion_flattens_record() {
        let suggestion = SavedSuggestion {
            id: Uuid::now_v7(),
            record: RecommendationRecord::new("Pixie", "Very short"),
        };
        let json = serde_json::to_value(&suggestion).unwrap();
        assert_eq!(json["name"], "Pixie");
        assert!(json.get("record").is_none());
    }
}
