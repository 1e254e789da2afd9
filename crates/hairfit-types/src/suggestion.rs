//! Hairstyle recommendation records and the assembled suggestion result.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::face::{Classification, Gender};

/// Number of recommendations every [`SuggestionResult`] carries.
pub const RECOMMENDATION_COUNT: usize = 5;

/// Face-shape label used for direct-mode results, where no upfront
/// classification was supplied.
pub const CUSTOM_FACE_SHAPE: &str = "Custom";

/// One named, described hairstyle suggestion, optionally paired with a
/// reference image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_ai_generated: bool,
    /// Only ever changed by the persistence layer.
    #[serde(default)]
    pub is_favorite: bool,
}

impl RecommendationRecord {
    /// A record with a name and description but no image yet.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            image_url: None,
            is_ai_generated: false,
            is_favorite: false,
        }
    }

    /// Attach a static image that was not produced by the image model.
    pub fn with_static_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self.is_ai_generated = false;
        self
    }

    /// Whether both the name and description carry text.
    pub fn is_well_formed(&self) -> bool {
        !self.name.trim().is_empty() && !self.description.trim().is_empty()
    }
}

/// Where the records of a [`SuggestionResult`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionOrigin {
    /// Parsed from a live language-model answer.
    Live,
    /// Taken from the static mock catalog after an upstream failure.
    MockFallback,
}

impl fmt::Display for SuggestionOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuggestionOrigin::Live => write!(f, "live"),
            SuggestionOrigin::MockFallback => write!(f, "mock_fallback"),
        }
    }
}

/// The terminal artifact of one suggestion request. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionResult {
    /// `None` in direct mode.
    pub classification: Option<Classification>,
    /// Display label: the capitalized face shape, or [`CUSTOM_FACE_SHAPE`].
    pub face_shape: String,
    pub summary: String,
    /// Full model answer, when one was received and parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
    /// Always exactly [`RECOMMENDATION_COUNT`] records.
    pub records: Vec<RecommendationRecord>,
    pub gender: Gender,
    pub origin: SuggestionOrigin,
}

impl SuggestionResult {
    /// Number of records whose image came from the image model.
    pub fn ai_generated_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_ai_generated).count()
    }

    /// Check the structural contract: five well-formed records, each with an
    /// image URL, and a non-empty summary.
    pub fn is_structurally_valid(&self) -> bool {
        self.records.len() == RECOMMENDATION_COUNT
            && !self.summary.trim().is_empty()
            && self
                .records
                .iter()
                .all(|r| r.is_well_formed() && r.image_url.is_some())
    }
}
