//! The hairstyle suggestion pipeline.
//!
//! - `prompt`: text and image prompt construction
//! - `text_client`: one vision-model call per request
//! - `parse`: strategy chain that extracts records from model text
//! - `catalog`: static mock datasets for fallback
//! - `synthesis`: per-record image generation with retry
//! - `orchestrator`: the stage machine tying it all together

pub mod catalog;
pub mod orchestrator;
pub mod parse;
pub mod prompt;
pub mod synthesis;
pub mod text_client;

pub use orchestrator::{AnalysisMode, SuggestionOrchestrator, normalize_count};
