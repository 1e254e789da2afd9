//! Infrastructure layer for HairFit.
//!
//! Concrete implementations behind the traits in `hairfit-core`: the OpenAI
//! vision and image clients, the configuration loader, environment secrets,
//! and SQLite storage for saved analyses.

pub mod config;
pub mod llm;
pub mod secret;
pub mod sqlite;
