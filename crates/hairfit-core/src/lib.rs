//! Suggestion pipeline and port definitions for HairFit.
//!
//! This crate defines the "ports" (provider and repository traits) that the
//! infrastructure layer implements, plus the pure pipeline logic: prompt
//! construction, response parsing, the mock catalog, and the orchestrator
//! that fans out image synthesis. It depends only on `hairfit-types` --
//! never on `hairfit-infra` or any HTTP/database crate.

pub mod classify;
pub mod image;
pub mod llm;
pub mod storage;
pub mod suggest;
