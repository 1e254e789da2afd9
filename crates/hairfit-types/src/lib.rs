//! Shared domain types for HairFit.
//!
//! This crate contains the core domain types used across the HairFit
//! workspace: face-shape classifications, hairstyle recommendation records,
//! suggestion results, provider request/response shapes, saved analyses,
//! configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod face;
pub mod llm;
pub mod saved;
pub mod suggestion;
