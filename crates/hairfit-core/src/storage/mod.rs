//! Storage abstractions for HairFit.
//!
//! Defines the saved-analysis repository trait. Implementations live in
//! hairfit-infra.

pub mod saved_store;
