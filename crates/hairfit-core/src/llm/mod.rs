//! Vision LLM provider abstractions for HairFit.
//!
//! - `VisionLlmProvider`: RPITIT trait for concrete provider implementations
//! - `BoxVisionProvider`: Object-safe wrapper for dynamic dispatch

pub mod box_provider;
pub mod provider;
