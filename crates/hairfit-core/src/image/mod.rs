//! Image-generation provider abstractions.

pub mod box_provider;
pub mod provider;
