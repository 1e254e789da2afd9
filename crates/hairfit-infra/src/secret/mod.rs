//! Secret lookup.
//!
//! - `env`: environment variable provider

pub mod env;

pub use env::EnvSecretProvider;

/// Key shared by the text and image providers.
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
