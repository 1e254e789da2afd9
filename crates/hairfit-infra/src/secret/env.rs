//! Environment variable secret provider.
//!
//! Key resolution: first `HAIRFIT_{KEY}`, then `{KEY}` directly (e.g.,
//! "OPENAI_API_KEY"). Values come back wrapped in [`SecretString`] so they
//! cannot be logged by accident.

use secrecy::SecretString;

/// Prefix for app-scoped overrides of well-known variables.
const APP_PREFIX: &str = "HAIRFIT_";

/// Read-only secret lookup backed by environment variables.
pub struct EnvSecretProvider;

impl EnvSecretProvider {
    pub fn new() -> Self {
        Self
    }

    /// Look up `key`, preferring the `HAIRFIT_`-prefixed variable.
    ///
    /// Unset, empty and non-Unicode values all count as missing.
    pub fn get(&self, key: &str) -> Option<SecretString> {
        let prefixed = format!("{APP_PREFIX}{key}");
        read_var(&prefixed)
            .or_else(|| read_var(key))
            .map(SecretString::from)
    }
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn read_var(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(val) if !val.trim().is_empty() => Some(val),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_env_provider_get_existing() {
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var("HAIRFIT_TEST_SECRET_1", "test-value-123") };

        let provider = EnvSecretProvider::new();
        let result = provider.get("HAIRFIT_TEST_SECRET_1").unwrap();
        assert_eq!(result.expose_secret(), "test-value-123");

        // SAFETY: the var was just set above.
        unsafe { std::env::remove_var("HAIRFIT_TEST_SECRET_1") };
    }

    #[test]
    fn test_env_provider_prefers_prefixed() {
        // SAFETY: the variable names are unique to this test.
        unsafe {
            std::env::set_var("TEST_SECRET_2", "plain");
            std::env::set_var("HAIRFIT_TEST_SECRET_2", "prefixed");
        }

        let result = EnvSecretProvider::new().get("TEST_SECRET_2").unwrap();
        assert_eq!(result.expose_secret(), "prefixed");

        // SAFETY: the vars were just set above.
        unsafe {
            std::env::remove_var("TEST_SECRET_2");
            std::env::remove_var("HAIRFIT_TEST_SECRET_2");
        }
    }

    #[test]
    fn test_env_provider_empty_is_missing() {
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var("TEST_SECRET_EMPTY_3", "  ") };
        assert!(EnvSecretProvider::new().get("TEST_SECRET_EMPTY_3").is_none());
        // SAFETY: the var was just set above.
        unsafe { std::env::remove_var("TEST_SECRET_EMPTY_3") };
    }

    #[test]
    fn test_env_provider_get_missing() {
        assert!(EnvSecretProvider::new().get("NONEXISTENT_VAR_XYZ_123").is_none());
    }
}
