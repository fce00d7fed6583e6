//! Configuration for the remote completion capability
//!
//! Credentials and endpoint come from the process environment, loaded once at
//! startup. A missing key fails fast here rather than as an auth error three
//! requests in.

use serde::{Deserialize, Serialize};
use std::env;

/// Default OpenRouter endpoint
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Error types for configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Remote completion endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key (env: OPENROUTER_API_KEY)
    pub api_key: String,
    /// Base URL (env: OPENROUTER_BASE_URL, default OpenRouter)
    pub base_url: String,
}

impl LlmConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("OPENROUTER_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENROUTER_API_KEY".to_string()))?;
        if api_key.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "OPENROUTER_API_KEY is set but empty".to_string(),
            ));
        }

        let base_url = env::var("OPENROUTER_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self { api_key, base_url })
    }

    /// Build a configuration without touching the environment
    pub fn new(api_key: &str, base_url: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_config() {
        let config = LlmConfig::new("sk-or-test", "https://example.com/api/v1/");
        assert_eq!(config.api_key, "sk-or-test");
        assert_eq!(config.base_url, "https://example.com/api/v1");
    }

    #[test]
    fn test_default_base_url() {
        assert_eq!(DEFAULT_BASE_URL, "https://openrouter.ai/api/v1");
    }
}
