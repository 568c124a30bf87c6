//! Model provider configuration.

use std::env;
use std::time::Duration;

/// Default Gemini REST endpoint.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model used by [`super::ModelFactory::create_fast_model`].
pub const DEFAULT_FAST_MODEL: &str = "gemini-2.0-flash";

/// Default upper bound on a single provider call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Resolved configuration for the model provider.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Gemini API key; `None` means the assistant is unavailable.
    pub api_key: Option<String>,
    /// Model name for the fast tier.
    pub fast_model: String,
    /// Provider base URL (no trailing slash required).
    pub base_url: String,
    /// Timeout applied to each provider call.
    pub request_timeout: Duration,
}

impl ModelConfig {
    /// Reads configuration from environment variables.
    ///
    /// | Variable          | Default                                 |
    /// |-------------------|-----------------------------------------|
    /// | `GEMINI_API_KEY`  | unset                                   |
    /// | `GEMINI_MODEL`    | `gemini-2.0-flash`                      |
    /// | `GEMINI_BASE_URL` | Google Generative Language `v1beta` URL |
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("GEMINI_API_KEY").ok(),
            fast_model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_FAST_MODEL.to_string()),
            base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Config pointing at the public Gemini endpoint with the given key.
    pub fn with_api_key(api_key: Option<String>) -> Self {
        Self {
            api_key,
            fast_model: DEFAULT_FAST_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// The API key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// Whether an API key is available.
    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_unconfigured() {
        let config = ModelConfig::with_api_key(None);
        assert!(!config.is_configured());
        assert_eq!(config.fast_model, DEFAULT_FAST_MODEL);
    }

    #[test]
    fn blank_key_is_unconfigured() {
        let config = ModelConfig::with_api_key(Some("   ".into()));
        assert!(!config.is_configured());
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn present_key_is_configured() {
        let config = ModelConfig::with_api_key(Some("g-key".into()));
        assert!(config.is_configured());
        assert_eq!(config.api_key(), Some("g-key"));
    }
}
