//! API server configuration.

use std::num::NonZeroU32;

use aivora_core::auth::jwt::resolve_jwt_secret;
use aivora_core::model::config::ModelConfig;

/// Default quota for AI endpoints, per user per minute.
pub const DEFAULT_AI_REQUESTS_PER_MINUTE: NonZeroU32 = NonZeroU32::new(10).unwrap();

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3100").
    pub bind_addr: String,
    /// JWT signing secret.
    pub jwt_secret: String,
    /// Model provider settings.
    pub model: ModelConfig,
    /// Requests each user may make to AI endpoints per minute.
    pub ai_requests_per_minute: NonZeroU32,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                     | Default                       |
    /// |------------------------------|-------------------------------|
    /// | `BIND_ADDR`                  | `127.0.0.1:3100`              |
    /// | `JWT_SECRET` / `AUTH_SECRET` | generated & persisted to file |
    /// | `AI_RATE_LIMIT_PER_MINUTE`   | `10`                          |
    ///
    /// Model settings come from [`ModelConfig::from_env`].
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3100".into()),
            jwt_secret: resolve_jwt_secret(),
            model: ModelConfig::from_env(),
            ai_requests_per_minute: parse_rate_limit(
                std::env::var("AI_RATE_LIMIT_PER_MINUTE").ok().as_deref(),
            ),
        }
    }
}

/// Parse a per-minute quota, falling back to the default on missing, zero or
/// malformed input.
pub fn parse_rate_limit(raw: Option<&str>) -> NonZeroU32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .and_then(NonZeroU32::new)
        .unwrap_or(DEFAULT_AI_REQUESTS_PER_MINUTE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_parses_positive_numbers() {
        assert_eq!(parse_rate_limit(Some("25")).get(), 25);
        assert_eq!(parse_rate_limit(Some(" 3 ")).get(), 3);
    }

    #[test]
    fn rate_limit_falls_back_to_default() {
        assert_eq!(parse_rate_limit(None), DEFAULT_AI_REQUESTS_PER_MINUTE);
        assert_eq!(parse_rate_limit(Some("0")), DEFAULT_AI_REQUESTS_PER_MINUTE);
        assert_eq!(parse_rate_limit(Some("lots")), DEFAULT_AI_REQUESTS_PER_MINUTE);
    }
}
