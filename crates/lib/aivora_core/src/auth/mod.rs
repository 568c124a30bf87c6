//! Authentication logic.
//!
//! JWT management shared by `aivora_api` and its tests.

pub mod jwt;

use thiserror::Error;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Token error: {0}")]
    TokenError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
