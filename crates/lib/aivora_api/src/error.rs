//! Application error types.

use aivora_core::auth::AuthError;
use aivora_core::model::ModelError;
use aivora_core::models::chat::ErrorResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::handlers::chat::MODEL_NOT_CONFIGURED;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Server misconfigured: {0}")]
    Misconfigured(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, m.as_str()),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m.as_str()),
            AppError::RateLimited(m) => (StatusCode::TOO_MANY_REQUESTS, m.as_str()),
            AppError::Misconfigured(m) => (StatusCode::INTERNAL_SERVER_ERROR, m.as_str()),
            AppError::Internal(detail) => {
                error!(%detail, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };
        let body = Json(ErrorResponse {
            error: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<ModelError> for AppError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::NotConfigured(_) => AppError::Misconfigured(MODEL_NOT_CONFIGURED.into()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::TokenError(msg) => AppError::Unauthorized(msg),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}
