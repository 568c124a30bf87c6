//! # aivora_api
//!
//! HTTP API library for the Aivora support assistant.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use aivora_core::model::ModelFactory;
use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{chat, health};
use crate::middleware::rate_limit::AiRateLimiter;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: ApiConfig,
    /// Source of model clients for AI endpoints.
    pub models: Arc<dyn ModelFactory>,
    /// Per-user quota for AI endpoints.
    pub ai_limiter: Arc<AiRateLimiter>,
}

impl AppState {
    /// Builds state with a rate limiter sized from `config`.
    pub fn new(config: ApiConfig, models: Arc<dyn ModelFactory>) -> Self {
        let ai_limiter = Arc::new(AiRateLimiter::per_minute(config.ai_requests_per_minute));
        Self {
            config,
            models,
            ai_limiter,
        }
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new().route(routes::GET_API_HEALTH, get(health::health_handler));

    // Protected routes (require auth); AI routes are additionally rate limited
    let protected = Router::new()
        .route(
            routes::POST_API_CHAT_SUPPORT,
            post(chat::chat_with_support).layer(axum::middleware::from_fn_with_state(
                state.clone(),
                middleware::rate_limit::ai_rate_limit,
            )),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(cors)
        .with_state(state)
}
