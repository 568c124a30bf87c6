//! Liveness probe.

use axum::Json;
use serde::Serialize;

/// Body of `GET /api/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// `GET /api/health` — reports that the process is serving requests.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: aivora_core::version(),
    })
}
