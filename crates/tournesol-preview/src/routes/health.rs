//! Liveness probe.
//!
//! Assets are loaded before the router exists, so a process that answers
//! here can always serve at least the default preview.

use axum::Json;
use serde::Serialize;

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

/// Report the service name and crate version.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "tournesol-preview",
        version: env!("CARGO_PKG_VERSION"),
    })
}
