//! Route definitions for the preview service.
//!
//! ## Routes
//!
//! - `GET /health` - Health check (JSON)
//! - `GET /preview/default` - Static default preview
//! - `GET /preview/entity/{uid}` - Preview of a single entity
//! - `GET /preview/comparison/{uid_a}/{uid_b}` - Preview comparing two entities

mod health;
mod preview;

use axum::Router;
use axum::routing::get;

use crate::state::AppState;

/// Build the complete preview service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/preview/default", get(preview::default_preview))
        .route("/preview/entity/{uid}", get(preview::entity_preview))
        .route(
            "/preview/comparison/{uid_a}/{uid_b}",
            get(preview::comparison_preview),
        )
        .with_state(state)
}
