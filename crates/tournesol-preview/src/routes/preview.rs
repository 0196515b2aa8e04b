//! Preview image handlers.
//!
//! Every handler answers `200 image/png`. When a generated preview cannot be
//! produced for an entity, the default preview is served in its place with
//! the same cache policy as the generated one would have had.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::error::PreviewError;
use crate::pipeline::{self, Outcome};
use crate::state::AppState;

/// `Cache-Control` of the default preview (24h).
const DEFAULT_CACHE_CONTROL: &str = "public, max-age=86400";

/// Handle `GET /preview/default`.
pub async fn default_preview(State(state): State<AppState>) -> Response {
    png_response(state.assets.default_preview(), DEFAULT_CACHE_CONTROL)
}

/// Handle `GET /preview/entity/{uid}`.
pub async fn entity_preview(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Response, PreviewError> {
    let outcome = pipeline::entity_preview(&state, uid.trim()).await?;
    Ok(outcome_response(&state, outcome))
}

/// Handle `GET /preview/comparison/{uid_a}/{uid_b}`.
pub async fn comparison_preview(
    State(state): State<AppState>,
    Path((uid_a, uid_b)): Path<(String, String)>,
) -> Result<Response, PreviewError> {
    let outcome = pipeline::comparison_preview(&state, uid_a.trim(), uid_b.trim()).await?;
    Ok(outcome_response(&state, outcome))
}

fn outcome_response(state: &AppState, outcome: Outcome) -> Response {
    let cache_control = format!("public, max-age={}", state.config.entity_max_age_secs);
    let body = match outcome {
        Outcome::Rendered(png) => Bytes::from(png),
        Outcome::Fallback(_) => state.assets.default_preview(),
    };
    png_response(body, &cache_control)
}

/// Build an HTTP response with PNG content, ETag and cache headers.
fn png_response(body: Bytes, cache_control: &str) -> Response {
    let hash = xxhash_rust::xxh3::xxh3_64(&body);
    let etag = format!("\"{}\"", hex_fmt::HexFmt(&hash.to_be_bytes()));

    let mut response = (StatusCode::OK, body).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("image/png"));
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    if let Ok(val) = HeaderValue::from_str(&etag) {
        headers.insert(header::ETAG, val);
    }
    if let Ok(val) = HeaderValue::from_str(cache_control) {
        headers.insert(header::CACHE_CONTROL, val);
    }
    response
}
