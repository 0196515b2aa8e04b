//! Error types for the preview service.
//!
//! Two families live here. [`PreviewError`] is request-fatal and is rendered
//! as a small HTML error page. [`Fallback`] is recovered by the route layer,
//! which answers with the static default preview instead.

use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use maud::{DOCTYPE, PreEscaped, html};

use crate::thumbnail::ThumbnailError;

/// Inline CSS for error pages.
const ERROR_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;display:flex;justify-content:center;align-items:center;min-height:100vh;background:#fffae6;color:#1d1a14;padding:1rem}
.error-page{text-align:center;max-width:400px}
.error-page h1{font-size:1.5rem;margin-bottom:.75rem}
.error-page p{color:#666;margin-bottom:1rem;line-height:1.5}
"#;

/// Preview service error type.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// A static asset (default preview, logo, font) is absent or unreadable.
    #[error("asset missing: {}: {reason}", path.display())]
    AssetMissing {
        /// Path that was read.
        path: PathBuf,
        /// What went wrong while reading or decoding it.
        reason: String,
    },

    /// Internal server error (encoding, etc.).
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),

    /// ClickHouse query error.
    #[error("database error: {0}")]
    Database(#[from] clickhouse::error::Error),
}

impl PreviewError {
    pub(crate) fn asset(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::AssetMissing {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl IntoResponse for PreviewError {
    fn into_response(self) -> Response {
        let (title, message) = match &self {
            Self::AssetMissing { .. } => {
                tracing::error!(error = %self, "preview asset unavailable");
                (
                    "Misconfigured",
                    "The preview service is missing one of its resources.",
                )
            }
            Self::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                (
                    "Internal Error",
                    "An internal error occurred. Please try again later.",
                )
            }
            Self::Database(err) => {
                tracing::error!(error = %err, "database error");
                (
                    "Service Unavailable",
                    "The database is temporarily unavailable. Please try again later.",
                )
            }
        };

        let markup = html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    title { (title) " - Tournesol preview" }
                    meta name="robots" content="noindex";
                    style { (PreEscaped(ERROR_CSS)) }
                }
                body {
                    main class="error-page" {
                        h1 { (title) }
                        p { (message) }
                    }
                }
            }
        };

        (StatusCode::INTERNAL_SERVER_ERROR, markup).into_response()
    }
}

/// Why a request is answered with the default preview instead of a
/// generated one.
#[derive(Debug, thiserror::Error)]
pub enum Fallback {
    /// No entity is stored under the requested UID.
    #[error("entity {0} not found")]
    EntityNotFound(String),

    /// The entity exists but only videos can be rendered.
    #[error("entity {uid} has unsupported type {kind}")]
    UnsupportedType {
        /// UID of the entity.
        uid: String,
        /// Its type as stored.
        kind: String,
    },

    /// The entity's thumbnail could not be fetched or decoded.
    #[error("thumbnail unavailable for {uid}: {source}")]
    Thumbnail {
        /// UID of the entity.
        uid: String,
        /// Underlying fetch failure.
        source: ThumbnailError,
    },
}
