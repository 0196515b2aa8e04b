//! Per-request preview pipelines.
//!
//! Each pipeline is a straight line of steps. A step that cannot go on
//! yields a [`Fallback`] reason, which the route layer answers with the
//! default preview. Only [`PreviewError`] aborts the request.

use image::RgbaImage;

use crate::entity::Entity;
use crate::error::{Fallback, PreviewError};
use crate::render::{self, comparison, frame, logo};
use crate::state::AppState;
use crate::thumbnail::ThumbnailError;

/// Result of a preview pipeline that did not fail fatally.
#[derive(Debug)]
pub enum Outcome {
    /// Encoded PNG of a generated preview.
    Rendered(Vec<u8>),
    /// The default preview must be served instead.
    Fallback(Fallback),
}

/// Why a pipeline stopped early.
#[derive(Debug)]
enum Halt {
    Fallback(Fallback),
    Fatal(PreviewError),
}

impl From<Fallback> for Halt {
    fn from(reason: Fallback) -> Self {
        Halt::Fallback(reason)
    }
}

impl From<PreviewError> for Halt {
    fn from(err: PreviewError) -> Self {
        Halt::Fatal(err)
    }
}

/// Turn the result of a pipeline body into an [`Outcome`], logging the
/// fallback reason if there is one.
fn settle(result: Result<Vec<u8>, Halt>) -> Result<Outcome, PreviewError> {
    match result {
        Ok(png) => Ok(Outcome::Rendered(png)),
        Err(Halt::Fallback(reason)) => {
            log_fallback(&reason);
            Ok(Outcome::Fallback(reason))
        }
        Err(Halt::Fatal(err)) => Err(err),
    }
}

fn log_fallback(reason: &Fallback) {
    match reason {
        Fallback::EntityNotFound(uid) => {
            tracing::error!(uid = %uid, "preview entity not found, serving default");
        }
        Fallback::UnsupportedType { uid, kind } => {
            tracing::info!(uid = %uid, kind = %kind, "entity type has no preview, serving default");
        }
        Fallback::Thumbnail { uid, source } => match source {
            ThumbnailError::Transport(e) => {
                tracing::error!(
                    uid = %uid,
                    timeout = e.is_timeout(),
                    error = %e,
                    "thumbnail request failed, serving default"
                );
            }
            other => {
                tracing::error!(uid = %uid, error = %other, "thumbnail unusable, serving default");
            }
        },
    }
}

async fn lookup(state: &AppState, uid: &str) -> Result<Entity, Halt> {
    let entity = state
        .store
        .lookup(uid)
        .await?
        .ok_or_else(|| Fallback::EntityNotFound(uid.to_string()))?;
    Ok(entity)
}

fn ensure_renderable(entity: &Entity) -> Result<(), Fallback> {
    if entity.is_video() {
        Ok(())
    } else {
        Err(Fallback::UnsupportedType {
            uid: entity.uid.clone(),
            kind: entity.entity_type.clone(),
        })
    }
}

async fn thumbnail_of(state: &AppState, entity: &Entity) -> Result<RgbaImage, Fallback> {
    state
        .thumbnails
        .fetch(entity)
        .await
        .map_err(|source| Fallback::Thumbnail {
            uid: entity.uid.clone(),
            source,
        })
}

/// Preview of a single entity: the score card with its thumbnail and logo.
pub async fn entity_preview(state: &AppState, uid: &str) -> Result<Outcome, PreviewError> {
    settle(render_entity(state, uid).await)
}

async fn render_entity(state: &AppState, uid: &str) -> Result<Vec<u8>, Halt> {
    let entity = lookup(state, uid).await?;
    ensure_renderable(&entity)?;

    let mut canvas = frame::compose(&entity, state.assets.fonts());
    let thumbnail = thumbnail_of(state, &entity).await?;

    render::paste_thumbnail(&mut canvas, &thumbnail);
    let placement = logo::overlay(&mut canvas, state.assets.logo(), &entity);

    tracing::debug!(uid = %entity.uid, logo = ?placement, "entity preview composed");
    Ok(render::encode_png(&canvas)?)
}

/// Preview comparing two entities: half of each thumbnail, side by side.
pub async fn comparison_preview(
    state: &AppState,
    uid_a: &str,
    uid_b: &str,
) -> Result<Outcome, PreviewError> {
    settle(render_comparison(state, uid_a, uid_b).await)
}

async fn render_comparison(state: &AppState, uid_a: &str, uid_b: &str) -> Result<Vec<u8>, Halt> {
    let entity_a = lookup(state, uid_a).await?;
    let entity_b = lookup(state, uid_b).await?;
    ensure_renderable(&entity_a)?;
    ensure_renderable(&entity_b)?;

    let (thumbnail_a, thumbnail_b) = tokio::try_join!(
        thumbnail_of(state, &entity_a),
        thumbnail_of(state, &entity_b),
    )?;

    let canvas = comparison::compose(&thumbnail_a, &thumbnail_b, state.assets.logo());
    tracing::debug!(uid_a = %entity_a.uid, uid_b = %entity_b.uid, "comparison preview composed");
    Ok(render::encode_png(&canvas)?)
}
