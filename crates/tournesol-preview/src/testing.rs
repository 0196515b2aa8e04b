//! Shared fixtures for unit tests.

use std::time::Duration;

use ab_glyph::FontArc;
use axum::Router;
use axum::extract::Path;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use image::{DynamicImage, Rgba, RgbaImage};

use crate::assets::{Assets, FontConfig};
use crate::entity::{Entity, EntityMetadata, TYPE_VIDEO};
use crate::render::{THUMBNAIL_HEIGHT, THUMBNAIL_WIDTH, encode_png};
use crate::thumbnail::MAX_THUMBNAIL_BYTES;

/// The bundled font, so tests do not depend on the working directory.
pub const FONT_BYTES: &[u8] = include_bytes!("../resources/fonts/DejaVuSans.ttf");

/// Solid color of the test logo. Full-intensity channels keep resizing and
/// alpha blending exact.
pub const LOGO_COLOR: Rgba<u8> = Rgba([0, 255, 0, 255]);

/// Solid color of every thumbnail served by [`spawn_thumbnail_server`].
pub const THUMBNAIL_COLOR: Rgba<u8> = Rgba([40, 90, 160, 255]);

pub fn font() -> FontArc {
    FontArc::try_from_slice(FONT_BYTES).unwrap()
}

pub fn fonts() -> FontConfig {
    FontConfig::new(font())
}

/// Encoded bytes of a tiny stand-in default preview.
pub fn default_preview_png() -> Vec<u8> {
    encode_png(&RgbaImage::from_pixel(12, 6, Rgba([255, 200, 0, 255]))).unwrap()
}

/// Assets with a solid 64x64 logo and a tiny default preview.
pub fn assets() -> Assets {
    let logo = DynamicImage::ImageRgba8(RgbaImage::from_pixel(64, 64, LOGO_COLOR));
    Assets::from_parts(default_preview_png(), &logo, font())
}

/// A video entity whose video ID is derived from a `yt:` UID.
pub fn video(uid: &str, score: Option<f64>) -> Entity {
    Entity {
        uid: uid.to_string(),
        entity_type: TYPE_VIDEO.to_string(),
        metadata: EntityMetadata {
            name: "How do recommendation algorithms work?".to_string(),
            uploader: "Science4All".to_string(),
            video_id: None,
        },
        tournesol_score: score,
        rating_n_ratings: 1234,
        rating_n_contributors: 56,
    }
}

pub fn thumbnail() -> RgbaImage {
    RgbaImage::from_pixel(THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT, THUMBNAIL_COLOR)
}

/// Serve thumbnails on a loopback port and return the base URL to pass to
/// `ThumbnailFetcher::new`.
///
/// Video IDs with special behavior:
/// - `notfound`: 404 whose body is still a valid image
/// - `garbage`: 200 with a body that is not an image
/// - `slow`: answers after two seconds
/// - `huge`: 200 with a body one byte over the thumbnail size limit
///
/// Any other ID gets a solid [`THUMBNAIL_COLOR`] thumbnail.
pub async fn spawn_thumbnail_server() -> String {
    let app = Router::new().route("/vi/{video_id}/mqdefault.jpg", get(serve_thumbnail));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/vi")
}

async fn serve_thumbnail(Path(video_id): Path<String>) -> Response {
    let png = encode_png(&thumbnail()).unwrap();
    match video_id.as_str() {
        "notfound" => (StatusCode::NOT_FOUND, [(header::CONTENT_TYPE, "image/png")], png)
            .into_response(),
        "garbage" => (StatusCode::OK, "<html>not an image</html>").into_response(),
        "huge" => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "image/jpeg")],
            vec![0u8; MAX_THUMBNAIL_BYTES + 1],
        )
            .into_response(),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            (StatusCode::OK, [(header::CONTENT_TYPE, "image/png")], png).into_response()
        }
        _ => (StatusCode::OK, [(header::CONTENT_TYPE, "image/png")], png).into_response(),
    }
}
