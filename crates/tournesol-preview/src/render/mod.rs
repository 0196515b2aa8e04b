//! Raster rendering of preview images.
//!
//! - [`text`]: width measurement, truncation with an ellipsis, anchored drawing
//! - [`frame`]: the single-entity card (score, counts, uploader, title)
//! - [`logo`]: brand logo placement driven by the score
//! - [`comparison`]: two half-thumbnails side by side
//!
//! All previews share the same 440x240 canvas with a 320x180 thumbnail slot
//! in the top-right corner.

pub mod comparison;
pub mod frame;
pub mod logo;
pub mod text;

use std::io::Cursor;

use image::{ImageFormat, RgbaImage, imageops};

use crate::error::PreviewError;

/// Preview canvas dimensions.
pub const FRAME_WIDTH: u32 = 440;
pub const FRAME_HEIGHT: u32 = 240;

/// Expected size of a medium-quality YouTube thumbnail.
pub const THUMBNAIL_WIDTH: u32 = 320;
pub const THUMBNAIL_HEIGHT: u32 = 180;

/// Top-left corner of the thumbnail slot: the left padding is whatever the
/// canvas has beyond the thumbnail width.
pub const THUMBNAIL_ORIGIN: (i64, i64) = ((FRAME_WIDTH - THUMBNAIL_WIDTH) as i64, 0);

/// Paste `thumbnail` into the thumbnail slot, replacing the pixels under it.
pub fn paste_thumbnail(frame: &mut RgbaImage, thumbnail: &RgbaImage) {
    let (x, y) = THUMBNAIL_ORIGIN;
    imageops::replace(frame, thumbnail, x, y);
}

/// Encode a canvas as PNG.
pub fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>, PreviewError> {
    let mut png = Vec::new();
    canvas
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| PreviewError::Internal(anyhow::anyhow!("PNG encode error: {e}")))?;
    Ok(png)
}
