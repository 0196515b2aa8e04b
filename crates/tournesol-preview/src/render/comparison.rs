//! Two-entity comparison preview.
//!
//! The left half of thumbnail A and the right half of thumbnail B are placed
//! side by side in the thumbnail slot, with the logo straddling the seam. No
//! text is drawn.

use image::RgbaImage;
use image::imageops;

use crate::assets::LOGO_SIZE;
use crate::render::frame::COLOR_WHITE_BACKGROUND;
use crate::render::{FRAME_HEIGHT, FRAME_WIDTH, THUMBNAIL_HEIGHT, THUMBNAIL_ORIGIN, THUMBNAIL_WIDTH};

/// A rectangle given by its left/top (inclusive) and right/bottom
/// (exclusive) edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropBox {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// Horizontal split point of a source thumbnail.
const HALF_THUMBNAIL_WIDTH: u32 = THUMBNAIL_WIDTH / 2;

/// Crop boxes of the two source thumbnails: the left half of A, the right
/// half of B.
pub fn crop_boxes() -> (CropBox, CropBox) {
    let a = CropBox {
        left: 0,
        top: 0,
        right: HALF_THUMBNAIL_WIDTH,
        bottom: THUMBNAIL_HEIGHT,
    };
    let b = CropBox {
        left: HALF_THUMBNAIL_WIDTH,
        top: 0,
        right: THUMBNAIL_WIDTH,
        bottom: THUMBNAIL_HEIGHT,
    };
    (a, b)
}

/// Copy `area` out of `source`. Parts of the box outside the source stay
/// fully transparent.
pub fn crop(source: &RgbaImage, area: CropBox) -> RgbaImage {
    let mut out = RgbaImage::new(area.width(), area.height());
    imageops::replace(
        &mut out,
        source,
        -i64::from(area.left),
        -i64::from(area.top),
    );
    out
}

/// Top-left destination of the seam logo.
pub fn logo_position() -> (i64, i64) {
    let (origin_x, _) = THUMBNAIL_ORIGIN;
    let half_logo = i64::from(LOGO_SIZE / 2);
    (
        origin_x + i64::from(HALF_THUMBNAIL_WIDTH) - half_logo,
        i64::from(THUMBNAIL_HEIGHT / 2) - half_logo,
    )
}

/// Compose the comparison preview from two thumbnails.
pub fn compose(thumbnail_a: &RgbaImage, thumbnail_b: &RgbaImage, logo: &RgbaImage) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(FRAME_WIDTH, FRAME_HEIGHT, COLOR_WHITE_BACKGROUND);
    let (box_a, box_b) = crop_boxes();
    let (origin_x, origin_y) = THUMBNAIL_ORIGIN;

    imageops::replace(&mut canvas, &crop(thumbnail_a, box_a), origin_x, origin_y);
    imageops::replace(
        &mut canvas,
        &crop(thumbnail_b, box_b),
        origin_x + i64::from(box_a.width()),
        origin_y,
    );

    let (logo_x, logo_y) = logo_position();
    imageops::overlay(&mut canvas, logo, logo_x, logo_y);
    canvas
}
