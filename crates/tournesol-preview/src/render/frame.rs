//! The single-entity preview frame.
//!
//! Layout (440x240):
//! - Left column: Tournesol score, comparisons and contributors counts
//! - Top right: 320x180 slot for the video thumbnail, pasted by the caller
//! - Bottom right: uploader and title, each fit to 300px
//! - Yellow bars separating the three regions

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use crate::assets::{FontConfig, FontRole};
use crate::entity::{Entity, ScoreCategory};
use crate::render::text::{self, Anchor};
use crate::render::{FRAME_HEIGHT, FRAME_WIDTH};

pub const COLOR_WHITE_BACKGROUND: Rgba<u8> = Rgba([255, 250, 230, 255]);
pub const COLOR_YELLOW_BORDER: Rgba<u8> = Rgba([255, 200, 0, 255]);
pub const COLOR_BROWN_FONT: Rgba<u8> = Rgba([29, 26, 20, 255]);
pub const COLOR_NEGATIVE_SCORE: Rgba<u8> = Rgba([128, 128, 128, 248]);

/// Uploader line origin; the title sits [`TITLE_LINE_OFFSET`] below it.
const ENTITY_UPLOADER_XY: (i32, i32) = (128, 190);
const TITLE_LINE_OFFSET: i32 = 24;

/// Width both metadata lines are fit to.
const METADATA_AVAILABLE_WIDTH: f32 = 300.0;

const TOURNESOL_SCORE_XY: (i32, i32) = (84, 30);
const TOURNESOL_SCORE_NEGATIVE_XY: (i32, i32) = (60, 30);

/// Anchor of the comparisons count; labels and contributors stack below.
const ENTITY_RATINGS_XY: (i32, i32) = (60, 98);
const RATINGS_LABEL_OFFSET: i32 = 26;
const CONTRIBUTORS_OFFSET: i32 = 82;

/// Inclusive corners of the yellow bars.
const VERTICAL_BAR: ((i32, i32), (i32, i32)) = ((113, 0), (119, 240));
const HORIZONTAL_BAR: ((i32, i32), (i32, i32)) = ((119, 180), (440, 186));

/// Uploader and title of `entity`, each fit to the metadata width.
///
/// Both lines are measured with the title font, although the uploader is
/// drawn with its own smaller font.
pub fn metadata_lines(entity: &Entity, fonts: &FontConfig) -> (String, String) {
    let measure = fonts.get(FontRole::EntityTitle);
    let uploader = text::fit(&measure, &entity.metadata.uploader, METADATA_AVAILABLE_WIDTH);
    let title = text::fit(&measure, &entity.metadata.name, METADATA_AVAILABLE_WIDTH);
    (uploader, title)
}

/// Score as displayed: rounded to an integer, or nothing when pending.
pub fn score_label(score: Option<f64>) -> Option<String> {
    score.map(|value| format!("{value:.0}"))
}

/// Build the frame for `entity`, without thumbnail or logo.
pub fn compose(entity: &Entity, fonts: &FontConfig) -> RgbaImage {
    let mut frame = RgbaImage::from_pixel(FRAME_WIDTH, FRAME_HEIGHT, COLOR_WHITE_BACKGROUND);

    let (uploader, title) = metadata_lines(entity, fonts);
    let (x, y) = ENTITY_UPLOADER_XY;
    text::draw_text(
        &mut frame,
        fonts.get(FontRole::EntityUploader),
        Anchor::LeftAscender,
        (x, y),
        COLOR_BROWN_FONT,
        &uploader,
    );
    text::draw_text(
        &mut frame,
        fonts.get(FontRole::EntityTitle),
        Anchor::LeftAscender,
        (x, y + TITLE_LINE_OFFSET),
        COLOR_BROWN_FONT,
        &title,
    );

    if let Some(label) = score_label(entity.tournesol_score) {
        let (position, color) = match entity.score_category() {
            ScoreCategory::Positive(_) => (TOURNESOL_SCORE_XY, COLOR_BROWN_FONT),
            _ => (TOURNESOL_SCORE_NEGATIVE_XY, COLOR_NEGATIVE_SCORE),
        };
        text::draw_text(
            &mut frame,
            fonts.get(FontRole::TsScore),
            Anchor::MiddleTop,
            position,
            color,
            &label,
        );
    }

    let (x, y) = ENTITY_RATINGS_XY;
    draw_count(
        &mut frame,
        fonts,
        (x, y),
        entity.rating_n_ratings,
        "comparisons",
    );
    draw_count(
        &mut frame,
        fonts,
        (x, y + CONTRIBUTORS_OFFSET),
        entity.rating_n_contributors,
        "contributors",
    );

    fill_inclusive(&mut frame, VERTICAL_BAR, COLOR_YELLOW_BORDER);
    fill_inclusive(&mut frame, HORIZONTAL_BAR, COLOR_YELLOW_BORDER);

    frame
}

/// A count with its label right below, both centered on `x`.
fn draw_count(frame: &mut RgbaImage, fonts: &FontConfig, (x, y): (i32, i32), count: u64, label: &str) {
    text::draw_text(
        frame,
        fonts.get(FontRole::EntityRatings),
        Anchor::MiddleTop,
        (x, y),
        COLOR_BROWN_FONT,
        &count.to_string(),
    );
    text::draw_text(
        frame,
        fonts.get(FontRole::EntityRatingsLabel),
        Anchor::MiddleTop,
        (x, y + RATINGS_LABEL_OFFSET),
        COLOR_BROWN_FONT,
        label,
    );
}

/// Fill the rectangle spanning both corners, inclusive, clipped to the canvas.
fn fill_inclusive(frame: &mut RgbaImage, ((x0, y0), (x1, y1)): ((i32, i32), (i32, i32)), color: Rgba<u8>) {
    let width = (x1 - x0 + 1) as u32;
    let height = (y1 - y0 + 1) as u32;
    draw_filled_rect_mut(frame, Rect::at(x0, y0).of_size(width, height), color);
}
