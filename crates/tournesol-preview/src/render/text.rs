//! Text measurement, width fitting and anchored drawing.

use ab_glyph::{Font, GlyphId, ScaleFont, point};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;

use crate::assets::StyledFont;

/// Appended to truncated text.
pub const ELLIPSIS: char = '…';

/// Anything that can report the rendered width of a string in pixels.
pub trait MeasureText {
    fn text_width(&self, text: &str) -> f32;
}

impl MeasureText for StyledFont<'_> {
    /// Sum of glyph advances plus pair kerning.
    fn text_width(&self, text: &str) -> f32 {
        let scaled = self.font.as_scaled(self.scale);
        let mut width = 0.0;
        let mut previous: Option<GlyphId> = None;
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(previous) = previous {
                width += scaled.kern(previous, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }
        width
    }
}

/// Shorten `text` so that it renders within `available_width`.
///
/// Text that already fits is returned unchanged, the empty string included.
/// Otherwise the result is the longest character prefix that still fits once
/// [`ELLIPSIS`] is appended. When not even one character plus the ellipsis
/// fits, that one-character form is returned anyway.
pub fn fit(measure: &impl MeasureText, text: &str, available_width: f32) -> String {
    if text.is_empty() || measure.text_width(text) <= available_width {
        return text.to_string();
    }

    // boundaries[n] is the byte length of the first n characters.
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();

    let mut left = 1;
    let mut right = boundaries.len() - 1;

    while right - left > 1 {
        let middle = (left + right) / 2;
        let candidate = with_ellipsis(&text[..boundaries[middle]]);
        if measure.text_width(&candidate) <= available_width {
            left = middle;
        } else {
            right = middle;
        }
    }

    with_ellipsis(&text[..boundaries[left]])
}

fn with_ellipsis(prefix: &str) -> String {
    let mut truncated = String::with_capacity(prefix.len() + ELLIPSIS.len_utf8());
    truncated.push_str(prefix);
    truncated.push(ELLIPSIS);
    truncated
}

/// Which point of the text box sits at the drawing coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Left edge, ascender line.
    LeftAscender,
    /// Horizontal middle, top of the inked glyphs.
    MiddleTop,
}

/// Draw `text` onto `canvas` with the given anchor at `(x, y)`.
pub fn draw_text(
    canvas: &mut RgbaImage,
    style: StyledFont<'_>,
    anchor: Anchor,
    (x, y): (i32, i32),
    color: Rgba<u8>,
    text: &str,
) {
    let (x, y) = match anchor {
        Anchor::LeftAscender => (x, y),
        Anchor::MiddleTop => {
            let half_width = (style.text_width(text) / 2.0).round() as i32;
            let ink_top = ink_top(style, text).unwrap_or(0.0).round() as i32;
            (x - half_width, y - ink_top)
        }
    };
    draw_text_mut(canvas, color, x, y, style.scale, style.font, text);
}

/// Distance from the ascender line down to the highest inked pixel.
fn ink_top(style: StyledFont<'_>, text: &str) -> Option<f32> {
    let scaled = style.font.as_scaled(style.scale);
    text.chars()
        .filter_map(|c| {
            let mut glyph = scaled.scaled_glyph(c);
            glyph.position = point(0.0, scaled.ascent());
            style
                .font
                .outline_glyph(glyph)
                .map(|outlined| outlined.px_bounds().min.y)
        })
        .reduce(f32::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{FontConfig, FontRole};
    use crate::testing;

    /// Every character is the same number of pixels wide.
    struct Monospace(f32);

    impl MeasureText for Monospace {
        fn text_width(&self, text: &str) -> f32 {
            text.chars().count() as f32 * self.0
        }
    }

    #[test]
    fn fit_returns_text_that_fits() {
        assert_eq!(fit(&Monospace(10.0), "hello", 50.0), "hello");
        assert_eq!(fit(&Monospace(10.0), "hello", 300.0), "hello");
    }

    #[test]
    fn fit_empty_text() {
        assert_eq!(fit(&Monospace(10.0), "", 0.0), "");
        assert_eq!(fit(&Monospace(10.0), "", -5.0), "");
    }

    #[test]
    fn fit_longest_prefix() {
        // (4 chars + ellipsis) * 10 = 50 <= 55, 5 + 1 would be 60.
        assert_eq!(fit(&Monospace(10.0), "abcdefghij", 55.0), "abcd…");
        assert_eq!(fit(&Monospace(10.0), "abcdefghij", 90.0), "abcdefgh…");
    }

    #[test]
    fn fit_exact_boundary() {
        assert_eq!(fit(&Monospace(10.0), "abcdefghij", 100.0), "abcdefghij");
        assert_eq!(fit(&Monospace(10.0), "abcdefghij", 99.0), "abcdefgh…");
    }

    #[test]
    fn fit_keeps_one_char_when_nothing_fits() {
        assert_eq!(fit(&Monospace(10.0), "abcdefghij", 5.0), "a…");
        assert_eq!(fit(&Monospace(10.0), "ab", 0.0), "a…");
    }

    #[test]
    fn fit_single_char_too_wide() {
        assert_eq!(fit(&Monospace(10.0), "a", 5.0), "a…");
    }

    #[test]
    fn fit_multibyte() {
        assert_eq!(fit(&Monospace(10.0), "éàüöçñ", 40.0), "éàü…");
        assert_eq!(fit(&Monospace(10.0), "你好世界和平", 30.0), "你好…");
    }

    #[test]
    fn fit_result_fits_when_possible() {
        let measure = Monospace(7.0);
        let text = "The quick brown fox jumps over the lazy dog";
        for width in 14..400 {
            let width = width as f32;
            let fitted = fit(&measure, text, width);
            assert!(measure.text_width(&fitted) <= width, "width {width}: {fitted}");
            if fitted != text {
                assert!(fitted.ends_with(ELLIPSIS));
                assert!(text.starts_with(fitted.trim_end_matches(ELLIPSIS)));
            }
        }
    }

    #[test]
    fn fit_is_monotonic() {
        let fonts = FontConfig::new(testing::font());
        let style = fonts.get(FontRole::EntityTitle);
        let text = "Pourquoi les algorithmes de recommandation doivent être robustement bénéfiques";
        let mut previous = 0;
        for width in 0..1200 {
            let prefix_len = fit(&style, text, width as f32)
                .trim_end_matches(ELLIPSIS)
                .chars()
                .count();
            assert!(prefix_len >= previous, "width {width}");
            previous = prefix_len;
        }
        assert_eq!(previous, text.chars().count());
    }

    #[test]
    fn fit_real_font() {
        let fonts = FontConfig::new(testing::font());
        let style = fonts.get(FontRole::EntityTitle);
        let title = "A very long video title that certainly does not fit in three hundred pixels at fourteen";
        assert!(style.text_width(title) > 300.0);
        let fitted = fit(&style, title, 300.0);
        assert!(fitted.ends_with(ELLIPSIS));
        assert!(style.text_width(&fitted) <= 300.0);
        assert_eq!(fit(&style, "Short", 300.0), "Short");
    }

    #[test]
    fn text_width_grows_with_scale() {
        let fonts = FontConfig::new(testing::font());
        let small = fonts.get(FontRole::EntityUploader).text_width("comparisons");
        let large = fonts.get(FontRole::EntityRatings).text_width("comparisons");
        assert!(small > 0.0);
        assert!(large > small);
    }

    #[test]
    fn draw_middle_top_is_centered() {
        let fonts = FontConfig::new(testing::font());
        let style = fonts.get(FontRole::EntityRatings);
        let mut canvas = RgbaImage::from_pixel(120, 60, Rgba([255, 255, 255, 255]));
        draw_text(
            &mut canvas,
            style,
            Anchor::MiddleTop,
            (60, 20),
            Rgba([0, 0, 0, 255]),
            "888",
        );

        let inked: Vec<(u32, u32)> = canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| p[0] < 128)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(!inked.is_empty());

        let min_x = inked.iter().map(|p| p.0).min().unwrap() as i32;
        let max_x = inked.iter().map(|p| p.0).max().unwrap() as i32;
        let min_y = inked.iter().map(|p| p.1).min().unwrap() as i32;
        assert!(((min_x + max_x) / 2 - 60).abs() <= 2, "{min_x}..{max_x}");
        assert!((min_y - 20).abs() <= 1, "top {min_y}");
    }
}
