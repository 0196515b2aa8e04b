//! Brand logo placement on single-entity previews.
//!
//! Negative and zero scores are shown without the logo, leaving room for the
//! minus sign and making clear the entity is not currently trusted.

use image::RgbaImage;
use image::imageops;

use crate::entity::{Entity, ScoreCategory};

/// Centered over the left column while the score is not computed.
pub const LOGO_PENDING_XY: (i64, i64) = (43, 24);

/// Just before the digits of a positive score.
pub const LOGO_POSITIVE_XY: (i64, i64) = (16, 24);

/// Where the logo goes for a given score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoPlacement {
    Pending,
    BesideScore,
    Hidden,
}

impl LogoPlacement {
    pub fn for_score(category: ScoreCategory) -> Self {
        match category {
            ScoreCategory::Pending => Self::Pending,
            ScoreCategory::Positive(_) => Self::BesideScore,
            ScoreCategory::NonPositive(_) => Self::Hidden,
        }
    }

    /// Top-left destination of the logo, if it is drawn at all.
    pub fn position(self) -> Option<(i64, i64)> {
        match self {
            Self::Pending => Some(LOGO_PENDING_XY),
            Self::BesideScore => Some(LOGO_POSITIVE_XY),
            Self::Hidden => None,
        }
    }
}

/// Alpha-composite `logo` onto `frame` according to the entity's score.
pub fn overlay(frame: &mut RgbaImage, logo: &RgbaImage, entity: &Entity) -> LogoPlacement {
    let placement = LogoPlacement::for_score(entity.score_category());
    if let Some((x, y)) = placement.position() {
        imageops::overlay(frame, logo, x, y);
    }
    placement
}
