//! Static resources loaded once at startup and shared read-only by every
//! request: the default preview, the brand logo and the font configuration.

use std::path::Path;

use ab_glyph::{Font, FontArc, PxScale};
use axum::body::Bytes;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};

use crate::error::PreviewError;

/// File name of the default preview inside the resources directory.
pub const DEFAULT_PREVIEW_FILE: &str = "tournesol_screenshot_og.png";

/// File name of the brand logo inside the resources directory.
pub const LOGO_FILE: &str = "Logo64.png";

/// Side of the square logo as composited on previews.
pub const LOGO_SIZE: u32 = 34;

/// Logical text roles of the preview layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontRole {
    TsScore,
    EntityTitle,
    EntityUploader,
    EntityRatings,
    EntityRatingsLabel,
}

impl FontRole {
    /// Every role, in declaration order.
    pub const ALL: [FontRole; 5] = [
        FontRole::TsScore,
        FontRole::EntityTitle,
        FontRole::EntityUploader,
        FontRole::EntityRatings,
        FontRole::EntityRatingsLabel,
    ];

    /// Role name as used in layout descriptions.
    pub fn name(self) -> &'static str {
        match self {
            Self::TsScore => "ts_score",
            Self::EntityTitle => "entity_title",
            Self::EntityUploader => "entity_uploader",
            Self::EntityRatings => "entity_ratings",
            Self::EntityRatingsLabel => "entity_ratings_label",
        }
    }

    /// Font size in pixels per em.
    pub fn size(self) -> f32 {
        match self {
            Self::TsScore => 32.0,
            Self::EntityTitle => 14.0,
            Self::EntityUploader => 13.0,
            Self::EntityRatings => 22.0,
            Self::EntityRatingsLabel => 14.0,
        }
    }
}

/// A font at a fixed scale.
#[derive(Clone, Copy)]
pub struct StyledFont<'a> {
    pub font: &'a FontArc,
    pub scale: PxScale,
}

/// Immutable mapping from [`FontRole`] to a sized font.
#[derive(Clone)]
pub struct FontConfig {
    font: FontArc,
    scales: [PxScale; 5],
}

impl FontConfig {
    /// Size every role against `font`.
    pub fn new(font: FontArc) -> Self {
        let scales = FontRole::ALL.map(|role| em_scale(&font, role.size()));
        Self { font, scales }
    }

    /// The font for a role.
    pub fn get(&self, role: FontRole) -> StyledFont<'_> {
        StyledFont {
            font: &self.font,
            scale: self.scales[role as usize],
        }
    }
}

/// Convert a pixels-per-em size into the height-based scale `ab_glyph` uses.
fn em_scale(font: &FontArc, px_per_em: f32) -> PxScale {
    match font.units_per_em() {
        Some(units_per_em) if units_per_em > 0.0 => {
            PxScale::from(px_per_em * font.height_unscaled() / units_per_em)
        }
        _ => PxScale::from(px_per_em),
    }
}

/// All static resources needed to answer preview requests.
pub struct Assets {
    default_preview: Bytes,
    logo: RgbaImage,
    fonts: FontConfig,
}

impl Assets {
    /// Read the default preview and logo from `resources_dir`, and the font
    /// from `font_path`.
    pub fn load(resources_dir: &Path, font_path: &Path) -> Result<Self, PreviewError> {
        let default_path = resources_dir.join(DEFAULT_PREVIEW_FILE);
        let default_preview =
            std::fs::read(&default_path).map_err(|e| PreviewError::asset(&default_path, e))?;

        let logo_path = resources_dir.join(LOGO_FILE);
        let logo_bytes =
            std::fs::read(&logo_path).map_err(|e| PreviewError::asset(&logo_path, e))?;
        let logo =
            image::load_from_memory(&logo_bytes).map_err(|e| PreviewError::asset(&logo_path, e))?;

        let font_bytes = std::fs::read(font_path).map_err(|e| PreviewError::asset(font_path, e))?;
        let font = FontArc::try_from_vec(font_bytes).map_err(|e| PreviewError::asset(font_path, e))?;

        let assets = Self::from_parts(default_preview, &logo, font);
        for role in FontRole::ALL {
            tracing::debug!(
                role = role.name(),
                px_per_em = role.size(),
                scale = assets.fonts.get(role).scale.y,
                "font role sized"
            );
        }

        tracing::info!(
            resources_dir = %resources_dir.display(),
            font = %font_path.display(),
            default_preview_bytes = assets.default_preview.len(),
            "preview assets loaded"
        );

        Ok(assets)
    }

    /// Assemble assets from already decoded parts. The logo is converted to
    /// RGBA and resized to [`LOGO_SIZE`].
    pub fn from_parts(default_preview: Vec<u8>, logo: &DynamicImage, font: FontArc) -> Self {
        let logo = imageops::resize(&logo.to_rgba8(), LOGO_SIZE, LOGO_SIZE, FilterType::CatmullRom);
        Self {
            default_preview: Bytes::from(default_preview),
            logo,
            fonts: FontConfig::new(font),
        }
    }

    /// Encoded bytes of the default preview PNG.
    pub fn default_preview(&self) -> Bytes {
        self.default_preview.clone()
    }

    /// The logo, already at [`LOGO_SIZE`].
    pub fn logo(&self) -> &RgbaImage {
        &self.logo
    }

    pub fn fonts(&self) -> &FontConfig {
        &self.fonts
    }
}
