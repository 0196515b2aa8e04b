//! Rated entities as seen by the preview renderer.

use serde::Deserialize;

/// The only entity type that has a preview of its own.
pub const TYPE_VIDEO: &str = "video";

/// Prefix of YouTube video UIDs (`yt:{video_id}`).
const YOUTUBE_UID_PREFIX: &str = "yt:";

/// A rated entity with its aggregate Tournesol data.
#[derive(Debug, Clone, Deserialize)]
pub struct Entity {
    /// Unique identifier, e.g. `yt:dQw4w9WgXcQ`.
    pub uid: String,
    /// Entity type (`video`, `candidate_fr_2022`, ...).
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Display metadata.
    #[serde(default)]
    pub metadata: EntityMetadata,
    /// Aggregate score, absent until it has been computed.
    #[serde(default)]
    pub tournesol_score: Option<f64>,
    /// Number of comparisons involving this entity.
    #[serde(default)]
    pub rating_n_ratings: u64,
    /// Number of distinct contributors who compared it.
    #[serde(default)]
    pub rating_n_contributors: u64,
}

/// Display metadata of an entity. Both text fields may be empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntityMetadata {
    /// Title.
    #[serde(default)]
    pub name: String,
    /// Channel or author name.
    #[serde(default)]
    pub uploader: String,
    /// YouTube video identifier.
    #[serde(default)]
    pub video_id: Option<String>,
}

/// How a score is presented: the partition every drawing rule branches on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreCategory {
    /// Not computed yet.
    Pending,
    /// Strictly positive.
    Positive(f64),
    /// Zero or negative. NaN also lands here.
    NonPositive(f64),
}

impl ScoreCategory {
    /// Classify an optional score.
    pub fn of(score: Option<f64>) -> Self {
        match score {
            None => Self::Pending,
            Some(value) if value > 0.0 => Self::Positive(value),
            Some(value) => Self::NonPositive(value),
        }
    }
}

impl Entity {
    /// Whether this entity can be rendered as a preview card.
    pub fn is_video(&self) -> bool {
        self.entity_type == TYPE_VIDEO
    }

    /// The YouTube video ID, from the metadata or else from a `yt:` UID.
    pub fn video_id(&self) -> Option<&str> {
        self.metadata
            .video_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .or_else(|| self.uid.strip_prefix(YOUTUBE_UID_PREFIX))
            .filter(|id| !id.is_empty())
    }

    /// Category of this entity's Tournesol score.
    pub fn score_category(&self) -> ScoreCategory {
        ScoreCategory::of(self.tournesol_score)
    }
}
