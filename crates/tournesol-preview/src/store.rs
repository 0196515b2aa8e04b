//! Entity lookup backends.
//!
//! Production previews read entities from ClickHouse with a single point
//! lookup by UID. A static, in-memory store loaded from JSON serves local
//! development and tests.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use clickhouse::Client;
use serde::Deserialize;

use crate::entity::{Entity, EntityMetadata};
use crate::error::PreviewError;

/// A row from the `entities` table.
#[derive(Debug, Clone, Deserialize, clickhouse::Row)]
pub struct EntityRow {
    /// Entity UID.
    pub uid: String,
    /// Entity type (the `type` column).
    pub entity_type: String,
    /// Title.
    pub name: String,
    /// Uploader name.
    pub uploader: String,
    /// YouTube video ID, empty for non-video entities.
    pub video_id: String,
    /// Aggregate score, NULL until computed.
    pub tournesol_score: Option<f64>,
    /// Number of comparisons.
    pub rating_n_ratings: u64,
    /// Number of contributors.
    pub rating_n_contributors: u64,
}

impl From<EntityRow> for Entity {
    fn from(row: EntityRow) -> Self {
        Self {
            uid: row.uid,
            entity_type: row.entity_type,
            metadata: EntityMetadata {
                name: row.name,
                uploader: row.uploader,
                video_id: Some(row.video_id).filter(|id| !id.is_empty()),
            },
            tournesol_score: row.tournesol_score,
            rating_n_ratings: row.rating_n_ratings,
            rating_n_contributors: row.rating_n_contributors,
        }
    }
}

/// Where entities are looked up.
#[derive(Clone)]
pub enum EntityStore {
    /// ClickHouse `entities` table.
    ClickHouse(Client),
    /// Fixed set of entities keyed by UID.
    Static(Arc<HashMap<String, Entity>>),
}

impl EntityStore {
    /// Connect to ClickHouse.
    pub fn clickhouse(url: &str, database: &str) -> Self {
        Self::ClickHouse(Client::default().with_url(url).with_database(database))
    }

    /// Build a static store from a list of entities.
    pub fn from_entities(entities: impl IntoIterator<Item = Entity>) -> Self {
        let map = entities
            .into_iter()
            .map(|entity| (entity.uid.clone(), entity))
            .collect();
        Self::Static(Arc::new(map))
    }

    /// Build a static store from a JSON array of entities.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let entities: Vec<Entity> = serde_json::from_str(json)?;
        Ok(Self::from_entities(entities))
    }

    /// Build a static store from a JSON file.
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read {}: {e}", path.display()))?;
        let store = Self::from_json(&json)?;
        if let Self::Static(map) = &store {
            tracing::info!(path = %path.display(), entities = map.len(), "static entity store loaded");
        }
        Ok(store)
    }

    /// Look up an entity by UID.
    pub async fn lookup(&self, uid: &str) -> Result<Option<Entity>, PreviewError> {
        match self {
            Self::ClickHouse(client) => Ok(fetch_entity(client, uid).await?.map(Entity::from)),
            Self::Static(map) => Ok(map.get(uid).cloned()),
        }
    }
}

/// Fetch a single entity by its UID.
pub async fn fetch_entity(client: &Client, uid: &str) -> Result<Option<EntityRow>, PreviewError> {
    let result = client
        .query(
            "SELECT uid, type AS entity_type, name, uploader, video_id, \
             tournesol_score, rating_n_ratings, rating_n_contributors \
             FROM entities \
             WHERE uid = ? \
             LIMIT 1",
        )
        .bind(uid)
        .fetch_optional::<EntityRow>()
        .await?;

    Ok(result)
}
