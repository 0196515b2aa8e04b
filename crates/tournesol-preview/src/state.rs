//! Application state shared across all request handlers.
//!
//! Everything here is read-only after startup, so handlers share it without
//! locking.

use std::sync::Arc;

use crate::assets::Assets;
use crate::config::Config;
use crate::store::EntityStore;
use crate::thumbnail::ThumbnailFetcher;

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,

    /// Default preview, logo and fonts.
    pub assets: Arc<Assets>,

    /// Entity lookup backend.
    pub store: EntityStore,

    /// Thumbnail HTTP client.
    pub thumbnails: ThumbnailFetcher,
}

impl AppState {
    /// Create the application state from configuration, loading every static
    /// asset up front.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let assets = Assets::load(&config.resources_dir, &config.font_path)?;

        let store = match &config.entities_file {
            Some(path) => EntityStore::from_json_file(path)?,
            None => EntityStore::clickhouse(&config.clickhouse_url, &config.clickhouse_database),
        };

        let thumbnails =
            ThumbnailFetcher::new(&config.thumbnail_base_url, config.thumbnail_timeout)?;

        tracing::info!(
            static_entities = config.entities_file.is_some(),
            thumbnail_timeout_secs = config.thumbnail_timeout.as_secs(),
            "application state initialized"
        );

        Ok(Self::from_parts(config, assets, store, thumbnails))
    }

    /// Assemble the state from already built parts.
    pub fn from_parts(
        config: Config,
        assets: Assets,
        store: EntityStore,
        thumbnails: ThumbnailFetcher,
    ) -> Self {
        Self {
            config: Arc::new(config),
            assets: Arc::new(assets),
            store,
            thumbnails,
        }
    }
}
