//! Application configuration loaded from environment variables.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8082").
    pub bind_addr: String,

    /// Directory holding the default preview and the logo.
    pub resources_dir: PathBuf,

    /// TrueType font used for every text role.
    pub font_path: PathBuf,

    /// Thumbnail CDN prefix; thumbnails live at `{base}/{video_id}/mqdefault.jpg`.
    pub thumbnail_base_url: String,

    /// Upper bound for a single thumbnail request.
    pub thumbnail_timeout: Duration,

    /// `Cache-Control` max-age of entity and comparison previews, in seconds.
    pub entity_max_age_secs: u32,

    /// JSON file of entities to serve instead of querying ClickHouse.
    pub entities_file: Option<PathBuf>,

    /// ClickHouse connection URL.
    pub clickhouse_url: String,

    /// ClickHouse database name.
    pub clickhouse_database: String,
}

impl Default for Config {
    fn default() -> Self {
        let resources_dir = PathBuf::from("resources");
        Self {
            bind_addr: "0.0.0.0:8082".to_string(),
            font_path: resources_dir.join("fonts").join("DejaVuSans.ttf"),
            resources_dir,
            thumbnail_base_url: "https://img.youtube.com/vi".to_string(),
            thumbnail_timeout: Duration::from_secs(10),
            entity_max_age_secs: 0,
            entities_file: None,
            clickhouse_url: "http://localhost:8123".to_string(),
            clickhouse_database: "tournesol".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - None (all have defaults for local development)
    ///
    /// Optional:
    /// - `PREVIEW_BIND_ADDR`: Server bind address (default: "0.0.0.0:8082")
    /// - `PREVIEW_RESOURCES_DIR`: Logo and default preview directory (default: "resources")
    /// - `PREVIEW_FONT_PATH`: Font file (default: "{resources}/fonts/DejaVuSans.ttf")
    /// - `PREVIEW_THUMBNAIL_BASE_URL`: Thumbnail CDN prefix (default: "https://img.youtube.com/vi")
    /// - `PREVIEW_THUMBNAIL_TIMEOUT_SECS`: Thumbnail request timeout (default: 10)
    /// - `PREVIEW_ENTITY_MAX_AGE_SECS`: Cache max-age of generated previews (default: 0)
    /// - `PREVIEW_ENTITIES_FILE`: Serve entities from this JSON file instead of ClickHouse
    /// - `CLICKHOUSE_URL`: ClickHouse URL (default: "http://localhost:8123")
    /// - `CLICKHOUSE_DATABASE`: Database name (default: "tournesol")
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let bind_addr = std::env::var("PREVIEW_BIND_ADDR").unwrap_or(defaults.bind_addr);

        let resources_dir = std::env::var("PREVIEW_RESOURCES_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.resources_dir);

        let font_path = std::env::var("PREVIEW_FONT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| resources_dir.join("fonts").join("DejaVuSans.ttf"));

        let thumbnail_base_url = std::env::var("PREVIEW_THUMBNAIL_BASE_URL")
            .unwrap_or(defaults.thumbnail_base_url)
            .trim_end_matches('/')
            .to_string();

        let thumbnail_timeout = Duration::from_secs(parse_var(
            "PREVIEW_THUMBNAIL_TIMEOUT_SECS",
            defaults.thumbnail_timeout.as_secs(),
        )?);
        if thumbnail_timeout.is_zero() {
            anyhow::bail!("PREVIEW_THUMBNAIL_TIMEOUT_SECS must be greater than zero");
        }

        let entity_max_age_secs =
            parse_var("PREVIEW_ENTITY_MAX_AGE_SECS", defaults.entity_max_age_secs)?;

        let entities_file = std::env::var("PREVIEW_ENTITIES_FILE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let clickhouse_url = std::env::var("CLICKHOUSE_URL").unwrap_or(defaults.clickhouse_url);

        let clickhouse_database =
            std::env::var("CLICKHOUSE_DATABASE").unwrap_or(defaults.clickhouse_database);

        tracing::info!(
            bind_addr = %bind_addr,
            resources_dir = %resources_dir.display(),
            font_path = %font_path.display(),
            thumbnail_base_url = %thumbnail_base_url,
            thumbnail_timeout_secs = thumbnail_timeout.as_secs(),
            entity_max_age_secs,
            entities_file = ?entities_file,
            clickhouse_url = %clickhouse_url,
            "preview configuration loaded"
        );

        Ok(Self {
            bind_addr,
            resources_dir,
            font_path,
            thumbnail_base_url,
            thumbnail_timeout,
            entity_max_age_secs,
            entities_file,
            clickhouse_url,
            clickhouse_database,
        })
    }
}

/// Parse an optional numeric variable, falling back to `default` when unset.
fn parse_var<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid {key}={raw:?}: {e}")),
        Err(_) => Ok(default),
    }
}
