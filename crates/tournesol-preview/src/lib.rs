//! Tournesol Preview - dynamic Open Graph images for rated entities.
//!
//! This crate provides a lightweight HTTP server that renders PNG preview
//! cards for Tournesol entities: the entity's score, rating counts, uploader
//! and title next to its video thumbnail. It is designed to be placed behind
//! a CDN, which caches responses by URL.
//!
//! # Architecture
//!
//! - **Assets**: default preview, logo and fonts, loaded once at startup
//! - **Store**: entity lookup in ClickHouse, or in a JSON file for development
//! - **Thumbnail**: bounded-timeout fetch of the video thumbnail
//! - **Render**: frame layout, text fitting, logo placement and comparison crops
//! - **Pipeline**: per-request steps with an explicit fallback outcome
//!
//! # URL Pattern
//!
//! ```text
//! GET /preview/default
//! GET /preview/entity/{uid}
//! GET /preview/comparison/{uid_a}/{uid_b}
//! ```
//!
//! Entity and comparison requests always answer with an image: whenever the
//! entity is unknown, is not a video, or its thumbnail cannot be fetched, the
//! default preview is served instead.

pub mod assets;
pub mod config;
pub mod entity;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod routes;
pub mod state;
pub mod store;
pub mod thumbnail;

#[cfg(test)]
pub(crate) mod testing;

pub use config::Config;
pub use routes::router;
pub use state::AppState;
