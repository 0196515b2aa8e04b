//! YouTube thumbnail retrieval.
//!
//! Thumbnails are fetched once per request from a deterministic URL and never
//! stored. The CDN frequently answers with a non-success status while still
//! sending a usable image, so the status alone never fails a fetch: only a
//! transport error (including the timeout) or an undecodable body does.

use std::time::Duration;

use image::RgbaImage;

use crate::entity::Entity;

/// Largest thumbnail body accepted before decoding.
pub const MAX_THUMBNAIL_BYTES: usize = 5_000_000;

/// Why a thumbnail could not be obtained.
#[derive(Debug, thiserror::Error)]
pub enum ThumbnailError {
    /// The entity carries no video identifier to build the URL from.
    #[error("entity has no video id")]
    MissingVideoId,

    /// Connection failure, timeout, or body read error.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body exceeds [`MAX_THUMBNAIL_BYTES`].
    #[error("body of {0} bytes exceeds the size limit")]
    TooLarge(usize),

    /// The body is not a decodable image.
    #[error("body is not an image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Fetches medium-quality video thumbnails over HTTP.
#[derive(Clone, Debug)]
pub struct ThumbnailFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl ThumbnailFetcher {
    /// Create a fetcher whose requests give up after `timeout`.
    ///
    /// `base_url` is the CDN prefix, e.g. `https://img.youtube.com/vi`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Thumbnail URL for a video.
    pub fn url_for(&self, video_id: &str) -> String {
        format!("{}/{video_id}/mqdefault.jpg", self.base_url)
    }

    /// Fetch and decode the thumbnail of `entity` as RGBA.
    pub async fn fetch(&self, entity: &Entity) -> Result<RgbaImage, ThumbnailError> {
        let video_id = entity.video_id().ok_or(ThumbnailError::MissingVideoId)?;
        let url = self.url_for(video_id);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                uid = %entity.uid,
                status = status.as_u16(),
                "thumbnail response has non-success status"
            );
        }

        // Reject on the announced length before reading the body; chunked
        // bodies are checked once buffered.
        if let Some(length) = response.content_length() {
            let length = usize::try_from(length).unwrap_or(usize::MAX);
            if length > MAX_THUMBNAIL_BYTES {
                return Err(ThumbnailError::TooLarge(length));
            }
        }

        let bytes = response.bytes().await?;
        if bytes.len() > MAX_THUMBNAIL_BYTES {
            return Err(ThumbnailError::TooLarge(bytes.len()));
        }

        let thumbnail = image::load_from_memory(&bytes)?;
        tracing::debug!(
            uid = %entity.uid,
            width = thumbnail.width(),
            height = thumbnail.height(),
            "thumbnail fetched"
        );
        Ok(thumbnail.to_rgba8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn url_is_deterministic() {
        let fetcher =
            ThumbnailFetcher::new("https://img.youtube.com/vi/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            fetcher.url_for("dQw4w9WgXcQ"),
            "https://img.youtube.com/vi/dQw4w9WgXcQ/mqdefault.jpg"
        );
    }

    #[tokio::test]
    async fn fetch_success() {
        let base = testing::spawn_thumbnail_server().await;
        let fetcher = ThumbnailFetcher::new(&base, Duration::from_secs(5)).unwrap();
        let thumb = fetcher.fetch(&testing::video("yt:plain", Some(50.0))).await.unwrap();
        assert_eq!(thumb.dimensions(), (320, 180));
        assert_eq!(*thumb.get_pixel(0, 0), testing::THUMBNAIL_COLOR);
    }

    // A 404 carrying image bytes is still a usable thumbnail.
    #[tokio::test]
    async fn fetch_non_success_status_with_image_body() {
        let base = testing::spawn_thumbnail_server().await;
        let fetcher = ThumbnailFetcher::new(&base, Duration::from_secs(5)).unwrap();
        let thumb = fetcher
            .fetch(&testing::video("yt:notfound", Some(50.0)))
            .await
            .unwrap();
        assert_eq!(*thumb.get_pixel(10, 10), testing::THUMBNAIL_COLOR);
    }

    #[tokio::test]
    async fn fetch_garbage_body_is_decode_error() {
        let base = testing::spawn_thumbnail_server().await;
        let fetcher = ThumbnailFetcher::new(&base, Duration::from_secs(5)).unwrap();
        let err = fetcher
            .fetch(&testing::video("yt:garbage", Some(50.0)))
            .await
            .unwrap_err();
        assert!(matches!(err, ThumbnailError::Decode(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn fetch_oversized_body_is_too_large() {
        let base = testing::spawn_thumbnail_server().await;
        let fetcher = ThumbnailFetcher::new(&base, Duration::from_secs(5)).unwrap();
        let err = fetcher
            .fetch(&testing::video("yt:huge", Some(50.0)))
            .await
            .unwrap_err();
        match err {
            ThumbnailError::TooLarge(len) => assert_eq!(len, MAX_THUMBNAIL_BYTES + 1),
            other => panic!("expected TooLarge, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_timeout_is_transport_error() {
        let base = testing::spawn_thumbnail_server().await;
        let fetcher = ThumbnailFetcher::new(&base, Duration::from_millis(200)).unwrap();
        let err = fetcher
            .fetch(&testing::video("yt:slow", Some(50.0)))
            .await
            .unwrap_err();
        match err {
            ThumbnailError::Transport(e) => assert!(e.is_timeout(), "got {e:?}"),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_connection_refused_is_transport_error() {
        // Nothing listens on port 9 of the loopback interface.
        let fetcher =
            ThumbnailFetcher::new("http://127.0.0.1:9/vi", Duration::from_secs(2)).unwrap();
        let err = fetcher
            .fetch(&testing::video("yt:plain", None))
            .await
            .unwrap_err();
        assert!(matches!(err, ThumbnailError::Transport(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn fetch_without_video_id() {
        let fetcher =
            ThumbnailFetcher::new("http://127.0.0.1:9/vi", Duration::from_secs(1)).unwrap();
        let mut entity = testing::video("cand:1", None);
        entity.metadata.video_id = None;
        let err = fetcher.fetch(&entity).await.unwrap_err();
        assert!(matches!(err, ThumbnailError::MissingVideoId));
    }
}
