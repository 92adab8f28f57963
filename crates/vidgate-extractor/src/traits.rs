use std::io;
use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use vidgate_core::VideoInfo;

use crate::error::ExtractError;
use crate::format::FormatSelection;

/// Byte stream of a downloaded media file.
pub type MediaStream = Pin<Box<dyn Stream<Item = io::Result<Bytes>> + Send + 'static>>;

/// Core trait for video extractors
///
/// This trait isolates the HTTP layer from the specific extraction method, so handlers
/// can be exercised against an in-process fake.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Returns a unique identifier for this extractor (e.g., "yt-dlp")
    fn id(&self) -> &'static str;

    /// Fetch metadata and the list of available formats for a video URL
    async fn get_info(&self, url: &str) -> Result<VideoInfo, ExtractError>;

    /// Start streaming the selected format.
    ///
    /// Implementations should only return `Ok` once data is flowing, so callers can still
    /// answer with an error status when the download cannot start.
    async fn stream(&self, url: &str, selection: FormatSelection)
        -> Result<MediaStream, ExtractError>;

    /// Check that the backend is usable
    async fn health_check(&self) -> Result<(), ExtractError>;
}
