//! Video metadata returned by an extractor.
//!
//! These types are the extractor-neutral shape the API maps into its JSON responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    pub details: VideoDetails,
    pub formats: Vec<VideoFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    pub video_id: String,
    pub title: String,
    pub description: Option<String>,
    pub length_seconds: u64,
    pub view_count: Option<u64>,
    /// Upload date as `YYYY-MM-DD`
    pub upload_date: Option<String>,
    pub author: Author,
    /// Ordered from lowest to highest quality
    pub thumbnails: Vec<Thumbnail>,
}

impl VideoDetails {
    /// Highest quality thumbnail URL, if any.
    pub fn best_thumbnail(&self) -> Option<&str> {
        self.thumbnails.last().map(|t| t.url.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub name: String,
    pub channel_url: Option<String>,
    pub subscriber_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Thumbnail {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoFormat {
    /// Numeric platform format id, when the format id is one
    pub itag: Option<u32>,
    pub format_id: String,
    /// e.g. `video/mp4; codecs="avc1.4d401e, mp4a.40.2"`
    pub mime_type: Option<String>,
    pub container: Option<String>,
    pub quality: Option<String>,
    /// e.g. `720p`, only for formats carrying video
    pub quality_label: Option<String>,
    /// `AUDIO_QUALITY_LOW`, `AUDIO_QUALITY_MEDIUM` or `AUDIO_QUALITY_HIGH`, only for formats carrying audio
    pub audio_quality: Option<String>,
    pub has_video: bool,
    pub has_audio: bool,
    pub url: Option<String>,
}
