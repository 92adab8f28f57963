use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;
use vidgate_core::{Author, Thumbnail, VideoFormat, VideoInfo};

use super::{require_video_id, VideoQuery};
use crate::error::{ErrorResponse, HttpAppError, ValidatedQuery};
use crate::state::AppState;

/// Detailed video information.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfoResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// Highest quality thumbnail URL
    pub thumbnail: Option<String>,
    /// Length in seconds
    pub duration: u64,
    pub views: Option<u64>,
    /// `YYYY-MM-DD`
    pub upload_date: Option<String>,
    pub author: Author,
    /// Ordered from lowest to highest quality
    pub thumbnails: Vec<Thumbnail>,
    pub formats: Vec<FormatResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormatResponse {
    pub itag: Option<u32>,
    pub mime_type: Option<String>,
    pub quality: Option<String>,
    pub quality_label: Option<String>,
    pub audio_quality: Option<String>,
    pub url: Option<String>,
}

impl From<VideoFormat> for FormatResponse {
    fn from(format: VideoFormat) -> Self {
        Self {
            itag: format.itag,
            mime_type: format.mime_type,
            quality: format.quality,
            quality_label: format.quality_label,
            audio_quality: format.audio_quality,
            url: format.url,
        }
    }
}

impl From<VideoInfo> for VideoInfoResponse {
    fn from(info: VideoInfo) -> Self {
        let details = info.details;
        Self {
            thumbnail: details.best_thumbnail().map(str::to_string),
            id: details.video_id,
            title: details.title,
            description: details.description,
            duration: details.length_seconds,
            views: details.view_count,
            upload_date: details.upload_date,
            author: details.author,
            thumbnails: details.thumbnails,
            formats: info.formats.into_iter().map(FormatResponse::from).collect(),
        }
    }
}

/// Compact video information.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompactInfoResponse {
    pub title: String,
    pub thumbnail: Option<String>,
    pub duration: u64,
    /// Channel name
    pub author: String,
    pub view_count: Option<u64>,
}

impl From<VideoInfo> for CompactInfoResponse {
    fn from(info: VideoInfo) -> Self {
        let details = info.details;
        Self {
            thumbnail: details.best_thumbnail().map(str::to_string),
            title: details.title,
            duration: details.length_seconds,
            author: details.author.name,
            view_count: details.view_count,
        }
    }
}

async fn fetch_info(state: &AppState, url: Option<&str>) -> Result<VideoInfo, HttpAppError> {
    let video_id = require_video_id(url)?;
    tracing::Span::current().record("video_id", video_id.as_str());

    let info = state.extractor.get_info(&video_id.watch_url()).await?;
    Ok(info)
}

#[utoipa::path(
    get,
    path = "/info",
    tag = "videos",
    params(VideoQuery),
    responses(
        (status = 200, description = "Video information", body = VideoInfoResponse),
        (status = 400, description = "Missing or invalid URL", body = ErrorResponse),
        (status = 500, description = "Extraction failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, query),
    fields(video_id = tracing::field::Empty, operation = "get_info")
)]
pub async fn get_info(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<VideoQuery>,
) -> Result<Json<VideoInfoResponse>, HttpAppError> {
    let info = fetch_info(&state, query.url.as_deref()).await?;
    Ok(Json(info.into()))
}

#[utoipa::path(
    get,
    path = "/api/youtube/info",
    tag = "videos",
    params(VideoQuery),
    responses(
        (status = 200, description = "Compact video information", body = CompactInfoResponse),
        (status = 400, description = "Missing or invalid URL", body = ErrorResponse),
        (status = 500, description = "Extraction failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, query),
    fields(video_id = tracing::field::Empty, operation = "get_compact_info")
)]
pub async fn get_compact_info(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<VideoQuery>,
) -> Result<Json<CompactInfoResponse>, HttpAppError> {
    let info = fetch_info(&state, query.url.as_deref()).await?;
    Ok(Json(info.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidgate_core::VideoDetails;

    fn info() -> VideoInfo {
        VideoInfo {
            details: VideoDetails {
                video_id: "dQw4w9WgXcQ".to_string(),
                title: "Never Gonna Give You Up".to_string(),
                description: Some("desc".to_string()),
                length_seconds: 212,
                view_count: Some(42),
                upload_date: Some("2009-10-25".to_string()),
                author: Author {
                    name: "Rick Astley".to_string(),
                    channel_url: None,
                    subscriber_count: Some(7),
                },
                thumbnails: vec![
                    Thumbnail {
                        url: "https://img.example/small.jpg".to_string(),
                        width: None,
                        height: None,
                    },
                    Thumbnail {
                        url: "https://img.example/large.jpg".to_string(),
                        width: None,
                        height: None,
                    },
                ],
            },
            formats: vec![VideoFormat {
                itag: Some(18),
                format_id: "18".to_string(),
                mime_type: Some("video/mp4".to_string()),
                container: Some("mp4".to_string()),
                quality: Some("360p".to_string()),
                quality_label: Some("360p".to_string()),
                audio_quality: Some("AUDIO_QUALITY_LOW".to_string()),
                has_video: true,
                has_audio: true,
                url: Some("https://cdn.example/18".to_string()),
            }],
        }
    }

    #[test]
    fn test_detailed_shape() {
        let json = serde_json::to_value(VideoInfoResponse::from(info())).unwrap();
        assert_eq!(json["id"], "dQw4w9WgXcQ");
        assert_eq!(json["duration"], 212);
        assert_eq!(json["views"], 42);
        assert_eq!(json["uploadDate"], "2009-10-25");
        assert_eq!(json["thumbnail"], "https://img.example/large.jpg");
        assert_eq!(json["author"]["name"], "Rick Astley");
        assert_eq!(json["author"]["subscriberCount"], 7);
        assert_eq!(json["formats"][0]["itag"], 18);
        assert_eq!(json["formats"][0]["qualityLabel"], "360p");
        assert!(json["formats"][0].get("hasVideo").is_none());
    }

    #[test]
    fn test_compact_shape() {
        let json = serde_json::to_value(CompactInfoResponse::from(info())).unwrap();
        assert_eq!(json["title"], "Never Gonna Give You Up");
        assert_eq!(json["thumbnail"], "https://img.example/large.jpg");
        assert_eq!(json["author"], "Rick Astley");
        assert_eq!(json["viewCount"], 42);
        assert_eq!(json.as_object().unwrap().len(), 5);
    }
}
