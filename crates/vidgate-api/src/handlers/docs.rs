//! Self-describing index endpoints.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::constants::{
    API_DESCRIPTION, API_DOCS_PATH, API_NAME, API_VERSION, EXAMPLE_VIDEO_URL, REPOSITORY_URL,
};
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiIndex {
    pub api: String,
    pub version: String,
    pub description: String,
    pub endpoints: IndexEndpoints,
    pub note: String,
    pub repository: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IndexEndpoints {
    pub info: EndpointDoc,
    pub mp3: EndpointDoc,
    pub mp4: EndpointDoc,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EndpointDoc {
    /// URL template
    pub url: String,
    pub description: String,
    /// Query parameter name to description
    pub parameters: BTreeMap<String, String>,
    pub example: String,
}

impl EndpointDoc {
    fn new(base_url: &str, path: &str, description: &str, with_quality: bool) -> Self {
        let mut parameters = BTreeMap::new();
        parameters.insert("url".to_string(), "YouTube video URL (required)".to_string());
        if with_quality {
            parameters.insert(
                "quality".to_string(),
                "highest (default), lowest, highestvideo, lowestvideo, an itag or a resolution such as 720p (optional)"
                    .to_string(),
            );
        }

        Self {
            url: format!("{}{}?url={{youtube_url}}", base_url, path),
            description: description.to_string(),
            parameters,
            example: format!("{}{}?url={}", base_url, path, EXAMPLE_VIDEO_URL),
        }
    }
}

/// Serverless-style index listing the `/api/youtube` routes.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceIndex {
    pub message: String,
    pub endpoints: ServiceEndpoints,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceEndpoints {
    pub info: String,
    pub mp3: String,
    pub mp4: String,
    pub docs: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "service",
    responses((status = 200, description = "API documentation index", body = ApiIndex))
)]
pub async fn api_index(State(state): State<Arc<AppState>>) -> Json<ApiIndex> {
    let base_url = state.config.public_base_url();

    Json(ApiIndex {
        api: API_NAME.to_string(),
        version: API_VERSION.to_string(),
        description: API_DESCRIPTION.to_string(),
        endpoints: IndexEndpoints {
            info: EndpointDoc::new(
                base_url,
                "/info",
                "Get video information (title, thumbnail, etc.)",
                false,
            ),
            mp3: EndpointDoc::new(base_url, "/mp3", "Download audio in MP3 format", false),
            mp4: EndpointDoc::new(base_url, "/mp4", "Download video in MP4 format", true),
        },
        note: "All endpoints require a valid YouTube URL as a query parameter".to_string(),
        repository: REPOSITORY_URL.to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/api",
    tag = "service",
    responses((status = 200, description = "Endpoint listing", body = ServiceIndex))
)]
#[tracing::instrument]
pub async fn service_index() -> Json<ServiceIndex> {
    tracing::debug!(at = %chrono::Utc::now().to_rfc3339(), "Ping");

    Json(ServiceIndex {
        message: "YouTube API Service".to_string(),
        endpoints: ServiceEndpoints {
            info: "/api/youtube/info?url=YOUTUBE_URL".to_string(),
            mp3: "/api/youtube/mp3?url=YOUTUBE_URL".to_string(),
            mp4: "/api/youtube/mp4?url=YOUTUBE_URL".to_string(),
            docs: API_DOCS_PATH.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_doc_urls() {
        let doc = EndpointDoc::new("https://api.example.com", "/mp4", "Download", true);
        assert_eq!(doc.url, "https://api.example.com/mp4?url={youtube_url}");
        assert_eq!(
            doc.example,
            "https://api.example.com/mp4?url=https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
        assert!(doc.parameters.contains_key("quality"));

        let doc = EndpointDoc::new("https://api.example.com", "/info", "Info", false);
        assert_eq!(doc.parameters.len(), 1);
    }
}
