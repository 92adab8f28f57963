//! OpenAPI documentation.
//! Served as JSON at `/api/openapi.json` and rendered by RapiDoc at `/api-docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use vidgate_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "YouTube Download API",
        description = "API for fetching YouTube video information and downloading content in MP3/MP4 formats. The classic routes (/info, /mp3, /mp4) are also reachable under /api/youtube/*, /api/info and /api/mp4.",
        contact(
            name = "API Support",
            url = "https://github.com/MatheusIshiyama/youtube-download-api"
        )
    ),
    paths(
        // Videos
        handlers::info::get_info,
        handlers::info::get_compact_info,
        // Downloads
        handlers::download::download_mp3,
        handlers::download::download_mp4,
        // Service
        handlers::docs::api_index,
        handlers::docs::service_index,
    ),
    components(
        schemas(
            error::ErrorResponse,
            handlers::info::VideoInfoResponse,
            handlers::info::FormatResponse,
            handlers::info::CompactInfoResponse,
            handlers::docs::ApiIndex,
            handlers::docs::IndexEndpoints,
            handlers::docs::EndpointDoc,
            handlers::docs::ServiceIndex,
            handlers::docs::ServiceEndpoints,
            models::Author,
            models::Thumbnail,
        )
    ),
    tags(
        (name = "videos", description = "Video metadata"),
        (name = "downloads", description = "Audio and video downloads"),
        (name = "service", description = "Service discovery")
    )
)]
pub struct ApiDoc;
