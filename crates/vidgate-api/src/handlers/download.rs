use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Response, StatusCode},
};
use vidgate_core::{content_disposition, AppError, VideoId};
use vidgate_extractor::{FormatSelection, ParseQualityError, VideoQuality};

use super::{require_video_id, VideoDownloadQuery, VideoQuery};
use crate::error::{ErrorResponse, HttpAppError, ValidatedQuery};
use crate::state::AppState;

const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";
const VIDEO_CONTENT_TYPE: &str = "video/mp4";

/// Fetch the title, start the stream, then answer with download headers and the piped bytes.
///
/// Everything that can fail runs before the response head is built, so failures are still
/// reported as JSON errors.
async fn stream_download(
    state: &AppState,
    video_id: &VideoId,
    selection: FormatSelection,
    content_type: &str,
    extension: &str,
) -> Result<Response<Body>, HttpAppError> {
    let watch_url = video_id.watch_url();

    let info = state.extractor.get_info(&watch_url).await?;
    let disposition = content_disposition(&info.details.title, extension);

    let stream = state.extractor.stream(&watch_url, selection).await?;

    tracing::info!(
        video_id = %video_id,
        selection = ?selection,
        content_disposition = %disposition,
        "Streaming download"
    );

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_DISPOSITION, disposition.as_str())
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}

#[utoipa::path(
    get,
    path = "/mp3",
    tag = "downloads",
    params(VideoQuery),
    responses(
        (status = 200, description = "Audio stream", content_type = "audio/mpeg"),
        (status = 400, description = "Missing or invalid URL", body = ErrorResponse),
        (status = 500, description = "Extraction failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, query), fields(operation = "download_mp3"))]
pub async fn download_mp3(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<VideoQuery>,
) -> Result<Response<Body>, HttpAppError> {
    let video_id = require_video_id(query.url.as_deref())?;

    stream_download(
        &state,
        &video_id,
        FormatSelection::Audio,
        AUDIO_CONTENT_TYPE,
        "mp3",
    )
    .await
}

#[utoipa::path(
    get,
    path = "/mp4",
    tag = "downloads",
    params(VideoDownloadQuery),
    responses(
        (status = 200, description = "Video stream", content_type = "video/mp4"),
        (status = 400, description = "Missing or invalid URL, or unsupported quality", body = ErrorResponse),
        (status = 500, description = "Extraction failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, query), fields(operation = "download_mp4"))]
pub async fn download_mp4(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<VideoDownloadQuery>,
) -> Result<Response<Body>, HttpAppError> {
    let video_id = require_video_id(query.url.as_deref())?;

    let quality = match query.quality.as_deref() {
        Some(quality) => quality
            .parse::<VideoQuality>()
            .map_err(|ParseQualityError(value)| AppError::InvalidQuality(value))?,
        None => VideoQuality::default(),
    };

    stream_download(
        &state,
        &video_id,
        FormatSelection::Video(quality),
        VIDEO_CONTENT_TYPE,
        "mp4",
    )
    .await
}
