//! HTTP error response conversion
//!
//! This module provides HTTP-specific error response conversion for AppError.
//!
//! **Preferred handler pattern:** Return `Result<impl IntoResponse, HttpAppError>`. Use
//! `AppError` (or types that implement `Into<AppError>`) for errors so they become
//! `HttpAppError` and render consistently (status, body, logging).

use axum::{
    extract::rejection::QueryRejection,
    extract::{FromRequestParts, Query},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use utoipa::ToSchema;
use vidgate_core::{AppError, ErrorMetadata, LogLevel};
use vidgate_extractor::ExtractError;

use crate::middleware::error_details::show_error_details;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Short error title, e.g. "Invalid YouTube URL"
    pub error: String,
    /// Human readable explanation
    pub message: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Error and its causes; omitted in production
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    fn from_app_error(err: &AppError, include_details: bool) -> Self {
        Self {
            error: err.client_error().to_string(),
            message: err.client_message(),
            code: err.error_code().to_string(),
            details: include_details.then(|| err.detailed_message()),
        }
    }
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from vidgate-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<ExtractError> for HttpAppError {
    fn from(err: ExtractError) -> Self {
        HttpAppError(err.into())
    }
}

/// Convert query string deserialization failures into a 400 with our ErrorResponse format.
impl From<QueryRejection> for HttpAppError {
    fn from(rejection: QueryRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid query string: {}",
            rejection.body_text()
        )))
    }
}

/// Query extractor that returns our ErrorResponse format (400 + JSON) on deserialization failure.
/// Use this instead of `Query<T>` so malformed query strings get the same error shape as
/// every other client error.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(inner) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedQuery(inner))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(
                error = %error.detailed_message(),
                error_type = error_type,
                "Error occurred"
            );
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = ErrorResponse::from_app_error(app_error, show_error_details());

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use vidgate_core::UrlError;

    #[test]
    fn test_from_extract_timeout() {
        let HttpAppError(app_err) = ExtractError::Timeout(Duration::from_secs(30)).into();
        match app_err {
            AppError::ExtractorTimeout { seconds } => assert_eq!(seconds, 30),
            _ => panic!("Expected ExtractorTimeout variant"),
        }
    }

    #[test]
    fn test_from_extract_process_failure() {
        let err = ExtractError::ProcessFailed {
            status: "exit status: 1".to_string(),
            stderr: "ERROR: Video unavailable".to_string(),
        };
        let HttpAppError(app_err) = err.into();
        assert_eq!(app_err.http_status_code(), 500);
        assert_eq!(app_err.error_code(), "EXTRACTION_ERROR");
        assert!(app_err.detailed_message().contains("Video unavailable"));
    }

    #[test]
    fn test_error_response_without_details() {
        let response = ErrorResponse::from_app_error(&AppError::MissingUrl, false);
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json["error"], "Missing URL parameter");
        assert_eq!(
            json["message"],
            "Please provide a YouTube URL as a query parameter"
        );
        assert_eq!(json["code"], "MISSING_PARAMETER");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_error_response_with_details() {
        let err = AppError::InvalidUrl(UrlError::MissingVideoId);
        let response = ErrorResponse::from_app_error(&err, true);
        assert_eq!(response.error, "Invalid YouTube URL");
        assert_eq!(response.code, "INVALID_URL");
        let details = response.details.expect("details present");
        assert!(details.contains("Caused by"));
    }

    #[test]
    fn test_internal_errors_use_generic_client_strings() {
        let err = AppError::ExtractionWithSource {
            source: anyhow::anyhow!("yt-dlp exploded"),
        };
        let response = ErrorResponse::from_app_error(&err, false);
        assert_eq!(response.error, "Internal Server Error");
        assert_eq!(
            response.message,
            "An error occurred while processing your request"
        );
        assert!(!response.message.contains("yt-dlp"));
    }
}
