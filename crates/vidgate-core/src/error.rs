//! Error types module
//!
//! All request failures are unified under [`AppError`]. Each variant describes its own
//! HTTP presentation through [`ErrorMetadata`], so the API layer only has to render it.

use crate::video_url::UrlError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "INVALID_URL")
    fn error_code(&self) -> &'static str;

    /// Short client-facing title, rendered as the `error` field
    fn client_error(&self) -> &'static str;

    /// Client-facing explanation, rendered as the `message` field
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing URL parameter")]
    MissingUrl,

    #[error("Invalid YouTube URL: {0}")]
    InvalidUrl(#[source] UrlError),

    #[error("Invalid quality: {0}")]
    InvalidQuality(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Extraction failed")]
    ExtractionWithSource {
        #[source]
        source: anyhow::Error,
    },

    #[error("Extractor timed out after {seconds}s")]
    ExtractorTimeout { seconds: u64 },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UrlError> for AppError {
    fn from(err: UrlError) -> Self {
        AppError::InvalidUrl(err)
    }
}

const INTERNAL_ERROR: &str = "Internal Server Error";
const INTERNAL_MESSAGE: &str = "An error occurred while processing your request";

/// Static metadata for each variant: (http_status, error_code, client_error, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, &'static str, LogLevel) {
    match err {
        AppError::MissingUrl => (
            400,
            "MISSING_PARAMETER",
            "Missing URL parameter",
            LogLevel::Debug,
        ),
        AppError::InvalidUrl(_) => (400, "INVALID_URL", "Invalid YouTube URL", LogLevel::Debug),
        AppError::InvalidQuality(_) => (
            400,
            "INVALID_QUALITY",
            "Invalid quality parameter",
            LogLevel::Debug,
        ),
        AppError::InvalidInput(_) => (400, "INVALID_INPUT", "Invalid request", LogLevel::Debug),
        AppError::NotFound(_) => (404, "NOT_FOUND", "Not Found", LogLevel::Debug),
        AppError::ExtractionWithSource { .. } => {
            (500, "EXTRACTION_ERROR", INTERNAL_ERROR, LogLevel::Error)
        }
        AppError::ExtractorTimeout { .. } => {
            (500, "EXTRACTOR_TIMEOUT", INTERNAL_ERROR, LogLevel::Warn)
        }
        AppError::Internal(_) => (500, "INTERNAL_ERROR", INTERNAL_ERROR, LogLevel::Error),
    }
}

impl AppError {
    /// Get error type name for logging/debugging
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::MissingUrl => "MissingUrl",
            AppError::InvalidUrl(_) => "InvalidUrl",
            AppError::InvalidQuality(_) => "InvalidQuality",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::NotFound(_) => "NotFound",
            AppError::ExtractionWithSource { .. } => "ExtractionWithSource",
            AppError::ExtractorTimeout { .. } => "ExtractorTimeout",
            AppError::Internal(_) => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn client_error(&self) -> &'static str {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            AppError::MissingUrl => "Please provide a YouTube URL as a query parameter".to_string(),
            AppError::InvalidUrl(_) => {
                "The provided URL is not a valid YouTube video URL".to_string()
            }
            AppError::InvalidQuality(ref value) => format!(
                "Unsupported quality '{}'. Use highest, lowest, highestvideo, lowestvideo, an itag number or a resolution such as 720p",
                value
            ),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::ExtractionWithSource { .. }
            | AppError::ExtractorTimeout { .. }
            | AppError::Internal(_) => INTERNAL_MESSAGE.to_string(),
        }
    }
}
