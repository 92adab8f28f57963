use std::io;
use std::time::Duration;

use vidgate_core::AppError;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("failed to run {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: io::Error,
    },

    #[error("extractor timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("extractor exited with {status}: {stderr}")]
    ProcessFailed { status: String, stderr: String },

    #[error("extractor produced no data (exit: {status})")]
    EmptyStream { status: String },

    #[error("failed to parse extractor output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("extractor I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Other(String),
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::Timeout(duration) => AppError::ExtractorTimeout {
                seconds: duration.as_secs(),
            },
            other => AppError::ExtractionWithSource {
                source: anyhow::Error::new(other),
            },
        }
    }
}
