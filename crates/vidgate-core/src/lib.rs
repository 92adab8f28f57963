//! Vidgate Core Library
//!
//! This crate provides the configuration, error taxonomy, video models, URL validation
//! and download naming shared by the extractor and the HTTP API.

pub mod config;
pub mod error;
pub mod filename;
pub mod models;
pub mod video_url;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use filename::{content_disposition, sanitize_title};
pub use models::{Author, Thumbnail, VideoDetails, VideoFormat, VideoInfo};
pub use video_url::{parse_video_url, UrlError, VideoId};
