//! API constants
//!
//! Names and links shown by the documentation index and the OpenAPI document.

pub const API_NAME: &str = "YouTube Download API";

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const API_DESCRIPTION: &str = "A professional API for fetching YouTube video information and downloading content in MP3/MP4 formats";

pub const REPOSITORY_URL: &str = "https://github.com/MatheusIshiyama/youtube-download-api";

/// Video used in the documentation examples.
pub const EXAMPLE_VIDEO_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

/// Path of the served OpenAPI document.
pub const OPENAPI_JSON_PATH: &str = "/api/openapi.json";

/// Path of the RapiDoc viewer.
pub const API_DOCS_PATH: &str = "/api-docs";
