//! Video URL validation
//!
//! Accepts the URL shapes a YouTube video can be shared under and reduces them to a
//! [`VideoId`]. Only the canonical watch URL built from that id is ever handed to the
//! extractor, so whatever else the caller put in the URL never reaches the subprocess.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Hosts whose video id lives in the `v` query parameter.
const QUERY_DOMAINS: &[&str] = &[
    "youtube.com",
    "www.youtube.com",
    "m.youtube.com",
    "music.youtube.com",
    "gaming.youtube.com",
];

/// Path prefixes on `youtube.com` whose next segment is the video id.
const ID_PATH_PREFIXES: &[&str] = &["embed", "v", "shorts", "live"];

const ID_LENGTH: usize = 11;

static VIDEO_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("video id regex is valid"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("not a valid URL")]
    Malformed,

    #[error("unsupported scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("'{0}' is not a YouTube domain")]
    NotYouTubeDomain(String),

    #[error("no video id found in URL")]
    MissingVideoId,

    #[error("'{0}' is not a valid video id")]
    InvalidVideoId(String),
}

/// An 11-character YouTube video id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    pub fn parse(candidate: &str) -> Result<Self, UrlError> {
        if VIDEO_ID_REGEX.is_match(candidate) {
            Ok(VideoId(candidate.to_string()))
        } else {
            Err(UrlError::InvalidVideoId(candidate.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL for this id.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validate a user-supplied video URL and extract its id.
pub fn parse_video_url(input: &str) -> Result<VideoId, UrlError> {
    let parsed = Url::parse(input.trim()).map_err(|_| UrlError::Malformed)?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(UrlError::UnsupportedScheme(other.to_string())),
    }

    let host = parsed
        .host_str()
        .map(|h| h.to_ascii_lowercase())
        .ok_or(UrlError::Malformed)?;

    let query_id = parsed
        .query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty());

    let candidate = match query_id {
        Some(id) if QUERY_DOMAINS.contains(&host.as_str()) => id,
        Some(_) => return Err(UrlError::NotYouTubeDomain(host)),
        None => path_video_id(&parsed, &host)?,
    };

    let truncated: String = candidate.chars().take(ID_LENGTH).collect();
    VideoId::parse(&truncated)
}

fn path_video_id(parsed: &Url, host: &str) -> Result<String, UrlError> {
    let mut segments = parsed.path_segments().ok_or(UrlError::MissingVideoId)?;

    let id = match host {
        "youtu.be" => segments.next(),
        "youtube.com" | "www.youtube.com" => match segments.next() {
            Some(prefix) if ID_PATH_PREFIXES.contains(&prefix) => segments.next(),
            _ => None,
        },
        _ if QUERY_DOMAINS.contains(&host) => None,
        _ => return Err(UrlError::NotYouTubeDomain(host.to_string())),
    };

    id.filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or(UrlError::MissingVideoId)
}
