pub mod docs;
pub mod download;
pub mod info;

use serde::Deserialize;
use utoipa::IntoParams;
use vidgate_core::{parse_video_url, AppError, VideoId};

/// `?url=` query shared by the info and audio endpoints.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VideoQuery {
    /// YouTube video URL (required)
    #[param(example = "https://www.youtube.com/watch?v=dQw4w9WgXcQ")]
    pub url: Option<String>,
}

/// `?url=&quality=` query of the video download endpoints.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VideoDownloadQuery {
    /// YouTube video URL (required)
    #[param(example = "https://www.youtube.com/watch?v=dQw4w9WgXcQ")]
    pub url: Option<String>,
    /// highest (default), lowest, highestvideo, lowestvideo, an itag number or a resolution such as 720p
    #[param(example = "720p")]
    pub quality: Option<String>,
}

/// Resolve the `url` query parameter into a video id.
///
/// Absent and empty values are a missing parameter; anything else must parse.
pub(crate) fn require_video_id(url: Option<&str>) -> Result<VideoId, AppError> {
    match url {
        None | Some("") => Err(AppError::MissingUrl),
        Some(url) => Ok(parse_video_url(url)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_video_id() {
        assert!(matches!(require_video_id(None), Err(AppError::MissingUrl)));
        assert!(matches!(
            require_video_id(Some("")),
            Err(AppError::MissingUrl)
        ));
        assert!(matches!(
            require_video_id(Some("https://example.com/watch?v=dQw4w9WgXcQ")),
            Err(AppError::InvalidUrl(_))
        ));
        let id = require_video_id(Some("https://youtu.be/dQw4w9WgXcQ")).unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }
}
