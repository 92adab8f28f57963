//! Format selection.
//!
//! Maps the `quality` query parameter onto a `yt-dlp` format selector. Video selections
//! prefer the mp4 container and fall back to whatever the site offers.

use std::fmt;
use std::str::FromStr;

/// Requested video quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoQuality {
    /// Best muxed (audio + video) format
    #[default]
    Highest,
    /// Worst muxed format
    Lowest,
    /// Best video-only format
    HighestVideo,
    /// Worst video-only format
    LowestVideo,
    /// A specific platform format id
    Itag(u32),
    /// Best muxed format no taller than the given height
    MaxHeight(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported quality '{0}'")]
pub struct ParseQualityError(pub String);

impl FromStr for VideoQuality {
    type Err = ParseQualityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_ascii_lowercase();
        let err = || ParseQualityError(s.to_string());

        match value.as_str() {
            "" | "highest" => Ok(VideoQuality::Highest),
            "lowest" => Ok(VideoQuality::Lowest),
            "highestvideo" => Ok(VideoQuality::HighestVideo),
            "lowestvideo" => Ok(VideoQuality::LowestVideo),
            _ => {
                if let Some(height) = value.strip_suffix('p') {
                    return parse_positive(height).map(VideoQuality::MaxHeight).ok_or_else(err);
                }
                parse_positive(&value)
                    .map(VideoQuality::Itag)
                    .ok_or_else(err)
            }
        }
    }
}

fn parse_positive(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok().filter(|n| *n > 0)
}

impl fmt::Display for VideoQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoQuality::Highest => f.write_str("highest"),
            VideoQuality::Lowest => f.write_str("lowest"),
            VideoQuality::HighestVideo => f.write_str("highestvideo"),
            VideoQuality::LowestVideo => f.write_str("lowestvideo"),
            VideoQuality::Itag(itag) => write!(f, "{}", itag),
            VideoQuality::MaxHeight(height) => write!(f, "{}p", height),
        }
    }
}

/// What to stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatSelection {
    /// Highest quality audio-only stream
    Audio,
    /// An mp4 video stream of the given quality
    Video(VideoQuality),
}

impl FormatSelection {
    /// `yt-dlp -f` expression for this selection.
    pub fn ytdlp_selector(&self) -> String {
        match self {
            FormatSelection::Audio => "bestaudio[ext=m4a]/bestaudio/best".to_string(),
            FormatSelection::Video(quality) => match quality {
                VideoQuality::Highest => "best[ext=mp4]/best".to_string(),
                VideoQuality::Lowest => "worst[ext=mp4]/worst".to_string(),
                VideoQuality::HighestVideo => "bestvideo[ext=mp4]/bestvideo".to_string(),
                VideoQuality::LowestVideo => "worstvideo[ext=mp4]/worstvideo".to_string(),
                VideoQuality::Itag(itag) => itag.to_string(),
                VideoQuality::MaxHeight(height) => format!(
                    "best[ext=mp4][height<={h}]/best[height<={h}]",
                    h = height
                ),
            },
        }
    }
}
