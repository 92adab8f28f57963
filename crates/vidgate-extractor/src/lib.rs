//! Video extraction backends.
//!
//! The HTTP layer only talks to the [`Extractor`] trait. The production backend is
//! [`YtDlpExtractor`], which drives the `yt-dlp` binary as a subprocess.

pub mod error;
pub mod format;
pub mod traits;
pub mod ytdlp;

pub use error::ExtractError;
pub use format::{FormatSelection, ParseQualityError, VideoQuality};
pub use traits::{Extractor, MediaStream};
pub use ytdlp::{YtDlpConfig, YtDlpExtractor};
