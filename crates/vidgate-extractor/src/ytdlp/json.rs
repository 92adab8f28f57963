//! `yt-dlp --dump-single-json` output and its mapping onto [`VideoInfo`].

use chrono::NaiveDate;
use serde::Deserialize;
use vidgate_core::{Author, Thumbnail, VideoDetails, VideoFormat, VideoInfo};

#[derive(Debug, Deserialize)]
pub(crate) struct RawVideo {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    view_count: Option<u64>,
    #[serde(default)]
    upload_date: Option<String>,
    #[serde(default)]
    uploader: Option<String>,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    channel_url: Option<String>,
    #[serde(default)]
    uploader_url: Option<String>,
    #[serde(default)]
    channel_follower_count: Option<u64>,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    thumbnails: Option<Vec<RawThumbnail>>,
    #[serde(default)]
    formats: Option<Vec<RawFormat>>,
}

#[derive(Debug, Deserialize)]
struct RawThumbnail {
    url: String,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
    #[serde(default)]
    preference: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawFormat {
    format_id: String,
    #[serde(default)]
    ext: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    protocol: Option<String>,
    #[serde(default)]
    vcodec: Option<String>,
    #[serde(default)]
    acodec: Option<String>,
    #[serde(default)]
    height: Option<u32>,
    #[serde(default)]
    fps: Option<f64>,
    #[serde(default)]
    abr: Option<f64>,
    #[serde(default)]
    format_note: Option<String>,
}

fn real_codec(codec: &Option<String>) -> Option<&str> {
    codec.as_deref().filter(|c| !c.is_empty() && *c != "none")
}

impl RawFormat {
    fn into_format(self) -> VideoFormat {
        let video_codec = real_codec(&self.vcodec).map(str::to_string);
        let audio_codec = real_codec(&self.acodec).map(str::to_string);
        let has_video = video_codec.is_some();
        let has_audio = audio_codec.is_some();

        let mime_type = self.ext.as_deref().and_then(|ext| {
            let (kind, subtype) = if has_video {
                ("video", ext)
            } else if has_audio {
                (
                    "audio",
                    match ext {
                        "m4a" => "mp4",
                        "mp3" => "mpeg",
                        other => other,
                    },
                )
            } else {
                return None;
            };
            let codecs: Vec<String> = video_codec.iter().chain(audio_codec.iter()).cloned().collect();
            Some(format!("{}/{}; codecs=\"{}\"", kind, subtype, codecs.join(", ")))
        });

        let quality_label = if has_video {
            self.height.map(|height| match self.fps {
                Some(fps) if fps > 30.0 => format!("{}p{}", height, fps.round() as u32),
                _ => format!("{}p", height),
            })
        } else {
            None
        };

        let audio_quality = if has_audio {
            self.abr.map(|abr| {
                if abr < 96.0 {
                    "AUDIO_QUALITY_LOW"
                } else if abr < 192.0 {
                    "AUDIO_QUALITY_MEDIUM"
                } else {
                    "AUDIO_QUALITY_HIGH"
                }
                .to_string()
            })
        } else {
            None
        };

        VideoFormat {
            itag: self.format_id.parse().ok(),
            format_id: self.format_id,
            mime_type,
            container: self.ext,
            quality: self.format_note,
            quality_label,
            audio_quality,
            has_video,
            has_audio,
            url: self.url,
        }
    }
}

/// `20091025` -> `2009-10-25`
fn format_upload_date(raw: &str) -> Option<String> {
    NaiveDate::parse_from_str(raw, "%Y%m%d")
        .ok()
        .map(|date| date.format("%Y-%m-%d").to_string())
}

impl From<RawVideo> for VideoInfo {
    fn from(raw: RawVideo) -> Self {
        let mut thumbnails = raw.thumbnails.unwrap_or_default();
        // Stable: equal preferences keep yt-dlp's order.
        thumbnails.sort_by_key(|t| t.preference.unwrap_or(i64::MIN));
        let mut thumbnails: Vec<Thumbnail> = thumbnails
            .into_iter()
            .map(|t| Thumbnail {
                url: t.url,
                width: t.width,
                height: t.height,
            })
            .collect();
        if thumbnails.is_empty() {
            if let Some(url) = raw.thumbnail {
                thumbnails.push(Thumbnail {
                    url,
                    width: None,
                    height: None,
                });
            }
        }

        let formats = raw
            .formats
            .unwrap_or_default()
            .into_iter()
            .filter(|f| f.protocol.as_deref() != Some("mhtml"))
            .map(RawFormat::into_format)
            .collect();

        VideoInfo {
            details: VideoDetails {
                video_id: raw.id,
                title: raw.title.unwrap_or_default(),
                description: raw.description,
                length_seconds: raw.duration.map(|d| d.max(0.0).round() as u64).unwrap_or(0),
                view_count: raw.view_count,
                upload_date: raw.upload_date.as_deref().and_then(format_upload_date),
                author: Author {
                    name: raw.channel.or(raw.uploader).unwrap_or_default(),
                    channel_url: raw.channel_url.or(raw.uploader_url),
                    subscriber_count: raw.channel_follower_count,
                },
                thumbnails,
            },
            formats,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SAMPLE: &str = r#"{
        "id": "dQw4w9WgXcQ",
        "title": "Rick Astley - Never Gonna Give You Up (Official Music Video)",
        "description": "The official video",
        "duration": 212.0,
        "view_count": 1600000000,
        "upload_date": "20091025",
        "uploader": "Rick Astley",
        "channel": "Rick Astley",
        "channel_url": "https://www.youtube.com/channel/UCuAXFkgsw1L7xaCfnd5JJOw",
        "channel_follower_count": 4200000,
        "thumbnail": "https://i.ytimg.com/vi/dQw4w9WgXcQ/maxresdefault.jpg",
        "thumbnails": [
            {"url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/maxresdefault.jpg", "preference": 0, "width": 1280, "height": 720},
            {"url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/default.jpg", "preference": -10, "width": 120, "height": 90}
        ],
        "formats": [
            {"format_id": "sb0", "ext": "mhtml", "protocol": "mhtml", "vcodec": "none", "acodec": "none"},
            {"format_id": "140", "ext": "m4a", "protocol": "https", "vcodec": "none", "acodec": "mp4a.40.2", "abr": 129.5, "format_note": "medium", "url": "https://rr1.example/140"},
            {"format_id": "18", "ext": "mp4", "protocol": "https", "vcodec": "avc1.42001E", "acodec": "mp4a.40.2", "height": 360, "fps": 25, "format_note": "360p", "url": "https://rr1.example/18"},
            {"format_id": "299", "ext": "mp4", "protocol": "https", "vcodec": "avc1.64002a", "acodec": "none", "height": 1080, "fps": 60, "format_note": "1080p60"},
            {"format_id": "hls-720", "ext": "mp4", "protocol": "m3u8_native", "vcodec": "avc1", "acodec": "mp4a", "height": 720}
        ]
    }"#;

    fn sample() -> VideoInfo {
        let raw: RawVideo = serde_json::from_str(SAMPLE).expect("sample parses");
        raw.into()
    }

    #[test]
    fn test_details_mapping() {
        let info = sample();
        let d = &info.details;
        assert_eq!(d.video_id, "dQw4w9WgXcQ");
        assert!(d.title.starts_with("Rick Astley"));
        assert_eq!(d.length_seconds, 212);
        assert_eq!(d.view_count, Some(1_600_000_000));
        assert_eq!(d.upload_date.as_deref(), Some("2009-10-25"));
        assert_eq!(d.author.name, "Rick Astley");
        assert_eq!(d.author.subscriber_count, Some(4_200_000));
        assert!(d.author.channel_url.as_deref().unwrap().contains("/channel/"));
    }

    #[test]
    fn test_thumbnails_sorted_best_last() {
        let info = sample();
        assert_eq!(info.details.thumbnails.len(), 2);
        assert_eq!(
            info.details.best_thumbnail(),
            Some("https://i.ytimg.com/vi/dQw4w9WgXcQ/maxresdefault.jpg")
        );
    }

    #[test]
    fn test_storyboards_are_dropped() {
        let info = sample();
        assert!(info.formats.iter().all(|f| f.format_id != "sb0"));
        assert_eq!(info.formats.len(), 4);
    }

    #[test]
    fn test_audio_only_format() {
        let info = sample();
        let audio = info.formats.iter().find(|f| f.format_id == "140").unwrap();
        assert_eq!(audio.itag, Some(140));
        assert!(audio.has_audio);
        assert!(!audio.has_video);
        assert_eq!(audio.mime_type.as_deref(), Some("audio/mp4; codecs=\"mp4a.40.2\""));
        assert_eq!(audio.audio_quality.as_deref(), Some("AUDIO_QUALITY_MEDIUM"));
        assert_eq!(audio.quality_label, None);
        assert_eq!(audio.quality.as_deref(), Some("medium"));
    }

    #[test]
    fn test_muxed_and_video_only_formats() {
        let info = sample();
        let muxed = info.formats.iter().find(|f| f.format_id == "18").unwrap();
        assert!(muxed.has_audio && muxed.has_video);
        assert_eq!(
            muxed.mime_type.as_deref(),
            Some("video/mp4; codecs=\"avc1.42001E, mp4a.40.2\"")
        );
        assert_eq!(muxed.quality_label.as_deref(), Some("360p"));
        assert_eq!(muxed.container.as_deref(), Some("mp4"));

        let hfr = info.formats.iter().find(|f| f.format_id == "299").unwrap();
        assert!(!hfr.has_audio);
        assert_eq!(hfr.quality_label.as_deref(), Some("1080p60"));
        assert_eq!(hfr.url, None);
    }

    #[test]
    fn test_non_numeric_format_id_has_no_itag() {
        let info = sample();
        let hls = info.formats.iter().find(|f| f.format_id == "hls-720").unwrap();
        assert_eq!(hls.itag, None);
    }

    #[test]
    fn test_minimal_document() {
        let raw: RawVideo = serde_json::from_str(
            r#"{"id": "abcdefghijk", "thumbnail": "https://img.example/t.jpg", "formats": null}"#,
        )
        .unwrap();
        let info: VideoInfo = raw.into();
        assert_eq!(info.details.title, "");
        assert_eq!(info.details.length_seconds, 0);
        assert_eq!(info.details.upload_date, None);
        assert_eq!(info.details.best_thumbnail(), Some("https://img.example/t.jpg"));
        assert!(info.formats.is_empty());
    }

    #[test]
    fn test_bad_upload_date_is_dropped() {
        assert_eq!(format_upload_date("2009-10-25"), None);
        assert_eq!(format_upload_date("20240229").as_deref(), Some("2024-02-29"));
    }
}
