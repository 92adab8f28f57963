//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p vidgate-api`. The router is the production one;
//! only the extractor is replaced by [`FakeExtractor`].

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use bytes::Bytes;
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use vidgate_api::setup::routes;
use vidgate_api::AppState;
use vidgate_core::{Author, Config, Thumbnail, VideoDetails, VideoFormat, VideoInfo};
use vidgate_extractor::{ExtractError, Extractor, FormatSelection, MediaStream};

pub const VIDEO_URL: &str = "https://youtu.be/dQw4w9WgXcQ";
pub const WATCH_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
pub const TITLE: &str = "Rick Astley - Never Gonna Give You Up (Official Video)";
pub const MEDIA_CHUNKS: [&[u8]; 3] = [b"ID3", b"\x00\x01\x02", b"tail"];

/// How the fake should behave.
#[derive(Clone, Copy, Debug, Default)]
pub enum Behavior {
    #[default]
    Succeed,
    FailInfo,
    FailStream,
    TimeoutInfo,
    /// Succeed after sleeping inside `get_info`
    SlowInfo(Duration),
    Unhealthy,
}

/// Calls recorded by the fake.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Info(String),
    Stream(String, FormatSelection),
}

#[derive(Default)]
pub struct FakeExtractor {
    behavior: Behavior,
    calls: Mutex<Vec<Call>>,
}

impl FakeExtractor {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

pub fn sample_info() -> VideoInfo {
    VideoInfo {
        details: VideoDetails {
            video_id: "dQw4w9WgXcQ".to_string(),
            title: TITLE.to_string(),
            description: Some("The official video".to_string()),
            length_seconds: 212,
            view_count: Some(1_600_000_000),
            upload_date: Some("2009-10-25".to_string()),
            author: Author {
                name: "Rick Astley".to_string(),
                channel_url: Some(
                    "https://www.youtube.com/channel/UCuAXFkgsw1L7xaCfnd5JJOw".to_string(),
                ),
                subscriber_count: Some(4_200_000),
            },
            thumbnails: vec![
                Thumbnail {
                    url: "https://i.ytimg.com/vi/dQw4w9WgXcQ/default.jpg".to_string(),
                    width: Some(120),
                    height: Some(90),
                },
                Thumbnail {
                    url: "https://i.ytimg.com/vi/dQw4w9WgXcQ/maxresdefault.jpg".to_string(),
                    width: Some(1280),
                    height: Some(720),
                },
            ],
        },
        formats: vec![
            VideoFormat {
                itag: Some(18),
                format_id: "18".to_string(),
                mime_type: Some("video/mp4; codecs=\"avc1.42001E, mp4a.40.2\"".to_string()),
                container: Some("mp4".to_string()),
                quality: Some("360p".to_string()),
                quality_label: Some("360p".to_string()),
                audio_quality: Some("AUDIO_QUALITY_LOW".to_string()),
                has_video: true,
                has_audio: true,
                url: Some("https://rr1.example/18".to_string()),
            },
            VideoFormat {
                itag: Some(140),
                format_id: "140".to_string(),
                mime_type: Some("audio/mp4; codecs=\"mp4a.40.2\"".to_string()),
                container: Some("m4a".to_string()),
                quality: Some("medium".to_string()),
                quality_label: None,
                audio_quality: Some("AUDIO_QUALITY_MEDIUM".to_string()),
                has_video: false,
                has_audio: true,
                url: Some("https://rr1.example/140".to_string()),
            },
        ],
    }
}

fn process_failure() -> ExtractError {
    ExtractError::ProcessFailed {
        status: "exit status: 1".to_string(),
        stderr: "ERROR: [youtube] dQw4w9WgXcQ: Video unavailable".to_string(),
    }
}

#[async_trait]
impl Extractor for FakeExtractor {
    fn id(&self) -> &'static str {
        "fake"
    }

    async fn get_info(&self, url: &str) -> Result<VideoInfo, ExtractError> {
        self.record(Call::Info(url.to_string()));
        match self.behavior {
            Behavior::FailInfo => Err(process_failure()),
            Behavior::TimeoutInfo => Err(ExtractError::Timeout(Duration::from_secs(30))),
            Behavior::SlowInfo(delay) => {
                tokio::time::sleep(delay).await;
                Ok(sample_info())
            }
            _ => Ok(sample_info()),
        }
    }

    async fn stream(
        &self,
        url: &str,
        selection: FormatSelection,
    ) -> Result<MediaStream, ExtractError> {
        self.record(Call::Stream(url.to_string(), selection));
        match self.behavior {
            Behavior::FailStream => Err(process_failure()),
            _ => {
                let chunks: Vec<io::Result<Bytes>> = MEDIA_CHUNKS
                    .iter()
                    .map(|chunk| Ok(Bytes::from_static(*chunk)))
                    .collect();
                Ok(Box::pin(futures::stream::iter(chunks)))
            }
        }
    }

    async fn health_check(&self) -> Result<(), ExtractError> {
        match self.behavior {
            Behavior::Unhealthy => Err(ExtractError::Spawn {
                binary: "yt-dlp".to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
            }),
            _ => Ok(()),
        }
    }
}

/// Test application: server plus the fake it talks to.
pub struct TestApp {
    pub server: TestServer,
    pub extractor: Arc<FakeExtractor>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn test_config(vars: &[(&str, &str)]) -> Config {
    let mut map: HashMap<String, String> = HashMap::new();
    map.insert(
        "PUBLIC_BASE_URL".to_string(),
        "https://api.example.com".to_string(),
    );
    for (key, value) in vars {
        map.insert(key.to_string(), value.to_string());
    }
    Config::from_map(&map).expect("Failed to build test config")
}

pub fn setup_app_with(behavior: Behavior, config: Config) -> TestApp {
    let extractor = Arc::new(FakeExtractor::new(behavior));
    let state = AppState::new(config.clone(), extractor.clone());
    let router = routes::setup_routes(&config, state).expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp { server, extractor }
}

pub fn setup_test_app() -> TestApp {
    setup_app_with(Behavior::Succeed, test_config(&[]))
}

/// Expected response body of a successful download.
pub fn media_bytes() -> Vec<u8> {
    MEDIA_CHUNKS.concat()
}
