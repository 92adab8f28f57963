//! `yt-dlp` subprocess backend.

mod json;
mod process;

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::process::Command;
use tokio_util::io::ReaderStream;
use vidgate_core::{Config, VideoInfo};

use self::json::RawVideo;
use self::process::{drain_stderr, stderr_tail, ChildStream};
use crate::error::ExtractError;
use crate::format::FormatSelection;
use crate::traits::{Extractor, MediaStream};

const STREAM_CHUNK_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub struct YtDlpConfig {
    /// Binary to execute
    pub binary: String,
    /// Arguments placed before every invocation's own arguments
    pub extra_args: Vec<String>,
    /// Limit for an info fetch, for the first byte of a stream and for the exit after
    /// stdout closes
    pub timeout: Duration,
}

impl YtDlpConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            binary: config.ytdlp_path().to_string(),
            extra_args: config.ytdlp_extra_args().to_vec(),
            timeout: config.extractor_timeout(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct YtDlpExtractor {
    config: YtDlpConfig,
}

impl YtDlpExtractor {
    pub fn new(config: YtDlpConfig) -> Self {
        Self { config }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.config.binary);
        cmd.args(&self.config.extra_args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    fn spawn_error(&self, source: std::io::Error) -> ExtractError {
        ExtractError::Spawn {
            binary: self.config.binary.clone(),
            source,
        }
    }
}

#[async_trait]
impl Extractor for YtDlpExtractor {
    fn id(&self) -> &'static str {
        "yt-dlp"
    }

    #[tracing::instrument(skip(self), fields(extractor = "yt-dlp"))]
    async fn get_info(&self, url: &str) -> Result<VideoInfo, ExtractError> {
        let mut cmd = self.command();
        cmd.args([
            "--dump-single-json",
            "--no-playlist",
            "--skip-download",
            "--no-warnings",
            "--",
        ])
        .arg(url);

        let child = cmd.spawn().map_err(|e| self.spawn_error(e))?;
        let output = tokio::time::timeout(self.config.timeout, child.wait_with_output())
            .await
            .map_err(|_| ExtractError::Timeout(self.config.timeout))??;

        if !output.status.success() {
            return Err(ExtractError::ProcessFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let raw: RawVideo = serde_json::from_slice(&output.stdout)?;
        let info = VideoInfo::from(raw);
        tracing::debug!(
            video_id = %info.details.video_id,
            formats = info.formats.len(),
            "Fetched video info"
        );
        Ok(info)
    }

    #[tracing::instrument(skip(self), fields(extractor = "yt-dlp"))]
    async fn stream(
        &self,
        url: &str,
        selection: FormatSelection,
    ) -> Result<MediaStream, ExtractError> {
        let selector = selection.ytdlp_selector();
        let mut cmd = self.command();
        cmd.args(["--no-playlist", "--no-part", "--quiet", "--no-warnings", "-f"])
            .arg(&selector)
            .args(["-o", "-", "--"])
            .arg(url);

        let mut child = cmd.spawn().map_err(|e| self.spawn_error(e))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ExtractError::Other("yt-dlp stdout was not captured".to_string()))?;
        let stderr_task = child.stderr.take().map(|s| tokio::spawn(drain_stderr(s)));

        let mut reader = ReaderStream::with_capacity(stdout, STREAM_CHUNK_BYTES);

        // Dropping `child` on any early return kills the process.
        let first = tokio::time::timeout(self.config.timeout, reader.next())
            .await
            .map_err(|_| ExtractError::Timeout(self.config.timeout))?;

        match first {
            Some(Ok(chunk)) => {
                tracing::debug!(selector = %selector, "yt-dlp stream started");
                let head = futures::stream::once(async move { Ok::<_, std::io::Error>(chunk) });
                let rest = ChildStream::new(child, reader, stderr_task, self.config.timeout);
                Ok(Box::pin(head.chain(rest)))
            }
            Some(Err(e)) => Err(ExtractError::Io(e)),
            None => {
                let status = tokio::time::timeout(self.config.timeout, child.wait())
                    .await
                    .map_err(|_| ExtractError::Timeout(self.config.timeout))??;
                let stderr = stderr_tail(stderr_task).await;
                if status.success() {
                    Err(ExtractError::EmptyStream {
                        status: status.to_string(),
                    })
                } else {
                    Err(ExtractError::ProcessFailed {
                        status: status.to_string(),
                        stderr,
                    })
                }
            }
        }
    }

    async fn health_check(&self) -> Result<(), ExtractError> {
        let mut cmd = self.command();
        cmd.arg("--version");

        let child = cmd.spawn().map_err(|e| self.spawn_error(e))?;
        let output = tokio::time::timeout(self.config.timeout, child.wait_with_output())
            .await
            .map_err(|_| ExtractError::Timeout(self.config.timeout))??;

        if output.status.success() {
            tracing::debug!(
                version = %String::from_utf8_lossy(&output.stdout).trim(),
                "yt-dlp available"
            );
            Ok(())
        } else {
            Err(ExtractError::ProcessFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}
