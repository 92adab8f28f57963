//! Child process plumbing: stdout as a byte stream, stderr into the log.

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use futures::future::BoxFuture;
use futures::Stream;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStderr, ChildStdout};
use tokio::task::JoinHandle;
use tokio_util::io::ReaderStream;

/// Keep this many trailing stderr bytes for error reports.
const STDERR_TAIL_BYTES: usize = 2048;

/// Stdout of a running child. Owns the child so that dropping the stream (for example
/// when the HTTP client disconnects) kills the process.
///
/// Once stdout closes the child is reaped; a failed exit is yielded as a final error
/// item so the HTTP body is aborted instead of ending as a truncated success.
pub(crate) struct ChildStream {
    inner: ReaderStream<ChildStdout>,
    child: Option<Child>,
    stderr: Option<JoinHandle<String>>,
    exit_timeout: Duration,
    exit: Option<BoxFuture<'static, io::Result<()>>>,
    finished: bool,
}

impl ChildStream {
    pub(crate) fn new(
        child: Child,
        inner: ReaderStream<ChildStdout>,
        stderr: Option<JoinHandle<String>>,
        exit_timeout: Duration,
    ) -> Self {
        Self {
            inner,
            child: Some(child),
            stderr,
            exit_timeout,
            exit: None,
            finished: false,
        }
    }
}

impl Stream for ChildStream {
    type Item = io::Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.finished {
            return Poll::Ready(None);
        }

        if this.exit.is_none() {
            match ready!(Pin::new(&mut this.inner).poll_next(cx)) {
                Some(item) => return Poll::Ready(Some(item)),
                None => {
                    let child = this.child.take();
                    let stderr = this.stderr.take();
                    this.exit = Some(Box::pin(check_exit(child, stderr, this.exit_timeout)));
                }
            }
        }

        let result = match this.exit.as_mut() {
            Some(exit) => ready!(exit.as_mut().poll(cx)),
            None => Ok(()),
        };
        this.exit = None;
        this.finished = true;

        match result {
            Ok(()) => Poll::Ready(None),
            Err(e) => Poll::Ready(Some(Err(e))),
        }
    }
}

/// Wait for the child after its stdout closed and turn a failed exit into an error.
async fn check_exit(
    child: Option<Child>,
    stderr: Option<JoinHandle<String>>,
    timeout: Duration,
) -> io::Result<()> {
    let Some(mut child) = child else {
        return Ok(());
    };

    // On timeout `child` is dropped here, which kills it.
    let status = tokio::time::timeout(timeout, child.wait())
        .await
        .map_err(|_| {
            io::Error::new(
                io::ErrorKind::TimedOut,
                format!(
                    "yt-dlp did not exit within {}s after closing stdout",
                    timeout.as_secs()
                ),
            )
        })??;

    if status.success() {
        return Ok(());
    }

    let tail = stderr_tail(stderr).await;
    tracing::warn!(status = %status, stderr = %tail, "yt-dlp exited with failure after streaming");
    Err(io::Error::other(format!("yt-dlp exited with {}: {}", status, tail)))
}

/// Await the stderr drain task, if one was started.
pub(crate) async fn stderr_tail(task: Option<JoinHandle<String>>) -> String {
    match task {
        Some(task) => task.await.unwrap_or_default(),
        None => String::new(),
    }
}

/// Forward stderr lines to the log, returning the tail of what was written.
pub(crate) async fn drain_stderr(stderr: ChildStderr) -> String {
    let mut lines = BufReader::new(stderr).lines();
    let mut tail = String::new();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                tracing::debug!(target: "vidgate_extractor::ytdlp", "{}", line);
                tail.push_str(&line);
                tail.push('\n');
                if tail.len() > STDERR_TAIL_BYTES {
                    let mut cut = tail.len() - STDERR_TAIL_BYTES;
                    while !tail.is_char_boundary(cut) {
                        cut += 1;
                    }
                    tail.drain(..cut);
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::debug!(error = %e, "Stopped reading yt-dlp stderr");
                break;
            }
        }
    }

    tail.trim().to_string()
}
