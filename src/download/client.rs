//! HTTP client for streaming the media file to disk.
//!
//! The [`MediaClient`] performs the collision check against the
//! destination directory's immediate listing, then streams the response
//! body into a `.part` temporary file and renames it onto the final path.
//! A failed stream removes the temporary file, so a truncated download can
//! never satisfy a later collision check.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};

use super::error::DownloadError;
use super::progress::ProgressReporter;
use crate::target::Target;
use crate::user_agent;

/// Default HTTP connect timeout (30 seconds).
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes for large media files).
const READ_TIMEOUT_SECS: u64 = 300;

/// Suffix for the in-flight temporary file.
const PARTIAL_SUFFIX: &str = ".part";

/// Outcome of a collision-checked save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The media file was written to disk.
    Saved {
        /// Final path of the written file.
        path: PathBuf,
        /// Number of bytes written.
        bytes: u64,
    },
    /// An entry with the target name already exists; nothing was requested
    /// or written. A skip, not a failure.
    AlreadyExists {
        /// The colliding file name.
        file_name: String,
    },
}

/// HTTP client for downloading the media file with streaming support.
///
/// Create once per run. The body is copied to disk chunk by chunk, so
/// memory use is bounded regardless of file size.
#[derive(Debug, Clone)]
pub struct MediaClient {
    client: reqwest::Client,
}

impl Default for MediaClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaClient {
    /// Creates a new client with default timeouts.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new() -> Self {
        Self::new_with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a new client with explicit timeout values.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the supplied
    /// timeout configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new_with_timeouts(connect_timeout_secs: u64, read_timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Downloads `url` to the target path unless the name already exists.
    ///
    /// The collision check covers the immediate listing of the target's
    /// directory only, never subdirectories, and runs before any media
    /// request is issued. Progress is reported through `reporter` as each
    /// chunk lands; reporting never affects control flow.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Timeout`] or
    /// [`DownloadError::TooManyRedirects`] when the transfer is
    /// interrupted, [`DownloadError::HttpStatus`] on a non-success
    /// response, [`DownloadError::MissingDirectory`] /
    /// [`DownloadError::PermissionDenied`] / [`DownloadError::Io`] on
    /// filesystem problems, and [`DownloadError::Network`] for other
    /// transport failures.
    #[must_use = "the outcome says whether a file was written or skipped"]
    #[instrument(skip(self, reporter), fields(url = %url, path = %target.path.display()))]
    pub async fn save(
        &self,
        url: &str,
        target: &Target,
        reporter: &dyn ProgressReporter,
    ) -> Result<SaveOutcome, DownloadError> {
        let dir = match target.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        if name_exists(dir, &target.file_name, &target.path).await? {
            info!(file_name = %target.file_name, "file already exists, skipping download");
            return Ok(SaveOutcome::AlreadyExists {
                file_name: target.file_name.clone(),
            });
        }

        debug!("starting download");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::transfer(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }

        let total_bytes = response.content_length();
        debug!(total_bytes = ?total_bytes, "streaming response body");
        reporter.start(total_bytes);

        let temp_path = partial_path(&target.path);
        let stream_result = stream_to_file(response, url, &temp_path, reporter).await;
        reporter.finish();

        let bytes = match stream_result {
            Ok(bytes) => bytes,
            Err(e) => {
                // A truncated .part must not linger on disk
                debug!(path = %temp_path.display(), "removing partial file after error");
                let _ = tokio::fs::remove_file(&temp_path).await;
                return Err(e);
            }
        };

        tokio::fs::rename(&temp_path, &target.path)
            .await
            .map_err(|e| DownloadError::io(&target.path, e))?;

        info!(path = %target.path.display(), bytes, "download complete");
        Ok(SaveOutcome::Saved {
            path: target.path.clone(),
            bytes,
        })
    }
}

/// Checks the immediate directory listing for an entry with this exact name.
async fn name_exists(
    dir: &Path,
    file_name: &str,
    context: &Path,
) -> Result<bool, DownloadError> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| DownloadError::io(context, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| DownloadError::io(context, e))?
    {
        if entry.file_name() == file_name {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Streams the response body to a file, returning bytes written.
///
/// Extracted so the caller can clean up the temporary file on error.
async fn stream_to_file(
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
    reporter: &dyn ProgressReporter,
) -> Result<u64, DownloadError> {
    let file = File::create(file_path)
        .await
        .map_err(|e| DownloadError::io(file_path, e))?;
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::transfer(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path, e))?;

        bytes_written += chunk.len() as u64;
        reporter.advance(chunk.len() as u64);
    }

    // Ensure all data is flushed to disk before the rename
    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path, e))?;

    Ok(bytes_written)
}

/// Sibling path with the partial suffix appended (`img.jpg` → `img.jpg.part`).
fn partial_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(std::ffi::OsString::new, OsStr::to_os_string);
    name.push(PARTIAL_SUFFIX);
    path.with_file_name(name)
}
