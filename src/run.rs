//! The sequential fetch/resolve/save pipeline.
//!
//! One run moves through fetch, target resolution, and the
//! collision-checked download, then terminates. Transfer interruptions
//! (timeout, redirect exhaustion) are logged and folded into a
//! non-error outcome; every other failure propagates as [`RunError`].

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::api::{ApiError, ApodClient};
use crate::download::{DownloadError, MediaClient, ProgressReporter, SaveOutcome};
use crate::target::{TargetError, resolve_target};

/// Terminal state of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The media file was downloaded and written.
    Downloaded {
        /// Title from the day's metadata.
        title: String,
        /// Name of the written file.
        file_name: String,
        /// Full path of the written file.
        path: std::path::PathBuf,
        /// Bytes written.
        bytes: u64,
    },
    /// A file with the target name already exists; nothing was downloaded.
    AlreadyExists {
        /// The colliding file name.
        file_name: String,
    },
    /// The transfer was interrupted (timeout or redirect exhaustion);
    /// no file was produced and the run still counts as clean.
    TransferAbandoned {
        /// The file that was being downloaded.
        file_name: String,
        /// Human-readable description of the interruption.
        reason: String,
    },
}

/// Failures that terminate the run with an error.
#[derive(Debug, Error)]
pub enum RunError {
    /// Metadata fetch failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The metadata's media URL could not be resolved to a file name.
    #[error(transparent)]
    Target(#[from] TargetError),

    /// The download failed for a non-recoverable reason.
    #[error(transparent)]
    Download(#[from] DownloadError),
}

/// Executes one full run against `dir`.
///
/// # Errors
///
/// Returns [`RunError`] for upstream, parse, and filesystem failures.
/// Transfer interruptions do not error; they produce
/// [`RunOutcome::TransferAbandoned`].
#[instrument(skip_all, fields(dir = %dir.display()))]
pub async fn run(
    api: &ApodClient,
    media: &MediaClient,
    dir: &Path,
    reporter: &dyn ProgressReporter,
) -> Result<RunOutcome, RunError> {
    let record = api.fetch_today().await?;
    info!(
        title = %record.title,
        date = %record.date,
        media_type = %record.media_type,
        "metadata fetched"
    );

    let target = resolve_target(&record, dir)?;
    debug!(file_name = %target.file_name, "target resolved");

    match media.save(record.preferred_url(), &target, reporter).await {
        Ok(SaveOutcome::Saved { path, bytes }) => Ok(RunOutcome::Downloaded {
            title: record.title,
            file_name: target.file_name,
            path,
            bytes,
        }),
        Ok(SaveOutcome::AlreadyExists { file_name }) => {
            Ok(RunOutcome::AlreadyExists { file_name })
        }
        Err(e) if e.is_interruption() => {
            warn!(file_name = %target.file_name, error = %e, "transfer interrupted, no file saved");
            Ok(RunOutcome::TransferAbandoned {
                file_name: target.file_name,
                reason: e.to_string(),
            })
        }
        Err(e) => Err(e.into()),
    }
}
