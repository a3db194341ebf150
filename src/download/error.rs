//! Error types for the download module.
//!
//! Structured errors for the media transfer, carrying the URL or path
//! context needed for user feedback. Timeout and redirect exhaustion are
//! distinct variants because the pipeline treats them as recoverable
//! interruptions rather than hard failures.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while saving the media file.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error downloading {url}: {source}")]
    Network {
        /// The URL that failed to download.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request or body stream timed out before completion.
    #[error("timeout downloading {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// The redirect limit was exhausted before reaching the media.
    #[error("too many redirects downloading {url}")]
    TooManyRedirects {
        /// The URL whose redirect chain was too long.
        url: String,
    },

    /// HTTP error response (4xx client errors, 5xx server errors).
    #[error("HTTP {status} downloading {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The destination directory does not exist.
    #[error("destination directory for {path} does not exist: {source}")]
    MissingDirectory {
        /// The file path that could not be created.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Insufficient filesystem permission to create or write the file.
    #[error("insufficient permission to write {path}: {source}")]
    PermissionDenied {
        /// The file path that could not be written.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Any other file system error during the download.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    /// Creates a transfer error from a reqwest error, mapping timeouts and
    /// redirect exhaustion to their dedicated variants.
    pub fn transfer(url: impl Into<String>, source: reqwest::Error) -> Self {
        let url = url.into();
        if source.is_timeout() {
            Self::Timeout { url }
        } else if source.is_redirect() {
            Self::TooManyRedirects { url }
        } else {
            Self::Network { url, source }
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a filesystem error, promoting missing-directory and
    /// permission conditions to their dedicated variants.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::MissingDirectory { path, source },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path, source },
            _ => Self::Io { path, source },
        }
    }

    /// True for failures the pipeline logs and swallows: the transfer was
    /// interrupted, no file was produced, and the run still ends cleanly.
    #[must_use]
    pub fn is_interruption(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::TooManyRedirects { .. })
    }
}
