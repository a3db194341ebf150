//! Metadata retrieval from the APOD API mirror.
//!
//! The [`ApodClient`] issues a single GET against the fixed endpoint and
//! parses the JSON body into a [`MediaRecord`]. There are no retries; a
//! non-success status or an unparseable body ends the run.

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::user_agent;

/// Fixed metadata endpoint (ellanan's APOD API mirror).
const DEFAULT_API_URL: &str = "https://apod.ellanan.com/api";

/// HTTP connect timeout for the metadata request (30 seconds).
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// HTTP read timeout for the metadata request (60 seconds; the body is small).
const READ_TIMEOUT_SECS: u64 = 60;

/// Parsed metadata for one day's picture.
///
/// Constructed once per run from the API response, read-only afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaRecord {
    pub title: String,
    pub explanation: String,
    /// Calendar date as returned by the API (e.g. `2026-08-07`).
    pub date: String,
    /// `"image"` or `"video"`; informational only, never gates the download.
    pub media_type: String,
    /// Standard-definition media URL. Always present.
    pub url: String,
    /// High-definition media URL. Preferred when present and non-empty.
    pub hdurl: Option<String>,
    pub copyright: Option<String>,
    pub credit: Option<String>,
    pub service_version: String,
}

impl MediaRecord {
    /// The URL the media should be downloaded from: `hdurl` when it is
    /// present and non-empty, otherwise `url`.
    #[must_use]
    pub fn preferred_url(&self) -> &str {
        match self.hdurl.as_deref() {
            Some(hd) if !hd.is_empty() => hd,
            _ => &self.url,
        }
    }
}

/// Errors from the metadata fetch.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (DNS, connect, TLS, timeout).
    #[error("network error fetching metadata from {url}: {source}")]
    Network {
        /// The endpoint that failed.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-success HTTP status.
    #[error("HTTP {status} fetching metadata from {url}")]
    Upstream {
        /// The endpoint that returned the status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The body could not be parsed as a [`MediaRecord`].
    #[error("malformed metadata from {url}: {source}")]
    Parse {
        /// The endpoint that returned the body.
        url: String,
        /// The underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an upstream status error.
    pub fn upstream(url: impl Into<String>, status: u16) -> Self {
        Self::Upstream {
            url: url.into(),
            status,
        }
    }

    /// Creates a parse error.
    pub fn parse(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Parse {
            url: url.into(),
            source,
        }
    }
}

/// HTTP client for the metadata endpoint.
///
/// Create once per run; the endpoint is fixed. [`ApodClient::with_endpoint`]
/// exists so tests can point the client at a mock server.
#[derive(Debug, Clone)]
pub struct ApodClient {
    client: reqwest::Client,
    endpoint: String,
}

impl Default for ApodClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApodClient {
    /// Creates a client targeting the fixed APOD endpoint.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_API_URL)
    }

    /// Creates a client targeting a custom endpoint (for testing).
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(std::time::Duration::from_secs(READ_TIMEOUT_SECS))
            .user_agent(user_agent::default_user_agent())
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Fetches the day's metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] on transport failure,
    /// [`ApiError::Upstream`] on a non-success status, and
    /// [`ApiError::Parse`] when the body does not match the
    /// [`MediaRecord`] schema.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn fetch_today(&self) -> Result<MediaRecord, ApiError> {
        debug!("fetching metadata");

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| ApiError::network(&self.endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::upstream(&self.endpoint, status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::network(&self.endpoint, e))?;

        let record: MediaRecord =
            serde_json::from_str(&body).map_err(|e| ApiError::parse(&self.endpoint, e))?;

        debug!(title = %record.title, date = %record.date, "metadata parsed");
        Ok(record)
    }
}
