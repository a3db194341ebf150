//! Streaming HTTP download with collision skip.
//!
//! This module owns the third pipeline step: checking the destination
//! directory for a name collision and, absent one, streaming the media
//! body to disk.
//!
//! # Features
//!
//! - Streaming downloads (memory-efficient for large files)
//! - Collision check against the immediate directory listing only
//! - Temp-file write with atomic rename (no truncated survivors)
//! - Structured error types with full context
//! - Pluggable progress reporting with a no-op variant

mod client;
mod error;
mod progress;

pub use client::{MediaClient, SaveOutcome};
pub use error::DownloadError;
pub use progress::{NoopReporter, ProgressBarReporter, ProgressReporter};
