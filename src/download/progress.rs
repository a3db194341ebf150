//! Progress reporting seam for the download step.
//!
//! The reporter is constructed explicitly and passed into the download;
//! nothing here installs process-wide state. [`NoopReporter`] backs quiet
//! runs and tests.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Observer for bytes-transferred progress.
///
/// Purely observational: implementations must never affect control flow.
pub trait ProgressReporter: Send + Sync {
    /// Called once before the first chunk, with the total byte count when
    /// the server advertised one.
    fn start(&self, total_bytes: Option<u64>);

    /// Called after each chunk is written with the chunk's size.
    fn advance(&self, bytes: u64);

    /// Called once when the transfer ends, successfully or not.
    fn finish(&self);
}

/// Reporter that does nothing. Used for `--no-progress`, quiet runs, and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn start(&self, _total_bytes: Option<u64>) {}
    fn advance(&self, _bytes: u64) {}
    fn finish(&self) {}
}

/// Terminal progress bar backed by indicatif.
///
/// Renders a byte-count bar when the total is known and a spinner with a
/// running byte count otherwise.
#[derive(Debug)]
pub struct ProgressBarReporter {
    bar: ProgressBar,
}

impl Default for ProgressBarReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressBarReporter {
    /// Creates a reporter; rendering starts on [`ProgressReporter::start`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::new_spinner(),
        }
    }
}

impl ProgressReporter for ProgressBarReporter {
    fn start(&self, total_bytes: Option<u64>) {
        match total_bytes {
            Some(total) => {
                self.bar.set_length(total);
                self.bar.set_style(
                    ProgressStyle::with_template("{bar:40} {bytes}/{total_bytes} {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar()),
                );
            }
            None => {
                self.bar.set_style(
                    ProgressStyle::with_template("{spinner} {bytes} {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                self.bar.enable_steady_tick(Duration::from_millis(100));
            }
        }
    }

    fn advance(&self, bytes: u64) {
        self.bar.inc(bytes);
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_reporter_is_inert() {
        let reporter = NoopReporter;
        reporter.start(Some(1024));
        reporter.advance(512);
        reporter.advance(512);
        reporter.finish();
    }

    #[test]
    fn test_progress_bar_reporter_full_cycle_with_total() {
        let reporter = ProgressBarReporter::new();
        reporter.start(Some(100));
        reporter.advance(40);
        reporter.advance(60);
        reporter.finish();
    }

    #[test]
    fn test_progress_bar_reporter_without_total_uses_spinner() {
        let reporter = ProgressBarReporter::new();
        reporter.start(None);
        reporter.advance(10);
        reporter.finish();
    }
}
