//! CLI argument definitions using clap derive macros.

use clap::Parser;

/// Fetch NASA's Astronomy Picture of the Day and save it locally.
///
/// apod-fetch retrieves the day's picture metadata and downloads the
/// referenced media file into the current working directory, skipping the
/// download when a file of the same name already exists.
#[derive(Parser, Debug)]
#[command(name = "apod-fetch")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable the download progress bar
    #[arg(long)]
    pub no_progress: bool,
}
