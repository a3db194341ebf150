//! CLI entry point for the apod-fetch tool.

use anyhow::Result;
use apod_fetch_core::{
    ApodClient, MediaClient, NoopReporter, ProgressBarReporter, ProgressReporter, RunOutcome, run,
};
use clap::Parser;
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");
    info!("APOD fetcher starting");

    let working_dir = std::env::current_dir()?;

    let api = ApodClient::new();
    let media = MediaClient::new();

    // Progress bars and quiet mode don't mix; tests and piped runs get the no-op
    let reporter: Box<dyn ProgressReporter> = if args.quiet || args.no_progress {
        Box::new(NoopReporter)
    } else {
        Box::new(ProgressBarReporter::new())
    };

    match run(&api, &media, &working_dir, reporter.as_ref()).await? {
        RunOutcome::Downloaded {
            title,
            file_name,
            path,
            bytes,
        } => {
            info!(
                title = %title,
                path = %path.display(),
                bytes,
                "successfully downloaded {file_name}"
            );
        }
        RunOutcome::AlreadyExists { file_name } => {
            info!("file {file_name} already exists, nothing to do");
        }
        RunOutcome::TransferAbandoned { file_name, reason } => {
            info!("transfer of {file_name} abandoned: {reason}");
        }
    }

    Ok(())
}
