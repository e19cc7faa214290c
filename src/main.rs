//! Thin CLI shell around the mediafire-dl library.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use mediafire_dl::{Downloader, MediafireError};

#[derive(Debug, Parser)]
#[command(name = "mediafire-dl", version)]
#[command(about = "Download files and folders from MediaFire share links")]
struct Cli {
    /// MediaFire share URL (file or folder)
    url: String,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Number of parallel downloads
    #[arg(short = 'n', long = "threads", default_value_t = 10)]
    threads: usize,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let downloader = Downloader::new().with_workers(cli.threads);

    // First Ctrl-C sets the token; workers stop at the next checkpoint and
    // the run drains before main returns.
    let cancel = downloader.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Closing all downloads");
            cancel.cancel();
        }
    });

    match downloader.download(&cli.url, &cli.output).await {
        Ok(summary) if summary.interrupted() => {
            info!("Download interrupted");
            ExitCode::SUCCESS
        }
        Ok(summary) => {
            info!(
                "All downloads completed ({} downloaded, {} skipped, {} blocked, {} failed)",
                summary.completed, summary.skipped, summary.blocked, summary.failed
            );
            ExitCode::SUCCESS
        }
        Err(MediafireError::InvalidLink(url)) => {
            error!("Invalid link: {}", url);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
