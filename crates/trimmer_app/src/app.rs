use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use trimmer_engine::{FetchSettings, PageTrimmer, ReqwestFetcher, TrimError, TrimOutcome};
use trimmer_logging::{trimmer_debug, trimmer_warn};

use crate::cli::Cli;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Trim(#[from] TrimError),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] io::Error),
}

/// One fetch-clean-write cycle into the current working directory.
pub fn run(cli: Cli) -> Result<TrimOutcome, AppError> {
    let url = cli.url.ok_or(TrimError::MissingInput)?;
    println!("url: {url}");

    let fetcher = ReqwestFetcher::new(FetchSettings::default()).map_err(TrimError::Network)?;
    let trimmer = PageTrimmer::new(Box::new(fetcher), PathBuf::from("."));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(AppError::Runtime)?;

    let cancel = CancellationToken::new();
    runtime.spawn(cancel_on_ctrl_c(cancel.clone()));

    let outcome = runtime.block_on(trimmer.trim(&url, &cancel))?;
    trimmer_debug!(
        "{} -> {} ({} bytes fetched, {} written)",
        outcome.final_url,
        outcome.path.display(),
        outcome.bytes_fetched,
        outcome.bytes_written
    );
    Ok(outcome)
}

async fn cancel_on_ctrl_c(cancel: CancellationToken) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            trimmer_warn!("interrupted; cancelling fetch");
            cancel.cancel();
        }
        Err(err) => trimmer_debug!("ctrl-c handler unavailable: {}", err),
    }
}
