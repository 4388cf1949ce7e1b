use std::path::PathBuf;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use trimmer_logging::{trimmer_debug, trimmer_info};

use crate::clean::{CleanError, Cleaner, DenylistCleaner};
use crate::fetch::Fetcher;
use crate::filename::sanitize_filename;
use crate::persist::{AtomicFileWriter, PersistError};
use crate::{FailureKind, FetchError};

/// Every way a trim run can end early. All of them are terminal.
#[derive(Debug, Error)]
pub enum TrimError {
    #[error("missing input: expected a URL argument")]
    MissingInput,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{url} responded with http status {status}")]
    HttpStatus { url: String, status: u16 },
    #[error("fetch failed: {0}")]
    Network(#[source] FetchError),
    #[error("cancelled before the page was fetched")]
    Cancelled,
    #[error(transparent)]
    Parse(#[from] CleanError),
    #[error(transparent)]
    FileSystem(#[from] PersistError),
}

impl TrimError {
    fn from_fetch(url: &str, err: FetchError) -> Self {
        match err.kind {
            FailureKind::InvalidUrl => TrimError::InvalidInput(err.message),
            FailureKind::HttpStatus(status) => TrimError::HttpStatus {
                url: url.to_string(),
                status,
            },
            FailureKind::Cancelled => TrimError::Cancelled,
            _ => TrimError::Network(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimOutcome {
    pub url: String,
    pub final_url: String,
    pub path: PathBuf,
    pub bytes_fetched: u64,
    pub bytes_written: u64,
    pub removed_nodes: usize,
}

/// Fetch, clean, name, write. The output file is touched only once the
/// cleaned document exists in memory.
pub struct PageTrimmer {
    fetcher: Box<dyn Fetcher>,
    cleaner: Box<dyn Cleaner>,
    writer: AtomicFileWriter,
}

impl PageTrimmer {
    pub fn new(fetcher: Box<dyn Fetcher>, output_dir: PathBuf) -> Self {
        Self {
            fetcher,
            cleaner: Box::new(DenylistCleaner),
            writer: AtomicFileWriter::new(output_dir),
        }
    }

    pub fn with_cleaner(mut self, cleaner: Box<dyn Cleaner>) -> Self {
        self.cleaner = cleaner;
        self
    }

    pub async fn trim(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<TrimOutcome, TrimError> {
        trimmer_info!("fetching {}", url);
        let fetched = self
            .fetcher
            .fetch(url, cancel)
            .await
            .map_err(|err| TrimError::from_fetch(url, err))?;

        let cleaned = self.cleaner.clean(&fetched.bytes)?;
        trimmer_info!(
            "removed {} element(s), parser-created head included; {} -> {} bytes",
            cleaned.removed_nodes,
            fetched.bytes.len(),
            cleaned.html.len()
        );

        let file_name = sanitize_filename(url);
        trimmer_debug!("writing {} into {}", file_name, self.writer.dir().display());
        let written = self.writer.write(&file_name, &cleaned.html)?;
        trimmer_info!("wrote {}", written.path.display());

        Ok(TrimOutcome {
            url: url.to_string(),
            final_url: fetched.metadata.final_url,
            path: written.path,
            bytes_fetched: fetched.metadata.byte_len,
            bytes_written: written.bytes,
            removed_nodes: cleaned.removed_nodes,
        })
    }
}
