//! Trimmer engine: fetch a page, strip non-essential elements, persist it.
mod clean;
mod fetch;
mod filename;
mod persist;
mod pipeline;
mod types;

pub use clean::{
    clean, is_denylisted, CleanError, CleanOutput, Cleaner, DenylistCleaner, DENYLIST,
};
pub use fetch::{parse_target_url, FetchSettings, Fetcher, ReqwestFetcher};
pub use filename::sanitize_filename;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError, WrittenFile};
pub use pipeline::{PageTrimmer, TrimError, TrimOutcome};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput};
