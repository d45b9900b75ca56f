use std::path::PathBuf;
use thiserror::Error;

/// Conditions that stop a scan outright.
///
/// Everything else (unreadable files, unresolved imports, odd filter values)
/// degrades to absence in the report instead of surfacing here.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The root is missing or is not a directory
    #[error("scan root not found or not a directory: {}", .0.display())]
    NoRoot(PathBuf),

    /// Cancellation was requested and the caller asked for no partial report
    #[error("scan cancelled")]
    Cancelled,

    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
