//! Error types for curator-sync.
//!
//! Per-mapping fetch failures are not errors at this level; they are folded
//! into [`crate::FetchOutcome`] diagnostics. `SyncError` covers the run-level
//! conditions that stop a pass before it starts.

use std::path::PathBuf;

use thiserror::Error;

/// Run-level sync errors.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Another sync process holds the run lock.
    #[error("another sync is already running (lock held at {path})")]
    LockHeld { path: PathBuf },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
