//! Error types for curator-detector.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from stage-state handling.
#[derive(Debug, Error)]
pub enum StageError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error (stage snapshot).
    #[error("stage snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The snapshot file did not exist at the expected path.
    #[error("stage snapshot not found at {path}")]
    SnapshotNotFound { path: PathBuf },
}

/// Convenience constructor for [`StageError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> StageError {
    StageError::Io {
        path: path.into(),
        source,
    }
}
