//! Error types for curator-report.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while rendering or writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Template rendering failed.
    #[error("report template error: {0}")]
    Template(#[from] tera::Error),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`ReportError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ReportError {
    ReportError::Io {
        path: path.into(),
        source,
    }
}
