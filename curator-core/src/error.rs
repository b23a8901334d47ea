//! Error types for curator-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (permission denied, unreadable file, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse configuration at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The configuration file did not exist at the expected path.
    /// There is no valid default configuration.
    #[error("configuration not found at {path}")]
    NotFound { path: PathBuf },
}
