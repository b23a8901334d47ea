//! Error types for curator-fetch.
//!
//! Every variant carries the reason for the failure; callers record the
//! rendered message as the mapping diagnostic and continue with the next
//! mapping or strategy — fetch failures never abort a run.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from a fetch attempt.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The tool could not be started at all (missing binary, no permission).
    #[error("failed to invoke '{tool}': {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool ran but exited non-zero; stderr becomes the diagnostic.
    #[error("git {step} failed: {stderr}")]
    Command { step: &'static str, stderr: String },

    /// Non-200 response from the remote API.
    #[error("HTTP {status} from {url}")]
    Http { url: String, status: u16 },

    /// Connection-level failure (DNS, TLS, timeout).
    #[error("transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    /// Failure while reading a response body.
    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// The listing endpoint returned something other than a JSON array.
    #[error("unexpected content listing from {url}: expected a JSON array")]
    UnexpectedListing { url: String },

    /// Every file download in the mapping failed (or there were none).
    #[error("no files fetched for '{remote_path}'")]
    NoFilesFetched { remote_path: String },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
