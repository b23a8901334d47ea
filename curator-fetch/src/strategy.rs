//! The fetch-strategy seam.
//!
//! Strategies are held as an ordered `Vec<Box<dyn FetchStrategy>>` by the
//! syncer and tried until the first success.

use std::fmt;

use serde::Serialize;

use curator_core::types::{RepositoryRef, SyncMapping};

use crate::error::FetchError;

/// Which mechanism fetched (or tried to fetch) a mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchMethod {
    Git,
    ContentApi,
}

impl fmt::Display for FetchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchMethod::Git => write!(f, "git"),
            FetchMethod::ContentApi => write!(f, "content-api"),
        }
    }
}

/// One way of materialising a remote subtree under `mapping.local_path`.
///
/// `attempt` must be self-contained: on failure it returns a [`FetchError`]
/// and must not have poisoned the local directory in a way that prevents the
/// next strategy from running.
pub trait FetchStrategy {
    fn method(&self) -> FetchMethod;

    fn attempt(&self, repo: &RepositoryRef, mapping: &SyncMapping) -> Result<(), FetchError>;
}
