//! Curator core library — domain types, configuration loading, errors.
//!
//! Public API surface:
//! - [`types`] — repository reference, mappings, validation rules
//! - [`config`] — YAML configuration loading
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::ConfigError;
pub use types::{Priority, RepositoryRef, SyncMapping, ValidationRule, WorkflowPaths};
