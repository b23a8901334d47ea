//! # curator-sync
//!
//! Run-level sync engine: drives fetch strategies per mapping, aggregates
//! outcomes, validates the synced directories, and guards the pass with a
//! single-writer run lock.

pub mod error;
pub mod lock;
pub mod orchestrator;
pub mod syncer;
pub mod validate;

pub use error::SyncError;
pub use lock::RunLock;
pub use orchestrator::{sync_all, SyncSummary};
pub use syncer::{DirectorySyncer, FetchOutcome};
pub use validate::{validate, ValidationCategory, ValidationReport, ValidationResult};
