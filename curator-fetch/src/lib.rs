//! # curator-fetch
//!
//! Remote-fetch strategies for mirroring a repository subtree into a local
//! directory. Two strategies implement [`FetchStrategy`]:
//!
//! - [`GitFetcher`] — shallow sparse clone / pull via the `git` tool
//! - [`ContentApiFetcher`] — file-by-file download via the contents API
//!
//! A syncer drives them in priority order; the strategy list is ordered so
//! that adding a further fallback (e.g. a local cache archive) is additive.

pub mod content_api;
pub mod error;
pub mod git;
pub mod strategy;

pub use content_api::ContentApiFetcher;
pub use error::FetchError;
pub use git::{CommandOutput, CommandRunner, GitFetcher, SystemRunner};
pub use strategy::{FetchMethod, FetchStrategy};
