//! Per-mapping sync driver.
//!
//! The syncer owns an ordered list of fetch strategies and walks them until
//! one succeeds. Failures never propagate as errors; they are captured in the
//! returned [`FetchOutcome`] so the run can continue with the next mapping.

use serde::Serialize;

use curator_core::types::{RepositoryRef, SyncMapping};
use curator_fetch::{ContentApiFetcher, FetchError, FetchMethod, FetchStrategy, GitFetcher};

/// The result of syncing one mapping.
#[derive(Debug, Clone, Serialize)]
pub struct FetchOutcome {
    pub remote_path: String,
    pub local_path: std::path::PathBuf,
    /// The strategy that succeeded, or `None` when every strategy failed.
    pub method: Option<FetchMethod>,
    pub success: bool,
    /// Human-readable failure detail, present only when `success` is false.
    pub diagnostic: Option<String>,
}

impl FetchOutcome {
    fn success(mapping: &SyncMapping, method: FetchMethod) -> Self {
        FetchOutcome {
            remote_path: mapping.remote_path.clone(),
            local_path: mapping.local_path.clone(),
            method: Some(method),
            success: true,
            diagnostic: None,
        }
    }

    fn failure(mapping: &SyncMapping, diagnostic: String) -> Self {
        FetchOutcome {
            remote_path: mapping.remote_path.clone(),
            local_path: mapping.local_path.clone(),
            method: None,
            success: false,
            diagnostic: Some(diagnostic),
        }
    }
}

/// Drives fetch strategies, first success wins.
pub struct DirectorySyncer {
    strategies: Vec<Box<dyn FetchStrategy>>,
}

impl DirectorySyncer {
    /// Build a syncer with an explicit strategy order.
    pub fn new(strategies: Vec<Box<dyn FetchStrategy>>) -> Self {
        DirectorySyncer { strategies }
    }

    /// The standard order: git first, content API as fallback.
    pub fn with_defaults() -> Self {
        DirectorySyncer::new(vec![
            Box::new(GitFetcher::new()),
            Box::new(ContentApiFetcher::new()),
        ])
    }

    /// Sync one mapping. Creates the local directory up front, then tries
    /// each strategy in order until one succeeds.
    pub fn sync(&self, repo: &RepositoryRef, mapping: &SyncMapping) -> FetchOutcome {
        if let Err(e) = std::fs::create_dir_all(&mapping.local_path) {
            let err = FetchError::Io {
                path: mapping.local_path.clone(),
                source: e,
            };
            return FetchOutcome::failure(mapping, err.to_string());
        }

        let mut diagnostics = Vec::new();
        for strategy in &self.strategies {
            let method = strategy.method();
            log::debug!("trying {method} for '{}'", mapping.remote_path);
            match strategy.attempt(repo, mapping) {
                Ok(()) => {
                    log::info!("synced '{}' via {method}", mapping.remote_path);
                    return FetchOutcome::success(mapping, method);
                }
                Err(e) => {
                    log::warn!("{method} failed for '{}': {e}", mapping.remote_path);
                    diagnostics.push(format!("{method}: {e}"));
                }
            }
        }
        FetchOutcome::failure(mapping, diagnostics.join("; "))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
