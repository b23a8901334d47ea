//! Run-level orchestration: iterate the configured mappings, sync each one,
//! and aggregate the outcomes.

use serde::Serialize;

use curator_core::types::{RepositoryRef, SyncMapping};

use crate::syncer::{DirectorySyncer, FetchOutcome};

/// Aggregated result of one sync pass.
#[derive(Debug, Clone, Serialize)]
pub struct SyncSummary {
    pub outcomes: Vec<FetchOutcome>,
    /// Well-formed mappings that were attempted.
    pub attempted: usize,
    pub succeeded: usize,
    /// Malformed mappings rejected before any fetcher ran.
    pub rejected: usize,
}

impl SyncSummary {
    /// Fraction of attempted mappings that succeeded. Zero when nothing ran.
    pub fn success_ratio(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            self.succeeded as f64 / self.attempted as f64
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.succeeded == self.attempted && self.rejected == 0
    }
}

/// Sync every mapping against `repo`. Malformed mappings are rejected up
/// front and counted; a rejection never aborts the pass.
pub fn sync_all(
    repo: &RepositoryRef,
    mappings: &[SyncMapping],
    syncer: &DirectorySyncer,
) -> SyncSummary {
    let mut outcomes = Vec::with_capacity(mappings.len());
    let mut rejected = 0;

    for mapping in mappings {
        if !mapping.is_wellformed() {
            log::warn!(
                "rejecting malformed mapping '{}' -> '{}'",
                mapping.remote_path,
                mapping.local_path.display()
            );
            rejected += 1;
            continue;
        }
        outcomes.push(syncer.sync(repo, mapping));
    }

    let attempted = outcomes.len();
    let succeeded = outcomes.iter().filter(|o| o.success).count();
    log::info!(
        "sync pass finished: {succeeded}/{attempted} succeeded, {rejected} rejected"
    );
    SyncSummary {
        outcomes,
        attempted,
        succeeded,
        rejected,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use curator_core::types::Priority;
    use curator_fetch::{FetchError, FetchMethod, FetchStrategy};
    use tempfile::TempDir;

    use super::*;

    /// Succeeds for remote paths containing "good", fails otherwise.
    struct SelectiveStrategy;

    impl FetchStrategy for SelectiveStrategy {
        fn method(&self) -> FetchMethod {
            FetchMethod::Git
        }

        fn attempt(&self, _: &RepositoryRef, mapping: &SyncMapping) -> Result<(), FetchError> {
            if mapping.remote_path.contains("good") {
                Ok(())
            } else {
                Err(FetchError::NoFilesFetched {
                    remote_path: mapping.remote_path.clone(),
                })
            }
        }
    }

    fn repo() -> RepositoryRef {
        RepositoryRef {
            owner: "example-org".to_string(),
            repo: "prompt-collection".to_string(),
            branch: "main".to_string(),
            base_url: "https://github.com".to_string(),
        }
    }

    fn mapping(remote: &str, local: PathBuf) -> SyncMapping {
        SyncMapping {
            remote_path: remote.to_string(),
            local_path: local,
            priority: Priority::default(),
        }
    }

    #[test]
    fn empty_mapping_list_is_a_clean_pass() {
        let syncer = DirectorySyncer::new(vec![Box::new(SelectiveStrategy)]);
        let summary = sync_all(&repo(), &[], &syncer);
        assert_eq!(summary.attempted, 0);
        assert_eq!(summary.success_ratio(), 0.0);
        assert!(summary.all_succeeded());
    }

    #[test]
    fn malformed_mappings_are_rejected_not_attempted() {
        let dir = TempDir::new().expect("tempdir");
        let syncer = DirectorySyncer::new(vec![Box::new(SelectiveStrategy)]);
        let mappings = vec![
            mapping("", dir.path().join("a")),
            mapping("good/one", dir.path().join("b")),
        ];
        let summary = sync_all(&repo(), &mappings, &syncer);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.attempted, 1);
        assert_eq!(summary.succeeded, 1);
        assert!(!summary.all_succeeded());
    }

    #[test]
    fn one_failing_mapping_does_not_stop_the_rest() {
        let dir = TempDir::new().expect("tempdir");
        let syncer = DirectorySyncer::new(vec![Box::new(SelectiveStrategy)]);
        let mappings = vec![
            mapping("bad/one", dir.path().join("a")),
            mapping("good/two", dir.path().join("b")),
        ];
        let summary = sync_all(&repo(), &mappings, &syncer);
        assert_eq!(summary.attempted, 2);
        assert_eq!(summary.succeeded, 1);
        assert!((summary.success_ratio() - 0.5).abs() < f64::EPSILON);
        assert!(!summary.outcomes[0].success);
        assert!(summary.outcomes[1].success);
    }
}
