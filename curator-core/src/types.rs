//! Domain types for the Curator configuration.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.
//! All types are serializable/deserializable via serde + serde_yaml.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Priority hint for a sync mapping. Affects log/report ordering only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A remote-directory-to-local-directory pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncMapping {
    /// Subtree inside the remote repository (e.g. `prompt_sets/core`).
    pub remote_path: String,
    /// Local mirror directory, created on demand.
    pub local_path: PathBuf,
    #[serde(default)]
    pub priority: Priority,
}

impl SyncMapping {
    /// A mapping is only usable when both paths are non-empty. Mappings that
    /// fail this are rejected before any fetcher runs and excluded from totals.
    pub fn is_wellformed(&self) -> bool {
        !self.remote_path.is_empty() && !self.local_path.as_os_str().is_empty()
    }
}

/// The remote repository all mappings are fetched from. Immutable per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRef {
    pub owner: String,
    pub repo: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Forge web root, e.g. `https://github.com`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl RepositoryRef {
    /// `owner/repo` for logs and reports.
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Clone URL: `<base_url>/<owner>/<repo>.git`.
    pub fn clone_url(&self) -> String {
        format!(
            "{}/{}/{}.git",
            self.base_url.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }

    /// Content-listing endpoint for a repository subtree:
    /// `https://api.<host>/repos/<owner>/<repo>/contents/<path>`.
    ///
    /// The host comes from `base_url`, so self-hosted forges that follow the
    /// same URL scheme work without extra configuration.
    pub fn contents_url(&self, remote_path: &str) -> String {
        format!(
            "https://api.{}/repos/{}/{}/contents/{}",
            self.host(),
            self.owner,
            self.repo,
            remote_path
        )
    }

    fn host(&self) -> &str {
        let trimmed = self.base_url.trim_end_matches('/');
        let without_scheme = trimmed
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(trimmed);
        without_scheme
            .split_once('/')
            .map(|(host, _)| host)
            .unwrap_or(without_scheme)
    }
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_base_url() -> String {
    "https://github.com".to_string()
}

/// Post-sync content requirements, global to the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ValidationRule {
    #[serde(default)]
    pub required_files: Vec<String>,
    #[serde(default)]
    pub min_file_count: usize,
}

/// Locations of the workflow status document and the persisted stage snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowPaths {
    #[serde(default = "default_status_file")]
    pub status_file: PathBuf,
    #[serde(default = "default_snapshot_file")]
    pub snapshot_file: PathBuf,
}

impl Default for WorkflowPaths {
    fn default() -> Self {
        WorkflowPaths {
            status_file: default_status_file(),
            snapshot_file: default_snapshot_file(),
        }
    }
}

fn default_status_file() -> PathBuf {
    PathBuf::from(".workflow/status.md")
}

fn default_snapshot_file() -> PathBuf {
    PathBuf::from(".workflow/last_stage.json")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
