//! YAML run configuration.
//!
//! ```yaml
//! repository:
//!   owner: example-org
//!   repo: prompt-collection
//!   branch: main
//! mappings:
//!   - remote_path: prompt_sets/core
//!     local_path: .prompts/core
//!     priority: high
//! validation:
//!   required_files: [framework.md]
//!   min_file_count: 2
//! workflow:
//!   status_file: .workflow/status.md
//!   snapshot_file: .workflow/last_stage.json
//! ```
//!
//! A missing or malformed configuration is fatal to the process; there is no
//! default configuration to fall back to.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{RepositoryRef, SyncMapping, ValidationRule, WorkflowPaths};

/// Default configuration path, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "curator.yaml";

/// Root of the run configuration. Read-only for the duration of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub repository: RepositoryRef,
    #[serde(default)]
    pub mappings: Vec<SyncMapping>,
    #[serde(default)]
    pub validation: ValidationRule,
    #[serde(default)]
    pub workflow: WorkflowPaths,
}

impl Config {
    /// Load the configuration from `path`.
    ///
    /// Returns `ConfigError::NotFound` if absent,
    /// `ConfigError::Parse` (with path + line context) if malformed YAML.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Priority;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
repository:
  owner: example-org
  repo: prompt-collection
mappings:
  - remote_path: prompt_sets/core
    local_path: .prompts/core
    priority: high
  - remote_path: prompt_sets/review
    local_path: .prompts/review
validation:
  required_files: [framework.md]
  min_file_count: 2
"#;

    fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("curator.yaml");
        std::fs::write(&path, contents).expect("write config");
        path
    }

    #[test]
    fn load_sample_config() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_config(&dir, SAMPLE);
        let config = Config::load(&path).expect("load");

        assert_eq!(config.repository.slug(), "example-org/prompt-collection");
        assert_eq!(config.repository.branch, "main", "branch defaults to main");
        assert_eq!(config.mappings.len(), 2);
        assert_eq!(config.mappings[0].priority, Priority::High);
        assert_eq!(
            config.mappings[1].priority,
            Priority::Medium,
            "priority defaults to medium"
        );
        assert_eq!(config.validation.min_file_count, 2);
        assert_eq!(config.validation.required_files, vec!["framework.md"]);
    }

    #[test]
    fn workflow_section_is_optional() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_config(&dir, SAMPLE);
        let config = Config::load(&path).expect("load");
        assert_eq!(
            config.workflow.snapshot_file,
            PathBuf::from(".workflow/last_stage.json")
        );
    }

    #[test]
    fn missing_config_returns_not_found() {
        let dir = TempDir::new().expect("tempdir");
        let err = Config::load(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn malformed_yaml_returns_parse_error_with_path() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_config(&dir, "repository: [not, a, mapping");
        let err = Config::load(&path).unwrap_err();
        match err {
            ConfigError::Parse { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
