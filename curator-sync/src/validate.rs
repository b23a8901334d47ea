//! Post-sync content validation.
//!
//! Validation is advisory and infallible: directories that cannot be read
//! are classified rather than turned into errors, so a validation pass always
//! produces a complete report.

use std::path::{Path, PathBuf};

use serde::Serialize;

use curator_core::types::{SyncMapping, ValidationRule};

/// Classification of one synced directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationCategory {
    /// The local directory does not exist.
    Missing,
    /// The directory exists but fails at least one content rule.
    Invalid,
    /// All rules hold.
    Validated,
}

/// Per-directory validation verdict.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub path: PathBuf,
    /// Recursive file count; zero when the directory is missing.
    pub file_count: usize,
    /// Required files absent from the directory root.
    pub missing_required: Vec<String>,
    /// Human-readable rule failures, empty when validated.
    pub reasons: Vec<String>,
    pub category: ValidationCategory,
}

/// Aggregated verdicts for a run.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Every configured mapping, well-formed or not.
    pub total_directories: usize,
    /// Directories classified [`ValidationCategory::Validated`].
    pub validated_directories: usize,
    /// Same count as `validated_directories`; both appear in the report.
    pub successful_validations: usize,
    pub results: Vec<ValidationResult>,
}

impl ValidationReport {
    pub fn missing(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results
            .iter()
            .filter(|r| r.category == ValidationCategory::Missing)
    }

    pub fn invalid(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results
            .iter()
            .filter(|r| r.category == ValidationCategory::Invalid)
    }
}

/// Validate every mapping's local directory against `rule`.
pub fn validate(mappings: &[SyncMapping], rule: &ValidationRule) -> ValidationReport {
    let results: Vec<ValidationResult> = mappings
        .iter()
        .map(|m| validate_directory(&m.local_path, rule))
        .collect();

    let successful_validations = results
        .iter()
        .filter(|r| r.category == ValidationCategory::Validated)
        .count();

    ValidationReport {
        total_directories: mappings.len(),
        validated_directories: successful_validations,
        successful_validations,
        results,
    }
}

fn validate_directory(path: &Path, rule: &ValidationRule) -> ValidationResult {
    if !path.is_dir() {
        return ValidationResult {
            path: path.to_path_buf(),
            file_count: 0,
            missing_required: Vec::new(),
            reasons: vec!["directory does not exist".to_string()],
            category: ValidationCategory::Missing,
        };
    }

    let file_count = count_files(path);
    let mut reasons = Vec::new();

    // The two rules are independent; a directory can fail both.
    if file_count < rule.min_file_count {
        reasons.push(format!(
            "{file_count} file(s) found, at least {} required",
            rule.min_file_count
        ));
    }

    let missing_required: Vec<String> = rule
        .required_files
        .iter()
        .filter(|name| !path.join(name).is_file())
        .cloned()
        .collect();
    if !missing_required.is_empty() {
        reasons.push(format!(
            "missing required file(s): {}",
            missing_required.join(", ")
        ));
    }

    let category = if reasons.is_empty() {
        ValidationCategory::Validated
    } else {
        ValidationCategory::Invalid
    };

    ValidationResult {
        path: path.to_path_buf(),
        file_count,
        missing_required,
        reasons,
        category,
    }
}

/// Recursive file count under `dir`. Unreadable subtrees count as empty.
fn count_files(dir: &Path) -> usize {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };
    let mut count = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            count += count_files(&path);
        } else if path.is_file() {
            count += 1;
        }
    }
    count
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
