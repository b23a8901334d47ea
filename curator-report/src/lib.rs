//! # curator-report
//!
//! Tera-based markdown report for a sync pass: fetch outcomes per mapping
//! plus the validation verdicts, rendered from an embedded template.

pub mod error;

use std::path::Path;

use chrono::Utc;
use tera::Tera;

use curator_core::types::RepositoryRef;
use curator_sync::{SyncSummary, ValidationReport};

pub use error::ReportError;

/// Default report location, relative to the working directory.
pub const DEFAULT_REPORT_PATH: &str = "sync_report.md";

const REPORT_TEMPLATE: &str = include_str!("templates/report.md.tera");
const TEMPLATE_NAME: &str = "report.md.tera";

/// Render the report for one completed pass.
pub fn render(
    config_path: &Path,
    repo: &RepositoryRef,
    summary: &SyncSummary,
    validation: &ValidationReport,
) -> Result<String, ReportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, REPORT_TEMPLATE)?;

    let mut ctx = tera::Context::new();
    ctx.insert("generated_at", &Utc::now().to_rfc3339());
    ctx.insert("config_path", &config_path.display().to_string());
    ctx.insert("repository", &repo.slug());
    ctx.insert("branch", &repo.branch);
    ctx.insert(
        "success_percent",
        &format!("{:.0}", summary.success_ratio() * 100.0),
    );
    ctx.insert("summary", summary);
    ctx.insert("validation", validation);
    let missing: Vec<_> = validation.missing().collect();
    let invalid: Vec<_> = validation.invalid().collect();
    ctx.insert("missing", &missing);
    ctx.insert("invalid", &invalid);

    Ok(tera.render(TEMPLATE_NAME, &ctx)?)
}

/// Atomically write the rendered report to `path`.
pub fn write(path: &Path, content: &str) -> Result<(), ReportError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir).map_err(|e| error::io_err(dir, e))?;
        }
    }
    let tmp = path.with_extension("md.tmp");
    std::fs::write(&tmp, content).map_err(|e| error::io_err(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| error::io_err(path, e))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use curator_fetch::FetchMethod;
    use curator_sync::{FetchOutcome, ValidationCategory, ValidationResult};
    use tempfile::TempDir;

    use super::*;

    fn repo() -> RepositoryRef {
        RepositoryRef {
            owner: "example-org".to_string(),
            repo: "prompt-collection".to_string(),
            branch: "main".to_string(),
            base_url: "https://github.com".to_string(),
        }
    }

    fn summary() -> SyncSummary {
        SyncSummary {
            outcomes: vec![
                FetchOutcome {
                    remote_path: "prompt_sets/core".to_string(),
                    local_path: PathBuf::from("prompts/core"),
                    method: Some(FetchMethod::Git),
                    success: true,
                    diagnostic: None,
                },
                FetchOutcome {
                    remote_path: "prompt_sets/extras".to_string(),
                    local_path: PathBuf::from("prompts/extras"),
                    method: None,
                    success: false,
                    diagnostic: Some("git: clone failed; content-api: HTTP 404".to_string()),
                },
            ],
            attempted: 2,
            succeeded: 1,
            rejected: 0,
        }
    }

    fn validation() -> ValidationReport {
        ValidationReport {
            total_directories: 2,
            validated_directories: 1,
            successful_validations: 1,
            results: vec![
                ValidationResult {
                    path: PathBuf::from("prompts/core"),
                    file_count: 3,
                    missing_required: Vec::new(),
                    reasons: Vec::new(),
                    category: ValidationCategory::Validated,
                },
                ValidationResult {
                    path: PathBuf::from("prompts/extras"),
                    file_count: 0,
                    missing_required: Vec::new(),
                    reasons: vec!["directory does not exist".to_string()],
                    category: ValidationCategory::Missing,
                },
            ],
        }
    }

    #[test]
    fn report_lists_every_outcome_with_method_and_diagnostic() {
        let content =
            render(Path::new("curator.yaml"), &repo(), &summary(), &validation()).expect("render");
        assert!(content.contains("example-org/prompt-collection"));
        assert!(content.contains("1/2 mapping(s) synced (50% success rate)"));
        assert!(content.contains("ok `prompt_sets/core`"));
        assert!(content.contains("via git"));
        assert!(content.contains("FAILED `prompt_sets/extras`"));
        assert!(content.contains("HTTP 404"));
    }

    #[test]
    fn report_has_missing_section_only_when_something_is_missing() {
        let content =
            render(Path::new("curator.yaml"), &repo(), &summary(), &validation()).expect("render");
        assert!(content.contains("### Missing"));
        assert!(content.contains("`prompts/extras`"));
        assert!(!content.contains("### Invalid"));
    }

    #[test]
    fn clean_run_renders_no_failure_sections() {
        let mut v = validation();
        v.results.truncate(1);
        v.total_directories = 1;
        v.successful_validations = 1;
        let mut s = summary();
        s.outcomes.truncate(1);
        s.attempted = 1;
        s.succeeded = 1;

        let content = render(Path::new("curator.yaml"), &repo(), &s, &v).expect("render");
        assert!(content.contains("1/1 mapping(s) synced (100% success rate)"));
        assert!(!content.contains("### Missing"));
        assert!(!content.contains("### Invalid"));
        assert!(!content.contains("FAILED"));
    }

    #[test]
    fn invalid_directories_list_their_reasons() {
        let mut v = validation();
        v.results[1] = ValidationResult {
            path: PathBuf::from("prompts/extras"),
            file_count: 1,
            missing_required: vec!["framework.md".to_string()],
            reasons: vec![
                "1 file(s) found, at least 3 required".to_string(),
                "missing required file(s): framework.md".to_string(),
            ],
            category: ValidationCategory::Invalid,
        };
        let content =
            render(Path::new("curator.yaml"), &repo(), &summary(), &v).expect("render");
        assert!(content.contains("### Invalid"));
        assert!(content.contains("at least 3 required; missing required file(s): framework.md"));
    }

    #[test]
    fn write_is_atomic_and_creates_parents() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("reports").join("sync_report.md");
        write(&path, "# Sync Report\n").expect("write");
        assert_eq!(
            std::fs::read_to_string(&path).expect("read"),
            "# Sync Report\n"
        );
        assert!(!path.with_extension("md.tmp").exists());
    }
}
