//! `curator validate` — rule-check synced directories without fetching.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use curator_core::config::DEFAULT_CONFIG_PATH;
use curator_sync::{validate, ValidationCategory, ValidationReport};

use super::load_config;

/// Arguments for `curator validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl ValidateArgs {
    pub fn run(self) -> ExitCode {
        let config = match load_config(&self.config) {
            Ok(config) => config,
            Err(code) => return code,
        };

        let report = validate(&config.mappings, &config.validation);
        if self.json {
            return print_json(&report);
        }
        print_table(&report);
        ExitCode::SUCCESS
    }
}

#[derive(Serialize)]
struct ValidationJson<'a> {
    total_directories: usize,
    validated_directories: usize,
    successful_validations: usize,
    results: &'a [curator_sync::ValidationResult],
}

#[derive(Tabled)]
struct ValidationRow {
    #[tabled(rename = "directory")]
    directory: String,
    #[tabled(rename = "category")]
    category: &'static str,
    #[tabled(rename = "files")]
    files: usize,
    #[tabled(rename = "detail")]
    detail: String,
}

fn print_json(report: &ValidationReport) -> ExitCode {
    let payload = ValidationJson {
        total_directories: report.total_directories,
        validated_directories: report.validated_directories,
        successful_validations: report.successful_validations,
        results: &report.results,
    };
    match serde_json::to_string_pretty(&payload) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize validation JSON: {e}");
            ExitCode::from(super::EXIT_CONFIG)
        }
    }
}

fn print_table(report: &ValidationReport) {
    println!(
        "{}/{} directories passed validation",
        report.successful_validations, report.total_directories
    );
    if report.results.is_empty() {
        println!("No mappings configured.");
        return;
    }

    let rows: Vec<ValidationRow> = report
        .results
        .iter()
        .map(|result| ValidationRow {
            directory: result.path.display().to_string(),
            category: category_label(result.category),
            files: result.file_count,
            detail: result.reasons.join("; "),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

fn category_label(category: ValidationCategory) -> &'static str {
    match category {
        ValidationCategory::Missing => "MISSING",
        ValidationCategory::Invalid => "INVALID",
        ValidationCategory::Validated => "VALIDATED",
    }
}
