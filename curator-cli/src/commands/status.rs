//! `curator status` — gate decision and recorded workflow stage.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use colored::Colorize;
use serde::Serialize;

use curator_core::config::DEFAULT_CONFIG_PATH;
use curator_detector::{check, format_age, parse_status, snapshot, GateDecision};

use super::load_config;

/// Arguments for `curator status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Path to the configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct StatusJson {
    sync_required: bool,
    reason: Option<String>,
    current_stage: Option<String>,
    recorded_stage: Option<String>,
    snapshot_age: Option<String>,
}

impl StatusArgs {
    pub fn run(self) -> ExitCode {
        let config = match load_config(&self.config) {
            Ok(config) => config,
            Err(code) => return code,
        };

        let decision = check(&config.workflow.status_file, &config.workflow.snapshot_file);

        let current_stage = std::fs::read_to_string(&config.workflow.status_file)
            .ok()
            .and_then(|content| parse_status(&content).stage);
        let recorded = snapshot::load(&config.workflow.snapshot_file).ok();
        let recorded_stage = recorded.as_ref().and_then(|s| s.stage.clone());
        let snapshot_age = recorded.as_ref().map(|s| format_age(s.timestamp));

        if self.json {
            let payload = StatusJson {
                sync_required: decision.is_required(),
                reason: match &decision {
                    GateDecision::Required(reason) => Some(reason.to_string()),
                    GateDecision::Skip => None,
                },
                current_stage,
                recorded_stage,
                snapshot_age,
            };
            match serde_json::to_string_pretty(&payload) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("error: failed to serialize status JSON: {e}");
                    return ExitCode::from(super::EXIT_CONFIG);
                }
            }
            return ExitCode::SUCCESS;
        }

        match &decision {
            GateDecision::Required(reason) => {
                println!("{} sync required: {reason}", "→".bold());
            }
            GateDecision::Skip => {
                println!("{} up to date, sync would be skipped", "✓".green().bold());
            }
        }
        println!(
            "current stage:  {}",
            current_stage.as_deref().unwrap_or("<none>")
        );
        match (recorded_stage.as_deref(), snapshot_age.as_deref()) {
            (Some(stage), Some(age)) => println!("recorded stage: {stage} ({age} ago)"),
            _ => println!("recorded stage: <never recorded>"),
        }
        ExitCode::SUCCESS
    }
}
