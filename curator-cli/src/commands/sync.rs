//! `curator sync` — run a full sync pass.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use colored::Colorize;

use curator_core::config::{Config, DEFAULT_CONFIG_PATH};
use curator_detector as detector;
use curator_report as report;
use curator_sync::{sync_all, DirectorySyncer, RunLock};

use super::{load_config, EXIT_CONFIG, EXIT_PARTIAL};

/// Arguments for `curator sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Path to the configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Sync even when the workflow stage has not changed.
    #[arg(long)]
    pub force: bool,

    /// Where to write the markdown report.
    #[arg(long, default_value = report::DEFAULT_REPORT_PATH)]
    pub report: PathBuf,
}

impl SyncArgs {
    pub fn run(self) -> ExitCode {
        let config = match load_config(&self.config) {
            Ok(config) => config,
            Err(code) => return code,
        };

        // One pass at a time; a second invocation bows out instead of
        // interleaving writes with the first.
        let _lock = match RunLock::acquire(&lock_path(&config)) {
            Ok(lock) => lock,
            Err(e) => {
                eprintln!("{} {e}", "error:".red().bold());
                return ExitCode::from(EXIT_CONFIG);
            }
        };

        if !self.force {
            let decision = detector::check(
                &config.workflow.status_file,
                &config.workflow.snapshot_file,
            );
            match decision {
                detector::GateDecision::Skip => {
                    println!("{} stage unchanged, skipping sync", "·".bright_black());
                    return ExitCode::SUCCESS;
                }
                detector::GateDecision::Required(reason) => {
                    println!("{} sync required: {reason}", "→".bold());
                }
            }
        }

        let syncer = DirectorySyncer::with_defaults();
        let summary = sync_all(&config.repository, &config.mappings, &syncer);
        let validation = curator_sync::validate(&config.mappings, &config.validation);

        match report::render(&self.config, &config.repository, &summary, &validation) {
            Ok(content) => {
                print!("{content}");
                match report::write(&self.report, &content) {
                    Ok(()) => println!("report written to {}", self.report.display()),
                    Err(e) => log::warn!("failed to write report: {e}"),
                }
            }
            Err(e) => log::warn!("failed to render report: {e}"),
        }

        // Recording the stage here is what arms the gate for the next run.
        if let Err(e) = detector::refresh_snapshot(
            &config.workflow.status_file,
            &config.workflow.snapshot_file,
        ) {
            log::warn!("failed to refresh stage snapshot: {e}");
        }

        if summary.all_succeeded() {
            println!(
                "{} synced {}/{} mapping(s)",
                "✓".green().bold(),
                summary.succeeded,
                summary.attempted
            );
            ExitCode::SUCCESS
        } else {
            eprintln!(
                "{} synced {}/{} mapping(s), {} rejected",
                "✗".red().bold(),
                summary.succeeded,
                summary.attempted,
                summary.rejected
            );
            ExitCode::from(EXIT_PARTIAL)
        }
    }
}

/// The run lock lives next to the stage snapshot.
fn lock_path(config: &Config) -> PathBuf {
    let mut path = config.workflow.snapshot_file.clone().into_os_string();
    path.push(".lock");
    PathBuf::from(path)
}
