//! Curator — mirror curated remote content directories into a local project.
//!
//! # Usage
//!
//! ```text
//! curator sync [--config <path>] [--force] [--report <path>]
//! curator validate [--config <path>] [--json]
//! curator status [--config <path>] [--json]
//! ```
//!
//! # Exit codes
//!
//! - 0: success (including a gate-skipped pass)
//! - 1: partial or complete sync failure
//! - 2: configuration or lock error, nothing ran

mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commands::{status::StatusArgs, sync::SyncArgs, validate::ValidateArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "curator",
    version,
    about = "Sync curated remote content directories into the local project",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a sync pass: fetch every mapping, validate, report.
    Sync(SyncArgs),

    /// Validate already-synced directories without fetching.
    Validate(ValidateArgs),

    /// Show the gate decision and the recorded workflow stage.
    Status(StatusArgs),
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::Validate(args) => args.run(),
        Commands::Status(args) => args.run(),
    }
}
