pub mod status;
pub mod sync;
pub mod validate;

use std::path::Path;
use std::process::ExitCode;

use colored::Colorize;

use curator_core::config::Config;

/// Exit code for configuration and lock errors: nothing ran.
pub const EXIT_CONFIG: u8 = 2;
/// Exit code for a pass where at least one mapping failed.
pub const EXIT_PARTIAL: u8 = 1;

/// Load the config or print the failure and map it to exit code 2.
pub fn load_config(path: &Path) -> Result<Config, ExitCode> {
    Config::load(path).map_err(|e| {
        eprintln!("{} {e}", "error:".red().bold());
        ExitCode::from(EXIT_CONFIG)
    })
}
