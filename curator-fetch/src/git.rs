//! Git-based fetch strategy.
//!
//! Pull vs. clone is decided by the presence of `.git` metadata under the
//! mapping's local path:
//!
//! - existing checkout → `git pull origin <branch>` (sparse scope untouched)
//! - fresh directory → shallow, filtered, sparse clone, then
//!   `git sparse-checkout set <remote_path>`
//!
//! The scope-set is a required second step after clone, not a side effect:
//! a clone whose scope-set fails is reported as a failure.

use std::path::Path;
use std::process::Command;

use curator_core::types::{RepositoryRef, SyncMapping};

use crate::error::FetchError;
use crate::strategy::{FetchMethod, FetchStrategy};

// ---------------------------------------------------------------------------
// Command runner seam
// ---------------------------------------------------------------------------

/// Captured result of one tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stderr: String,
}

/// Runs an external tool and captures its exit status and stderr.
///
/// Tests script outputs through this seam to assert command ordering without
/// touching the network.
pub trait CommandRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Path>,
    ) -> Result<CommandOutput, std::io::Error>;
}

/// Real runner backed by `std::process::Command`.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Path>,
    ) -> Result<CommandOutput, std::io::Error> {
        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }
        let output = cmd.output()?;
        Ok(CommandOutput {
            success: output.status.success(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// GitFetcher
// ---------------------------------------------------------------------------

const GIT: &str = "git";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GitAction {
    Pull,
    Clone,
}

fn plan(local_path: &Path) -> GitAction {
    if local_path.join(".git").exists() {
        GitAction::Pull
    } else {
        GitAction::Clone
    }
}

/// Fetches a mapping by driving the `git` tool.
pub struct GitFetcher {
    runner: Box<dyn CommandRunner>,
}

impl GitFetcher {
    pub fn new() -> Self {
        Self::with_runner(Box::new(SystemRunner))
    }

    pub fn with_runner(runner: Box<dyn CommandRunner>) -> Self {
        GitFetcher { runner }
    }

    fn run(
        &self,
        step: &'static str,
        args: &[&str],
        cwd: Option<&Path>,
    ) -> Result<(), FetchError> {
        let output = self
            .runner
            .run(GIT, args, cwd)
            .map_err(|e| FetchError::Spawn {
                tool: GIT.to_string(),
                source: e,
            })?;
        if output.success {
            Ok(())
        } else {
            Err(FetchError::Command {
                step,
                stderr: output.stderr,
            })
        }
    }

    fn pull(&self, repo: &RepositoryRef, mapping: &SyncMapping) -> Result<(), FetchError> {
        self.run(
            "pull",
            &["pull", "origin", &repo.branch],
            Some(&mapping.local_path),
        )?;
        log::info!("git pull ok: {}", mapping.remote_path);
        Ok(())
    }

    fn clone_sparse(&self, repo: &RepositoryRef, mapping: &SyncMapping) -> Result<(), FetchError> {
        let url = repo.clone_url();
        let local = mapping.local_path.to_string_lossy().into_owned();
        self.run(
            "clone",
            &[
                "clone",
                "--filter=tree:0",
                "--sparse",
                "--depth",
                "1",
                "--branch",
                &repo.branch,
                &url,
                &local,
            ],
            None,
        )?;
        // Narrowing the checkout to the mapped subtree is mandatory; a clone
        // without it must not count as success.
        self.run(
            "sparse-checkout",
            &["sparse-checkout", "set", &mapping.remote_path],
            Some(&mapping.local_path),
        )?;
        log::info!("git clone ok: {}", mapping.remote_path);
        Ok(())
    }
}

impl Default for GitFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchStrategy for GitFetcher {
    fn method(&self) -> FetchMethod {
        FetchMethod::Git
    }

    fn attempt(&self, repo: &RepositoryRef, mapping: &SyncMapping) -> Result<(), FetchError> {
        match plan(&mapping.local_path) {
            GitAction::Pull => self.pull(repo, mapping),
            GitAction::Clone => self.clone_sparse(repo, mapping),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
