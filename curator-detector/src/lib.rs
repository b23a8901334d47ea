//! # curator-detector
//!
//! Edge-triggered gate: decides whether a sync pass should run by comparing
//! the stage recorded in the workflow status document against the persisted
//! snapshot from the previous completed pass.
//!
//! Decision rules:
//! 1. No status document yet → sync required
//! 2. No persisted snapshot yet → sync required
//! 3. Stripped current stage ≠ stripped persisted stage → sync required
//! 4. Otherwise → skip
//!
//! Any read or parse failure resolves to "sync required" — an unnecessary
//! re-sync is recoverable, a silently skipped one is not.

pub mod error;
pub mod snapshot;
pub mod status;

use std::fmt;
use std::path::Path;

pub use error::StageError;
pub use snapshot::{format_age, StageSnapshot};
pub use status::{parse_status, strip_annotation, StatusFields};

// ---------------------------------------------------------------------------
// Gate decision
// ---------------------------------------------------------------------------

/// Why a sync pass is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateReason {
    /// The status document does not exist yet.
    StatusMissing,
    /// No snapshot has been persisted yet (first run).
    SnapshotMissing,
    /// The recorded stage differs from the current one (annotations stripped).
    StageChanged {
        from: Option<String>,
        to: Option<String>,
    },
    /// Status or snapshot could not be read/parsed; fail toward re-sync.
    Unreadable(String),
}

impl fmt::Display for GateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateReason::StatusMissing => write!(f, "no status document; initial sync"),
            GateReason::SnapshotMissing => write!(f, "no persisted stage snapshot; first run"),
            GateReason::StageChanged { from, to } => write!(
                f,
                "stage changed: {} -> {}",
                from.as_deref().unwrap_or("<none>"),
                to.as_deref().unwrap_or("<none>")
            ),
            GateReason::Unreadable(detail) => write!(f, "stage state unreadable: {detail}"),
        }
    }
}

/// Outcome of the gate check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Required(GateReason),
    Skip,
}

impl GateDecision {
    pub fn is_required(&self) -> bool {
        matches!(self, GateDecision::Required(_))
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Decide whether a sync pass should run.
///
/// Strictly edge-triggered: repeated calls with an unchanged status document
/// and snapshot return [`GateDecision::Skip`] every time.
pub fn check(status_file: &Path, snapshot_file: &Path) -> GateDecision {
    if !status_file.exists() {
        return GateDecision::Required(GateReason::StatusMissing);
    }
    let content = match std::fs::read_to_string(status_file) {
        Ok(content) => content,
        Err(e) => return GateDecision::Required(GateReason::Unreadable(e.to_string())),
    };
    let current = parse_status(&content).stage;

    if !snapshot_file.exists() {
        return GateDecision::Required(GateReason::SnapshotMissing);
    }
    let last = match snapshot::load(snapshot_file) {
        Ok(snapshot) => snapshot.stage,
        Err(e) => return GateDecision::Required(GateReason::Unreadable(e.to_string())),
    };

    // The stripping rule applies to both sides of the comparison.
    let current_stage = current.as_deref().map(strip_annotation);
    let last_stage = last.as_deref().map(strip_annotation);
    if current_stage != last_stage {
        GateDecision::Required(GateReason::StageChanged {
            from: last_stage.map(str::to_string),
            to: current_stage.map(str::to_string),
        })
    } else {
        GateDecision::Skip
    }
}

/// Re-derive the snapshot from the current status document and overwrite the
/// persisted one. This is what makes [`check`] edge-triggered on the next
/// invocation.
///
/// Returns `Ok(None)` when no status document exists (nothing to record).
pub fn refresh_snapshot(
    status_file: &Path,
    snapshot_file: &Path,
) -> Result<Option<StageSnapshot>, StageError> {
    if !status_file.exists() {
        return Ok(None);
    }
    let content =
        std::fs::read_to_string(status_file).map_err(|e| error::io_err(status_file, e))?;
    let fresh = StageSnapshot::from_status(parse_status(&content));
    snapshot::save(snapshot_file, &fresh)?;
    log::debug!(
        "stage snapshot refreshed: {}",
        fresh.stage.as_deref().unwrap_or("<none>")
    );
    Ok(Some(fresh))
}
