//! Persisted stage snapshot.
//!
//! A small JSON document with cross-run lifetime: read at the start of a run
//! to gate execution, rewritten after every completed pass. Writes use the
//! atomic `.tmp` + rename pattern.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{io_err, StageError};
use crate::status::StatusFields;

/// The stage state recorded at the end of the previous completed pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSnapshot {
    pub stage: Option<String>,
    pub identity: Option<String>,
    pub progress: Option<String>,
    pub task: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl StageSnapshot {
    /// Build a fresh snapshot from parsed status fields, stamped now.
    pub fn from_status(fields: StatusFields) -> Self {
        StageSnapshot {
            stage: fields.stage,
            identity: fields.identity,
            progress: fields.progress,
            task: fields.task,
            timestamp: Utc::now(),
        }
    }
}

/// Load the snapshot from `path`.
///
/// Returns `StageError::SnapshotNotFound` if absent; the caller decides what
/// a missing snapshot means (first run ⇒ sync required).
pub fn load(path: &Path) -> Result<StageSnapshot, StageError> {
    if !path.exists() {
        return Err(StageError::SnapshotNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    Ok(serde_json::from_str(&contents)?)
}

/// Atomically overwrite the snapshot at `path`, creating parent directories.
pub fn save(path: &Path, snapshot: &StageSnapshot) -> Result<(), StageError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
        }
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json).map_err(|e| io_err(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| io_err(path, e))?;
    Ok(())
}

/// Compact age string for a snapshot timestamp: `42s`, `5m`, `3h`, `2d`.
pub fn format_age(timestamp: DateTime<Utc>) -> String {
    let seconds = Utc::now()
        .signed_duration_since(timestamp)
        .num_seconds()
        .max(0) as u64;
    if seconds < 60 {
        return format!("{seconds}s");
    }
    if seconds < 60 * 60 {
        return format!("{}m", seconds / 60);
    }
    if seconds < 60 * 60 * 24 {
        return format!("{}h", seconds / (60 * 60));
    }
    format!("{}d", seconds / (60 * 60 * 24))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
