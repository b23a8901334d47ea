//! Single-writer run lock.
//!
//! An advisory file lock next to the stage snapshot keeps two sync passes
//! from interleaving their writes. Released on drop.

use std::fs::{File, OpenOptions};
use std::path::Path;

use fs2::FileExt;

use crate::error::{io_err, SyncError};

/// Held for the duration of a sync pass.
#[derive(Debug)]
pub struct RunLock {
    file: File,
}

impl RunLock {
    /// Acquire the lock at `path`, creating the file and parent directories
    /// as needed. Fails with [`SyncError::LockHeld`] when another process
    /// already holds it.
    pub fn acquire(path: &Path) -> Result<Self, SyncError> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)
            .map_err(|e| io_err(path, e))?;
        match file.try_lock_exclusive() {
            Ok(()) => Ok(RunLock { file }),
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => Err(SyncError::LockHeld {
                path: path.to_path_buf(),
            }),
            Err(e) => Err(io_err(path, e)),
        }
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        if let Err(e) = fs2::FileExt::unlock(&self.file) {
            log::warn!("failed to release run lock: {e}");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
