//! Single-writer lock for the log workbook.
//!
//! The lock is a sibling `<workbook>.lock` file created with create-new
//! semantics, so only one process can hold it. It is removed on drop.

use crate::errors::{AppError, AppResult};
use crate::utils::path::{parent_dir_or_dot, sibling_with_suffix};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

const RETRY_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug)]
pub struct StoreLock {
    path: PathBuf,
}

impl StoreLock {
    pub fn lock_path(target: &Path) -> PathBuf {
        sibling_with_suffix(target, ".lock")
    }

    /// Wait up to `timeout` for the lock on `target`.
    pub fn acquire(target: &Path, timeout: Duration) -> AppResult<Self> {
        let path = Self::lock_path(target);
        fs::create_dir_all(parent_dir_or_dot(&path))?;

        let deadline = Instant::now() + timeout;
        loop {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    // Holder pid, for whoever has to clean up a stale lock by hand.
                    let _ = writeln!(file, "{}", std::process::id());
                    return Ok(Self { path });
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    if Instant::now() >= deadline {
                        return Err(AppError::Locked(path.display().to_string()));
                    }
                    thread::sleep(RETRY_INTERVAL);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_writer_times_out_until_first_releases() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("log.xlsx");

        let first = StoreLock::acquire(&target, Duration::from_millis(0)).unwrap();
        assert!(first.path().exists());

        let err = StoreLock::acquire(&target, Duration::from_millis(120)).unwrap_err();
        assert!(matches!(err, AppError::Locked(_)));

        drop(first);
        assert!(!StoreLock::lock_path(&target).exists());
        assert!(StoreLock::acquire(&target, Duration::from_millis(0)).is_ok());
    }
}
