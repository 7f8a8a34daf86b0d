//! Scoped exclusive file lock.

use crate::error::TokenError;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Holds an OS-level exclusive lock on a sidecar lock file.
///
/// The lock is released when the guard drops, on every exit path.
#[derive(Debug)]
pub(crate) struct StoreLock {
    file: File,
    path: PathBuf,
}

impl StoreLock {
    /// Block until the exclusive lock on `path` is held.
    ///
    /// There is no timeout; the caller blocks until the current holder
    /// releases the lock or exits.
    pub(crate) fn acquire(path: &Path) -> Result<Self, TokenError> {
        reject_symlink(path)?;

        let mut options = OpenOptions::new();
        options.read(true).write(true).create(true).truncate(false);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let file = options.open(path).map_err(|e| {
            TokenError::store_io(format!("Failed to open lock file {}: {}", path.display(), e))
        })?;
        file.lock_exclusive().map_err(|e| {
            TokenError::store_io(format!("Failed to lock {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), "Acquired credential store lock");
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        // Closing the descriptor also releases the lock; unlock explicitly
        // so the release is visible in logs.
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!(path = %self.path.display(), error = %e, "Failed to release credential store lock");
        } else {
            debug!(path = %self.path.display(), "Released credential store lock");
        }
    }
}

/// Fail with `UnsafeStoreLocation` if `path` is a symbolic link.
///
/// A missing path is fine. Never follows the link.
pub(crate) fn reject_symlink(path: &Path) -> Result<(), TokenError> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => {
            warn!(path = %path.display(), "Refusing symbolic link as credential store location");
            Err(TokenError::UnsafeStoreLocation(path.to_path_buf()))
        }
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(TokenError::store_io(format!(
            "Failed to stat {}: {}",
            path.display(),
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_released_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.lock");

        let first = StoreLock::acquire(&path).unwrap();
        drop(first);

        // Would block forever if the first guard had not released.
        let second = StoreLock::acquire(&path).unwrap();
        drop(second);
    }

    #[test]
    fn test_missing_path_is_not_a_symlink() {
        let dir = tempfile::tempdir().unwrap();
        assert!(reject_symlink(&dir.path().join("absent.json")).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("target.lock");
        let link = dir.path().join("link.lock");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        assert!(matches!(
            StoreLock::acquire(&link),
            Err(TokenError::UnsafeStoreLocation(_))
        ));
        assert!(!target.exists());
    }
}
