//! File-backed credential store.
//!
//! The whole mapping lives in one JSON file. Every operation takes the
//! store's exclusive lock, reads the file fresh, and mutations rewrite the
//! file atomically (temp file + rename) before the lock is released. The
//! lock lives on a sidecar `<file>.lock` so replacing the data file never
//! invalidates it.

use crate::config::Config;
use crate::error::TokenError;
use crate::storage::credential::CredentialRecord;
use crate::storage::lock::{reject_symlink, StoreLock};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Mapping from user key to credential record.
pub type CredentialMap = BTreeMap<String, CredentialRecord>;

/// Credential store safe for concurrent use across threads and processes.
///
/// Nothing is cached between calls; all reads go to disk under the lock.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
    lock_path: PathBuf,
}

impl FileCredentialStore {
    /// Store backed by `path`. Nothing is touched until the first operation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut lock_name = OsString::from(path.as_os_str());
        lock_name.push(".lock");
        Self {
            path,
            lock_path: PathBuf::from(lock_name),
        }
    }

    /// Store at the configured location.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.store_path.clone())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full mapping. A missing file is an empty mapping.
    ///
    /// # Errors
    ///
    /// `UnsafeStoreLocation` if the store path is a symbolic link,
    /// `StoreIo` on I/O or lock failure or if the file content is corrupt.
    pub fn load(&self) -> Result<CredentialMap, TokenError> {
        let _lock = self.lock()?;
        self.read_locked()
    }

    /// Record stored under `key`, if any.
    pub fn get(&self, key: &str) -> Result<Option<CredentialRecord>, TokenError> {
        Ok(self.load()?.remove(key))
    }

    /// All stored keys in sorted order.
    pub fn keys(&self) -> Result<Vec<String>, TokenError> {
        Ok(self.load()?.into_keys().collect())
    }

    /// Insert or replace the record for `key`.
    pub fn store(&self, key: &str, record: CredentialRecord) -> Result<(), TokenError> {
        self.update(|credentials| {
            credentials.insert(key.to_string(), record);
        })?;
        info!(key, "Stored credential");
        Ok(())
    }

    /// Remove the record for `key`. Returns whether it existed.
    pub fn delete(&self, key: &str) -> Result<bool, TokenError> {
        let existed = self.update(|credentials| credentials.remove(key).is_some())?;
        info!(key, existed, "Deleted credential");
        Ok(existed)
    }

    /// Remove every record.
    pub fn clear(&self) -> Result<(), TokenError> {
        self.update(BTreeMap::clear)?;
        info!(path = %self.path.display(), "Cleared credential store");
        Ok(())
    }

    /// Read-modify-write under one continuous lock hold.
    fn update<R>(&self, mutate: impl FnOnce(&mut CredentialMap) -> R) -> Result<R, TokenError> {
        let _lock = self.lock()?;
        let mut credentials = self.read_locked()?;
        let result = mutate(&mut credentials);
        self.write_locked(&credentials)?;
        Ok(result)
    }

    fn lock(&self) -> Result<StoreLock, TokenError> {
        reject_symlink(&self.path)?;
        self.ensure_parent_dir()?;
        StoreLock::acquire(&self.lock_path)
    }

    fn read_locked(&self) -> Result<CredentialMap, TokenError> {
        // Re-checked under the lock: the path may have been swapped while
        // we waited.
        reject_symlink(&self.path)?;

        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(CredentialMap::new()),
            Err(e) => {
                return Err(TokenError::store_io(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(CredentialMap::new());
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            TokenError::store_io(format!(
                "Corrupt credential store {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn write_locked(&self, credentials: &CredentialMap) -> Result<(), TokenError> {
        let json = serde_json::to_vec_pretty(credentials)
            .map_err(|e| TokenError::store_io(format!("Serialization failed: {}", e)))?;

        let mut temp = NamedTempFile::new_in(self.parent_dir())
            .map_err(|e| TokenError::store_io(format!("Failed to create temp file: {}", e)))?;
        temp.write_all(&json)
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| TokenError::store_io(format!("Failed to write temp file: {}", e)))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            temp.as_file()
                .set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(|e| TokenError::store_io(format!("Failed to set permissions: {}", e)))?;
        }

        temp.persist(&self.path).map_err(|e| {
            TokenError::store_io(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e.error
            ))
        })?;

        debug!(path = %self.path.display(), entries = credentials.len(), "Rewrote credential store");
        Ok(())
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Create the parent directory owner-only if it does not exist yet.
    fn ensure_parent_dir(&self) -> Result<(), TokenError> {
        let dir = self.parent_dir();
        if dir.exists() {
            return Ok(());
        }

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o700);
        }
        builder.create(dir).map_err(|e| {
            TokenError::store_io(format!("Failed to create {}: {}", dir.display(), e))
        })
    }
}
