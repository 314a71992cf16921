// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! File-backed key-value slot.
//!
//! Each key maps to `<dir>/<key>.json`. Writes land in a temporary file
//! that is renamed over the target, so readers only ever see a complete
//! value.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::db::KeyValueStore;
use crate::error::{AppError, Result};

/// Key-value slot stored as files in one directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    quota_bytes: Option<usize>,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            quota_bytes: None,
        }
    }

    /// Reject writes larger than `bytes`.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota_bytes = Some(bytes);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(AppError::Persistence(format!("invalid storage key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Persistence(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota_bytes {
            if value.len() > quota {
                return Err(AppError::Persistence(format!(
                    "quota exceeded: {} bytes > {} bytes",
                    value.len(),
                    quota
                )));
            }
        }

        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| {
            AppError::Persistence(format!("failed to create {}: {}", self.dir.display(), e))
        })?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| {
            AppError::Persistence(format!("failed to write {}: {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &path).map_err(|e| {
            AppError::Persistence(format!("failed to replace {}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), bytes = value.len(), "Wrote storage key");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Persistence(format!(
                "failed to remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
