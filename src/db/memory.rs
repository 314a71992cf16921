// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory key-value slot.

use std::sync::Arc;

use dashmap::DashMap;

use crate::db::KeyValueStore;
use crate::error::{AppError, Result};

/// In-memory slot, cheap to clone (clones share the same map).
#[derive(Debug, Clone)]
pub struct MemoryStore {
    entries: Option<Arc<DashMap<String, String>>>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: Some(Arc::new(DashMap::new())),
            quota_bytes: None,
        }
    }

    /// Reject writes larger than `bytes`.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota_bytes = Some(bytes);
        self
    }

    /// Create a slot whose every operation fails (storage disabled).
    pub fn unavailable() -> Self {
        Self {
            entries: None,
            quota_bytes: None,
        }
    }

    /// Helper to get the map or return an error if unavailable.
    fn entries(&self) -> Result<&DashMap<String, String>> {
        self.entries
            .as_deref()
            .ok_or_else(|| AppError::Persistence("storage unavailable".to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let entries = self.entries()?;
        if let Some(quota) = self.quota_bytes {
            if value.len() > quota {
                return Err(AppError::Persistence(format!(
                    "quota exceeded: {} bytes > {} bytes",
                    value.len(),
                    quota
                )));
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("workouts", "[]").unwrap();
        assert_eq!(other.get("workouts").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_unavailable_store_fails_every_operation() {
        let store = MemoryStore::unavailable();
        assert!(matches!(store.get("k"), Err(AppError::Persistence(_))));
        assert!(matches!(store.set("k", "v"), Err(AppError::Persistence(_))));
        assert!(matches!(store.remove("k"), Err(AppError::Persistence(_))));
    }

    #[test]
    fn test_quota_keeps_previous_value() {
        let store = MemoryStore::new().with_quota(3);
        store.set("k", "abc").unwrap();
        assert!(store.set("k", "abcd").is_err());
        assert_eq!(store.get("k").unwrap().as_deref(), Some("abc"));
    }
}
