// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persistence adapter between the workout store and a durable slot.
//!
//! The whole store is written as one JSON array under a single key; every
//! save overwrites the previous value in full.

use crate::db::{keys, KeyValueStore};
use crate::error::{AppError, Result};
use crate::models::{Workout, WorkoutRecord};
use crate::services::store::WorkoutStore;

/// Serializes the workout store to a key-value slot and back.
#[derive(Debug, Clone)]
pub struct PersistenceAdapter<S> {
    slot: S,
    key: String,
}

impl<S: KeyValueStore> PersistenceAdapter<S> {
    /// Adapter writing under the default `workouts` key.
    pub fn new(slot: S) -> Self {
        Self::with_key(slot, keys::WORKOUTS)
    }

    pub fn with_key(slot: S, key: impl Into<String>) -> Self {
        Self {
            slot,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Write every workout in the store, replacing what was stored before.
    ///
    /// The store itself is never touched, even when the write fails.
    pub fn save(&self, store: &WorkoutStore) -> Result<()> {
        let records: Vec<WorkoutRecord> = store.all().map(WorkoutRecord::from).collect();
        let payload = serde_json::to_string(&records)
            .map_err(|e| AppError::Persistence(format!("failed to serialize workouts: {}", e)))?;

        self.slot.set(&self.key, &payload)?;

        tracing::info!(
            key = %self.key,
            count = records.len(),
            bytes = payload.len(),
            "Saved workouts"
        );
        Ok(())
    }

    /// Read the stored workouts.
    ///
    /// A key that was never written (or holds JSON `null`) yields an empty
    /// list. Anything that does not parse into valid workouts is
    /// `CorruptData`; nothing is silently dropped.
    pub fn load(&self) -> Result<Vec<Workout>> {
        let Some(payload) = self.slot.get(&self.key)? else {
            tracing::debug!(key = %self.key, "No stored workouts");
            return Ok(Vec::new());
        };

        let records: Option<Vec<WorkoutRecord>> = serde_json::from_str(&payload)
            .map_err(|e| AppError::CorruptData(format!("key {}: {}", self.key, e)))?;
        let records = records.unwrap_or_default();

        let workouts = records
            .into_iter()
            .map(Workout::try_from)
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(key = %self.key, count = workouts.len(), "Loaded workouts");
        Ok(workouts)
    }

    /// Key a corrupt payload is set aside under, e.g. `workouts-corrupt`.
    pub fn backup_key(&self) -> String {
        format!("{}{}", self.key, keys::CORRUPT_SUFFIX)
    }

    /// Copy the raw stored payload to [`Self::backup_key`] so the next
    /// save cannot destroy it.
    ///
    /// Returns `false` if nothing was stored.
    pub fn back_up_raw(&self) -> Result<bool> {
        let Some(payload) = self.slot.get(&self.key)? else {
            return Ok(false);
        };
        let backup_key = self.backup_key();
        self.slot.set(&backup_key, &payload)?;
        tracing::warn!(
            key = %self.key,
            backup_key = %backup_key,
            bytes = payload.len(),
            "Set aside unreadable workouts"
        );
        Ok(true)
    }

    /// Remove the stored workouts. Succeeds if nothing was stored.
    pub fn clear(&self) -> Result<()> {
        self.slot.remove(&self.key)?;
        tracing::info!(key = %self.key, "Cleared stored workouts");
        Ok(())
    }
}
