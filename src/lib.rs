// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mapty-Tracker: log running and cycling workouts on a map
//!
//! This crate provides the workout core: entity construction with derived
//! metrics, the in-session store, JSON persistence to a key-value slot,
//! and the session controller that ties them together. Geolocation, map
//! rendering and form handling live in the presentation layer.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FileStore;
use services::{PersistenceAdapter, SessionController, WorkoutStore};

/// Build a file-backed session from configuration.
pub fn open_session(config: &Config) -> SessionController<FileStore> {
    let mut slot = FileStore::new(&config.storage_dir);
    if let Some(quota) = config.storage_quota_bytes {
        slot = slot.with_quota(quota);
    }
    let persistence = PersistenceAdapter::with_key(slot, config.storage_key.clone());
    SessionController::new(WorkoutStore::new(), persistence)
        .with_options(config.session_options())
}
