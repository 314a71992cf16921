// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use crate::db::keys;
use crate::services::session::SessionOptions;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the file-backed storage slot
    pub storage_dir: PathBuf,
    /// Key the workout list is stored under
    pub storage_key: String,
    /// Maximum serialized size accepted by the slot
    pub storage_quota_bytes: Option<usize>,
    /// Remove a corrupt payload when restoring
    pub wipe_corrupt_on_restore: bool,
    /// Persist after every selection so click counts survive reloads
    pub save_on_select: bool,
    /// Emit JSON log lines instead of the compact format
    pub json_logs: bool,
}

impl Config {
    /// Deterministic config for tests.
    pub fn test_default() -> Self {
        Self {
            storage_dir: PathBuf::from("target/test-storage"),
            storage_key: keys::WORKOUTS.to_string(),
            storage_quota_bytes: None,
            wipe_corrupt_on_restore: false,
            save_on_select: false,
            json_logs: false,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            storage_dir: env::var("MAPTY_STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".mapty")),
            storage_key: env::var("MAPTY_STORAGE_KEY")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|_| keys::WORKOUTS.to_string()),
            storage_quota_bytes: env::var("MAPTY_STORAGE_QUOTA_BYTES")
                .ok()
                .map(|v| {
                    v.trim()
                        .parse()
                        .map_err(|_| ConfigError::Invalid("MAPTY_STORAGE_QUOTA_BYTES", v))
                })
                .transpose()?,
            wipe_corrupt_on_restore: parse_flag("MAPTY_WIPE_CORRUPT")?,
            save_on_select: parse_flag("MAPTY_SAVE_ON_SELECT")?,
            json_logs: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        })
    }

    /// Session behaviour derived from this config.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            wipe_corrupt_on_restore: self.wipe_corrupt_on_restore,
            save_on_select: self.save_on_select,
        }
    }
}

fn parse_flag(name: &'static str) -> Result<bool, ConfigError> {
    match env::var(name) {
        Err(_) => Ok(false),
        Ok(v) => match v.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(ConfigError::Invalid(name, v)),
        },
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
