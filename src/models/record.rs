// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persisted workout record.
//!
//! Each workout is written as one flat JSON object carrying the common
//! fields plus the variant's extra field and derived metric. Records
//! written by the legacy browser app (short field names, no schema
//! version) are accepted through serde aliases.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::workout::{Coordinates, Workout, WorkoutDetails, WorkoutId, WorkoutKind};

/// Current record format version.
pub const SCHEMA_VERSION: u32 = 1;

fn legacy_schema_version() -> u32 {
    1
}

/// Stored workout record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    /// Record format version (absent in legacy data)
    #[serde(default = "legacy_schema_version")]
    pub schema_version: u32,
    pub id: WorkoutId,
    #[serde(alias = "date")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: WorkoutKind,
    /// `[lat, lng]`
    #[serde(alias = "coords")]
    pub coordinates: Coordinates,
    #[serde(alias = "distance")]
    pub distance_km: f64,
    #[serde(alias = "duration")]
    pub duration_min: f64,
    #[serde(alias = "clicks")]
    pub click_count: u32,
    pub description: String,

    // ─── Running ─────────────────────────────────────────────────
    #[serde(default, alias = "cadence", skip_serializing_if = "Option::is_none")]
    pub cadence_spm: Option<u32>,
    #[serde(default, alias = "pace", skip_serializing_if = "Option::is_none")]
    pub pace_min_per_km: Option<f64>,

    // ─── Cycling ─────────────────────────────────────────────────
    #[serde(
        default,
        alias = "elevationGain",
        skip_serializing_if = "Option::is_none"
    )]
    pub elevation_gain_m: Option<f64>,
    #[serde(default, alias = "speed", skip_serializing_if = "Option::is_none")]
    pub speed_km_per_h: Option<f64>,
}

impl From<&Workout> for WorkoutRecord {
    fn from(workout: &Workout) -> Self {
        let mut record = Self {
            schema_version: SCHEMA_VERSION,
            id: workout.id().clone(),
            created_at: workout.created_at(),
            kind: workout.kind(),
            coordinates: workout.coordinates(),
            distance_km: workout.distance_km(),
            duration_min: workout.duration_min(),
            click_count: workout.click_count(),
            description: workout.description().to_string(),
            cadence_spm: None,
            pace_min_per_km: None,
            elevation_gain_m: None,
            speed_km_per_h: None,
        };
        match *workout.details() {
            WorkoutDetails::Running {
                cadence_spm,
                pace_min_per_km,
            } => {
                record.cadence_spm = Some(cadence_spm);
                record.pace_min_per_km = Some(pace_min_per_km);
            }
            WorkoutDetails::Cycling {
                elevation_gain_m,
                speed_km_per_h,
            } => {
                record.elevation_gain_m = Some(elevation_gain_m);
                record.speed_km_per_h = Some(speed_km_per_h);
            }
        }
        record
    }
}

impl TryFrom<WorkoutRecord> for Workout {
    type Error = AppError;

    /// Re-tag the record with its variant and rebuild it through the
    /// validating constructor.
    fn try_from(record: WorkoutRecord) -> Result<Self> {
        if record.schema_version > SCHEMA_VERSION {
            return Err(AppError::CorruptData(format!(
                "workout {}: unsupported schema version {}",
                record.id, record.schema_version
            )));
        }

        let details = match record.kind {
            WorkoutKind::Running => {
                if record.elevation_gain_m.is_some() || record.speed_km_per_h.is_some() {
                    return Err(mismatched_fields(&record));
                }
                WorkoutDetails::Running {
                    cadence_spm: required(&record, record.cadence_spm, "cadenceSpm")?,
                    pace_min_per_km: required(&record, record.pace_min_per_km, "paceMinPerKm")?,
                }
            }
            WorkoutKind::Cycling => {
                if record.cadence_spm.is_some() || record.pace_min_per_km.is_some() {
                    return Err(mismatched_fields(&record));
                }
                WorkoutDetails::Cycling {
                    elevation_gain_m: required(
                        &record,
                        record.elevation_gain_m,
                        "elevationGainM",
                    )?,
                    speed_km_per_h: required(&record, record.speed_km_per_h, "speedKmPerH")?,
                }
            }
        };

        Workout::restore(
            record.id,
            record.created_at,
            record.coordinates,
            record.distance_km,
            record.duration_min,
            record.click_count,
            record.description,
            details,
        )
    }
}

fn required<T>(record: &WorkoutRecord, value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| {
        AppError::CorruptData(format!(
            "workout {}: {} record is missing field `{}`",
            record.id, record.kind, field
        ))
    })
}

fn mismatched_fields(record: &WorkoutRecord) -> AppError {
    AppError::CorruptData(format!(
        "workout {}: {} record carries fields of another workout type",
        record.id, record.kind
    ))
}
