// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout entity and its running/cycling variants.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::time_utils::format_month_day;

/// Workout identifier (decimal string, unique within a session).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(pub String);

impl WorkoutId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorkoutId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Workout type tag, fixed per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Tag as stored ("running" / "cycling").
    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Capitalised name used in descriptions.
    pub fn label(self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    /// Marker popup icon.
    pub fn icon(self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃‍♂️",
            WorkoutKind::Cycling => "🚴‍♀️",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WorkoutKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            other => Err(AppError::Validation(format!("unknown workout type: {}", other))),
        }
    }
}

/// Latitude/longitude pair, stored as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Finite and within the WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lat, c.lng]
    }
}

/// Variant-specific input supplied at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutExtra {
    Running { cadence_spm: u32 },
    Cycling { elevation_gain_m: f64 },
}

impl WorkoutExtra {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            WorkoutExtra::Running { .. } => WorkoutKind::Running,
            WorkoutExtra::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// Variant data: the extra field plus its derived metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutDetails {
    Running {
        cadence_spm: u32,
        /// durationMin / distanceKm
        pace_min_per_km: f64,
    },
    Cycling {
        elevation_gain_m: f64,
        /// distanceKm / (durationMin / 60)
        speed_km_per_h: f64,
    },
}

impl WorkoutDetails {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// One logged activity.
///
/// Everything except the click counter is fixed at construction; derived
/// metrics and the description are computed once and never recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: WorkoutId,
    created_at: DateTime<Utc>,
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    click_count: u32,
    description: String,
    details: WorkoutDetails,
}

impl Workout {
    /// Build a fresh workout, computing its derived metric and description.
    pub fn new(
        id: WorkoutId,
        created_at: DateTime<Utc>,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        extra: WorkoutExtra,
    ) -> Result<Self> {
        check_common(&id, coordinates, distance_km, duration_min)?;

        let details = match extra {
            WorkoutExtra::Running { cadence_spm } => {
                if cadence_spm == 0 {
                    return Err(AppError::Validation(
                        "cadence must be a positive integer".to_string(),
                    ));
                }
                WorkoutDetails::Running {
                    cadence_spm,
                    pace_min_per_km: duration_min / distance_km,
                }
            }
            WorkoutExtra::Cycling { elevation_gain_m } => {
                if !elevation_gain_m.is_finite() || elevation_gain_m < 0.0 {
                    return Err(AppError::Validation(
                        "elevation gain must be a non-negative number".to_string(),
                    ));
                }
                WorkoutDetails::Cycling {
                    elevation_gain_m,
                    speed_km_per_h: distance_km / (duration_min / 60.0),
                }
            }
        };

        let description = format!(
            "{} on {}",
            details.kind().label(),
            format_month_day(created_at)
        );

        Ok(Self {
            id,
            created_at,
            coordinates,
            distance_km,
            duration_min,
            click_count: 0,
            description,
            details,
        })
    }

    /// Rebuild a workout from stored values.
    ///
    /// Derived fields are taken as stored, never recomputed. Any broken
    /// invariant is reported as corrupt data.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: WorkoutId,
        created_at: DateTime<Utc>,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        click_count: u32,
        description: String,
        details: WorkoutDetails,
    ) -> Result<Self> {
        let workout = Self {
            id,
            created_at,
            coordinates,
            distance_km,
            duration_min,
            click_count,
            description,
            details,
        };
        workout
            .check_invariants()
            .map_err(|e| e.into_corrupt(format_args!("workout {}", workout.id)))?;
        Ok(workout)
    }

    /// Verify the entity invariants hold.
    pub fn check_invariants(&self) -> Result<()> {
        check_common(
            &self.id,
            self.coordinates,
            self.distance_km,
            self.duration_min,
        )?;
        if self.description.trim().is_empty() {
            return Err(AppError::Validation("description is empty".to_string()));
        }
        match self.details {
            WorkoutDetails::Running {
                cadence_spm,
                pace_min_per_km,
            } => {
                if cadence_spm == 0 {
                    return Err(AppError::Validation(
                        "cadence must be a positive integer".to_string(),
                    ));
                }
                check_metric("pace", pace_min_per_km)
            }
            WorkoutDetails::Cycling {
                elevation_gain_m,
                speed_km_per_h,
            } => {
                if !elevation_gain_m.is_finite() || elevation_gain_m < 0.0 {
                    return Err(AppError::Validation(
                        "elevation gain must be a non-negative number".to_string(),
                    ));
                }
                check_metric("speed", speed_km_per_h)
            }
        }
    }

    /// Count one selection of this workout.
    pub fn record_click(&mut self) {
        self.click_count = self.click_count.saturating_add(1);
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn click_count(&self) -> u32 {
        self.click_count
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn details(&self) -> &WorkoutDetails {
        &self.details
    }

    pub fn kind(&self) -> WorkoutKind {
        self.details.kind()
    }

    /// Running pace in min/km, if this is a run.
    pub fn pace_min_per_km(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Running {
                pace_min_per_km, ..
            } => Some(pace_min_per_km),
            WorkoutDetails::Cycling { .. } => None,
        }
    }

    /// Cycling speed in km/h, if this is a ride.
    pub fn speed_km_per_h(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Cycling { speed_km_per_h, .. } => Some(speed_km_per_h),
            WorkoutDetails::Running { .. } => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_distance_km(mut self, distance_km: f64) -> Self {
        self.distance_km = distance_km;
        self
    }

    /// Text for the map marker popup.
    pub fn popup_label(&self) -> String {
        format!("{} {}", self.kind().icon(), self.description)
    }

    /// Derived metric rounded for display, e.g. "5.0 min/km".
    pub fn metric_label(&self) -> String {
        match self.details {
            WorkoutDetails::Running {
                pace_min_per_km, ..
            } => format!("{:.1} min/km", pace_min_per_km),
            WorkoutDetails::Cycling { speed_km_per_h, .. } => {
                format!("{:.1} km/h", speed_km_per_h)
            }
        }
    }
}

fn check_common(
    id: &WorkoutId,
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
) -> Result<()> {
    if id.as_str().is_empty() {
        return Err(AppError::Validation("id is empty".to_string()));
    }
    if !coordinates.is_valid() {
        return Err(AppError::Validation(format!(
            "coordinates out of range: [{}, {}]",
            coordinates.lat, coordinates.lng
        )));
    }
    if !is_positive(distance_km) {
        return Err(AppError::Validation(
            "distance must be a positive number".to_string(),
        ));
    }
    if !is_positive(duration_min) {
        return Err(AppError::Validation(
            "duration must be a positive number".to_string(),
        ));
    }
    Ok(())
}

fn check_metric(name: &str, value: f64) -> Result<()> {
    if is_positive(value) {
        Ok(())
    } else {
        Err(AppError::Validation(format!("{} is not a positive number", name)))
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
