// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Raw workout form input and its validation.

use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::workout::{Coordinates, WorkoutExtra, WorkoutKind};

/// One form submission, already parsed to numbers by the presentation layer.
///
/// `extra` is the cadence (steps/min) for a run and the elevation gain
/// (m) for a ride.
#[derive(Debug, Clone, Copy, PartialEq, Validate)]
pub struct WorkoutInput {
    pub kind: WorkoutKind,
    pub coordinates: Coordinates,
    #[validate(range(exclusive_min = 0.0))]
    pub distance_km: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub duration_min: f64,
    pub extra: f64,
}

impl WorkoutInput {
    pub fn running(
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        cadence: f64,
    ) -> Self {
        Self {
            kind: WorkoutKind::Running,
            coordinates,
            distance_km,
            duration_min,
            extra: cadence,
        }
    }

    pub fn cycling(
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        elevation_gain: f64,
    ) -> Self {
        Self {
            kind: WorkoutKind::Cycling,
            coordinates,
            distance_km,
            duration_min,
            extra: elevation_gain,
        }
    }

    /// Check every number and convert the extra field to its variant.
    pub fn validated_extra(&self) -> Result<WorkoutExtra> {
        let numbers = [
            ("distance", self.distance_km),
            ("duration", self.duration_min),
            ("extra", self.extra),
            ("latitude", self.coordinates.lat),
            ("longitude", self.coordinates.lng),
        ];
        if let Some((name, _)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
            return Err(AppError::Validation(format!("{} is not a finite number", name)));
        }

        self.validate()?;

        if !self.coordinates.is_valid() {
            return Err(AppError::Validation(format!(
                "coordinates out of range: [{}, {}]",
                self.coordinates.lat, self.coordinates.lng
            )));
        }

        match self.kind {
            WorkoutKind::Running => {
                let whole = self.extra.fract() == 0.0 && self.extra <= f64::from(u32::MAX);
                if self.extra <= 0.0 || !whole {
                    return Err(AppError::Validation(
                        "cadence must be a positive whole number".to_string(),
                    ));
                }
                Ok(WorkoutExtra::Running {
                    cadence_spm: self.extra as u32,
                })
            }
            WorkoutKind::Cycling => {
                if self.extra < 0.0 {
                    return Err(AppError::Validation(
                        "elevation gain must not be negative".to_string(),
                    ));
                }
                Ok(WorkoutExtra::Cycling {
                    elevation_gain_m: self.extra,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn here() -> Coordinates {
        Coordinates::new(10.0, 20.0)
    }

    #[test]
    fn test_valid_running_input() {
        let extra = WorkoutInput::running(here(), 5.0, 25.0, 150.0)
            .validated_extra()
            .unwrap();
        assert_eq!(extra, WorkoutExtra::Running { cadence_spm: 150 });
    }

    #[test]
    fn test_valid_cycling_input_allows_flat_ride() {
        let extra = WorkoutInput::cycling(here(), 20.0, 60.0, 0.0)
            .validated_extra()
            .unwrap();
        assert_eq!(
            extra,
            WorkoutExtra::Cycling {
                elevation_gain_m: 0.0
            }
        );
    }

    #[test]
    fn test_rejects_non_positive_distance_and_duration() {
        for input in [
            WorkoutInput::running(here(), -1.0, 10.0, 150.0),
            WorkoutInput::running(here(), 0.0, 10.0, 150.0),
            WorkoutInput::cycling(here(), 5.0, 0.0, 10.0),
            WorkoutInput::cycling(here(), 5.0, -30.0, 10.0),
        ] {
            assert!(matches!(
                input.validated_extra(),
                Err(AppError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_rejects_non_finite_numbers() {
        for input in [
            WorkoutInput::running(here(), f64::NAN, 10.0, 150.0),
            WorkoutInput::running(here(), 5.0, f64::INFINITY, 150.0),
            WorkoutInput::cycling(here(), 5.0, 10.0, f64::NAN),
            WorkoutInput::cycling(Coordinates::new(f64::NAN, 0.0), 5.0, 10.0, 1.0),
        ] {
            assert!(matches!(
                input.validated_extra(),
                Err(AppError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_cadence_rules() {
        assert!(WorkoutInput::running(here(), 5.0, 25.0, 0.0)
            .validated_extra()
            .is_err());
        assert!(WorkoutInput::running(here(), 5.0, 25.0, -150.0)
            .validated_extra()
            .is_err());
        assert!(WorkoutInput::running(here(), 5.0, 25.0, 150.5)
            .validated_extra()
            .is_err());
    }

    #[test]
    fn test_negative_elevation_rejected() {
        assert!(WorkoutInput::cycling(here(), 5.0, 25.0, -10.0)
            .validated_extra()
            .is_err());
    }

    #[test]
    fn test_coordinates_out_of_range() {
        let input = WorkoutInput::running(Coordinates::new(95.0, 20.0), 5.0, 25.0, 150.0);
        assert!(input.validated_extra().is_err());
    }
}
