// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session aggregates over the logged workouts.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Workout, WorkoutKind};

/// Totals for one workout type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KindTotals {
    pub count: u32,
    pub distance_km: f64,
    pub duration_min: f64,
}

/// Pre-computed statistics for the current session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionStats {
    pub total_workouts: u32,
    pub total_distance_km: f64,
    pub total_duration_min: f64,
    /// Totals keyed by workout type
    pub by_kind: HashMap<WorkoutKind, KindTotals>,
    /// Sum of all click counters
    pub total_clicks: u64,
}

impl SessionStats {
    /// Build the aggregates from a sequence of workouts.
    pub fn from_workouts<'a>(workouts: impl IntoIterator<Item = &'a Workout>) -> Self {
        let mut stats = Self::default();
        for workout in workouts {
            stats.add(workout);
        }
        stats
    }

    fn add(&mut self, workout: &Workout) {
        self.total_workouts += 1;
        self.total_distance_km += workout.distance_km();
        self.total_duration_min += workout.duration_min();
        self.total_clicks += u64::from(workout.click_count());

        let totals = self.by_kind.entry(workout.kind()).or_default();
        totals.count += 1;
        totals.distance_km += workout.distance_km();
        totals.duration_min += workout.duration_min();
    }

    /// Average running pace over all runs (total minutes / total km).
    pub fn average_pace_min_per_km(&self) -> Option<f64> {
        self.by_kind
            .get(&WorkoutKind::Running)
            .filter(|t| t.count > 0)
            .map(|t| t.duration_min / t.distance_km)
    }

    /// Average cycling speed over all rides.
    pub fn average_speed_km_per_h(&self) -> Option<f64> {
        self.by_kind
            .get(&WorkoutKind::Cycling)
            .filter(|t| t.count > 0)
            .map(|t| t.distance_km / (t.duration_min / 60.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, WorkoutExtra, WorkoutId};
    use chrono::Utc;

    fn make_workout(id: &str, distance: f64, duration: f64, extra: WorkoutExtra) -> Workout {
        Workout::new(
            WorkoutId::from(id),
            Utc::now(),
            Coordinates::new(37.4, -122.1),
            distance,
            duration,
            extra,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_stats() {
        let stats = SessionStats::from_workouts(Vec::<Workout>::new().iter());
        assert_eq!(stats.total_workouts, 0);
        assert_eq!(stats.average_pace_min_per_km(), None);
        assert_eq!(stats.average_speed_km_per_h(), None);
    }

    #[test]
    fn test_totals_by_kind() {
        let mut run = make_workout("1", 5.0, 25.0, WorkoutExtra::Running { cadence_spm: 160 });
        run.record_click();
        let workouts = vec![
            run,
            make_workout("2", 10.0, 60.0, WorkoutExtra::Running { cadence_spm: 170 }),
            make_workout(
                "3",
                30.0,
                90.0,
                WorkoutExtra::Cycling {
                    elevation_gain_m: 250.0,
                },
            ),
        ];

        let stats = SessionStats::from_workouts(&workouts);

        assert_eq!(stats.total_workouts, 3);
        assert_eq!(stats.total_distance_km, 45.0);
        assert_eq!(stats.total_clicks, 1);
        assert_eq!(stats.by_kind[&WorkoutKind::Running].count, 2);
        assert_eq!(stats.by_kind[&WorkoutKind::Cycling].count, 1);
        assert_eq!(stats.average_pace_min_per_km(), Some(85.0 / 15.0));
        assert_eq!(stats.average_speed_km_per_h(), Some(20.0));
    }
}
