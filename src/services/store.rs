// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-session ordered collection of workouts.

use crate::error::Result;
use crate::models::{SessionStats, Workout};

/// Ordered, append-only list of the session's workouts.
///
/// The store exclusively owns its workouts; the click counter is the only
/// thing that can change afterwards, via [`WorkoutStore::record_selection`].
#[derive(Debug, Default, Clone)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a workout to the end of the list.
    pub fn append(&mut self, workout: Workout) {
        tracing::debug!(id = %workout.id(), kind = %workout.kind(), "Appending workout");
        self.workouts.push(workout);
    }

    /// First workout with this id, in insertion order.
    pub fn find_by_id(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id().as_str() == id)
    }

    /// Count a selection of the workout with this id.
    ///
    /// Returns the updated workout, or `None` if no workout matches.
    pub fn record_selection(&mut self, id: &str) -> Option<&Workout> {
        let workout = self.workouts.iter_mut().find(|w| w.id().as_str() == id)?;
        workout.record_click();
        Some(&*workout)
    }

    /// Iterate workouts in insertion order.
    ///
    /// The iterator is `Clone`, so a caller can walk it again.
    pub fn all(&self) -> std::slice::Iter<'_, Workout> {
        self.workouts.iter()
    }

    /// Replace the whole list with restored workouts.
    ///
    /// Every workout is checked first; if any breaks an invariant nothing
    /// is installed.
    pub fn replace_all(&mut self, workouts: Vec<Workout>) -> Result<()> {
        for workout in &workouts {
            workout
                .check_invariants()
                .map_err(|e| e.into_corrupt(format_args!("workout {}", workout.id())))?;
        }
        tracing::debug!(count = workouts.len(), "Replacing workout store");
        self.workouts = workouts;
        Ok(())
    }

    /// Drop every workout.
    pub fn clear(&mut self) {
        self.workouts.clear();
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    /// Aggregates over the current workouts.
    pub fn stats(&self) -> SessionStats {
        SessionStats::from_workouts(self.all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{Coordinates, WorkoutExtra, WorkoutId};
    use chrono::Utc;

    fn make_run(id: &str) -> Workout {
        Workout::new(
            WorkoutId::from(id),
            Utc::now(),
            Coordinates::new(10.0, 20.0),
            5.0,
            25.0,
            WorkoutExtra::Running { cadence_spm: 150 },
        )
        .unwrap()
    }

    #[test]
    fn test_find_by_id_on_empty_store() {
        let store = WorkoutStore::new();
        assert!(store.find_by_id("1234567890").is_none());
        assert!(store.find_by_id("").is_none());
    }

    #[test]
    fn test_append_preserves_order() {
        let mut store = WorkoutStore::new();
        store.append(make_run("1"));
        store.append(make_run("2"));
        store.append(make_run("3"));

        let ids: Vec<&str> = store.all().map(|w| w.id().as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);

        // Restartable
        let iter = store.all();
        assert_eq!(iter.clone().count(), 3);
        assert_eq!(iter.count(), 3);
    }

    #[test]
    fn test_duplicate_ids_return_first_match() {
        let mut store = WorkoutStore::new();
        let first = make_run("7");
        let mut second = make_run("7");
        second.record_click();
        store.append(first);
        store.append(second);

        assert_eq!(store.find_by_id("7").unwrap().click_count(), 0);
        store.record_selection("7");
        assert_eq!(store.find_by_id("7").unwrap().click_count(), 1);
        assert_eq!(store.all().nth(1).unwrap().click_count(), 1);
    }

    #[test]
    fn test_record_selection() {
        let mut store = WorkoutStore::new();
        store.append(make_run("1"));

        for _ in 0..5 {
            store.record_selection("1");
        }
        assert_eq!(store.find_by_id("1").unwrap().click_count(), 5);
        assert!(store.record_selection("missing").is_none());
    }

    #[test]
    fn test_replace_all_is_all_or_nothing() {
        let mut store = WorkoutStore::new();
        store.append(make_run("1"));

        let batch = vec![make_run("2"), make_run("3").with_distance_km(-1.0)];
        let err = store.replace_all(batch).unwrap_err();
        assert!(matches!(err, AppError::CorruptData(ref m) if m.contains("workout 3")));
        assert!(!err.to_string().contains("Invalid workout input"));

        let ids: Vec<&str> = store.all().map(|w| w.id().as_str()).collect();
        assert_eq!(ids, vec!["1"]);

        store.replace_all(vec![make_run("4"), make_run("5")]).unwrap();
        let ids: Vec<&str> = store.all().map(|w| w.id().as_str()).collect();
        assert_eq!(ids, vec!["4", "5"]);
    }
}
