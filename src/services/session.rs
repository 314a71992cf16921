// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session controller.
//!
//! Handles the workout lifecycle for one session:
//! 1. Restore saved workouts at startup
//! 2. Validate form input and build the right workout variant
//! 3. Append it to the store and persist the whole store
//! 4. Record selections and hand coordinates back for map recentering
//! 5. Reset everything on request

use crate::db::KeyValueStore;
use crate::error::{AppError, Result};
use crate::models::{Coordinates, SessionStats, Workout, WorkoutInput, WorkoutKind};
use crate::services::ids::IdGenerator;
use crate::services::persistence::PersistenceAdapter;
use crate::services::store::WorkoutStore;
use crate::time_utils::{Clock, SystemClock};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionState {
    /// Startup: waiting for the location service to answer.
    AwaitingLocation,
    /// Steady state.
    Ready,
    /// The user picked a position and the form is open.
    FormOpen { coordinates: Coordinates },
}

/// Tunable session behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Remove a corrupt stored payload during restore.
    pub wipe_corrupt_on_restore: bool,
    /// Persist after each selection.
    pub save_on_select: bool,
}

/// Result of a successful submission.
#[derive(Debug)]
pub struct Submission {
    /// The new workout, ready for marker and list rendering.
    pub workout: Workout,
    /// Set when the workout was kept in memory but could not be saved.
    pub save_error: Option<AppError>,
}

/// What the map needs to recenter on a selected workout.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub coordinates: Coordinates,
    pub workout: Workout,
}

/// Result of restoring the previous session.
#[derive(Debug)]
pub enum RestoreOutcome {
    /// Stored workouts were installed (possibly zero).
    Restored(usize),
    /// Stored data could not be used; the session starts empty.
    Discarded(AppError),
}

/// Orchestrates workout creation, selection and persistence.
pub struct SessionController<S> {
    store: WorkoutStore,
    persistence: PersistenceAdapter<S>,
    ids: IdGenerator,
    clock: Box<dyn Clock>,
    options: SessionOptions,
    state: SessionState,
}

impl<S: KeyValueStore> SessionController<S> {
    pub fn new(store: WorkoutStore, persistence: PersistenceAdapter<S>) -> Self {
        let mut ids = IdGenerator::new();
        for workout in store.all() {
            ids.observe(workout.id());
        }
        Self {
            store,
            persistence,
            ids,
            clock: Box::new(SystemClock),
            options: SessionOptions::default(),
            state: SessionState::AwaitingLocation,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn store(&self) -> &WorkoutStore {
        &self.store
    }

    pub fn persistence(&self) -> &PersistenceAdapter<S> {
        &self.persistence
    }

    // ─── Startup ─────────────────────────────────────────────────

    /// Load the previous session's workouts into the store.
    ///
    /// Corrupt or unreadable data never aborts startup: the store is left
    /// empty and the error is returned for the caller to surface. A corrupt
    /// payload is either wiped or, by default, copied to the backup key
    /// before any later save can overwrite it.
    pub fn restore_session(&mut self) -> RestoreOutcome {
        let loaded = self
            .persistence
            .load()
            .and_then(|workouts| self.store.replace_all(workouts));

        match loaded {
            Ok(()) => {
                self.ids.reset();
                for workout in self.store.all() {
                    self.ids.observe(workout.id());
                }
                tracing::info!(count = self.store.len(), "Session restored");
                RestoreOutcome::Restored(self.store.len())
            }
            Err(err) => {
                tracing::warn!(error = %err, kind = err.kind(), "Discarding stored workouts");
                self.store.clear();
                if matches!(err, AppError::CorruptData(_)) {
                    if self.options.wipe_corrupt_on_restore {
                        if let Err(clear_err) = self.persistence.clear() {
                            tracing::warn!(error = %clear_err, "Failed to wipe corrupt workouts");
                        }
                    } else if let Err(backup_err) = self.persistence.back_up_raw() {
                        tracing::error!(
                            error = %backup_err,
                            "Failed to set aside corrupt workouts; the next save overwrites them"
                        );
                    }
                }
                RestoreOutcome::Discarded(err)
            }
        }
    }

    /// The location service answered; the map is live.
    pub fn location_resolved(&mut self) {
        if self.state == SessionState::AwaitingLocation {
            self.state = SessionState::Ready;
        }
    }

    /// No location service; carry on without a map position.
    pub fn location_unavailable(&mut self) {
        tracing::info!("Location unavailable");
        self.location_resolved();
    }

    // ─── Form ────────────────────────────────────────────────────

    /// Remember the clicked map position and open the form.
    pub fn open_form(&mut self, coordinates: Coordinates) -> Result<()> {
        if !coordinates.is_valid() {
            return Err(AppError::Validation(format!(
                "coordinates out of range: [{}, {}]",
                coordinates.lat, coordinates.lng
            )));
        }
        self.state = SessionState::FormOpen { coordinates };
        Ok(())
    }

    /// Close the form without submitting.
    pub fn cancel_form(&mut self) {
        if matches!(self.state, SessionState::FormOpen { .. }) {
            self.state = SessionState::Ready;
        }
    }

    /// Validate input, create the workout, store it and persist the store.
    ///
    /// On validation failure nothing changes. A failed save keeps the new
    /// workout in memory and reports the error in the [`Submission`].
    pub fn submit_workout(&mut self, input: WorkoutInput) -> Result<Submission> {
        let extra = input.validated_extra().inspect_err(|e| {
            tracing::debug!(error = %e, kind = %input.kind, "Rejected workout input");
        })?;

        let now = self.clock.now();
        let id = self.ids.next_id(now);
        let workout = Workout::new(
            id,
            now,
            input.coordinates,
            input.distance_km,
            input.duration_min,
            extra,
        )?;

        self.store.append(workout.clone());
        if matches!(self.state, SessionState::FormOpen { .. }) {
            self.state = SessionState::Ready;
        }

        tracing::info!(
            id = %workout.id(),
            kind = %workout.kind(),
            distance_km = workout.distance_km(),
            duration_min = workout.duration_min(),
            "Workout created"
        );

        let save_error = self.persistence.save(&self.store).err();
        if let Some(err) = &save_error {
            tracing::warn!(error = %err, "Workout kept in memory only");
        }

        Ok(Submission {
            workout,
            save_error,
        })
    }

    /// Submit using the position remembered by [`Self::open_form`].
    pub fn submit_at_pending(
        &mut self,
        kind: WorkoutKind,
        distance_km: f64,
        duration_min: f64,
        extra: f64,
    ) -> Result<Submission> {
        let SessionState::FormOpen { coordinates } = self.state else {
            return Err(AppError::Validation("no map position selected".to_string()));
        };
        self.submit_workout(WorkoutInput {
            kind,
            coordinates,
            distance_km,
            duration_min,
            extra,
        })
    }

    // ─── Selection ───────────────────────────────────────────────

    /// Count a click on a workout and return where to recenter the map.
    ///
    /// Unknown ids (stale list entries) are ignored.
    pub fn select_workout(&mut self, id: &str) -> Option<Selection> {
        let Some(workout) = self.store.record_selection(id) else {
            tracing::debug!(id, "Selected workout not found");
            return None;
        };
        let selection = Selection {
            coordinates: workout.coordinates(),
            workout: workout.clone(),
        };
        tracing::debug!(id, clicks = selection.workout.click_count(), "Workout selected");

        if self.options.save_on_select {
            if let Err(err) = self.persistence.save(&self.store) {
                tracing::warn!(error = %err, "Failed to persist selection");
            }
        }
        Some(selection)
    }

    // ─── Queries ─────────────────────────────────────────────────

    /// Workouts in insertion order.
    pub fn workouts(&self) -> std::slice::Iter<'_, Workout> {
        self.store.all()
    }

    pub fn find_workout(&self, id: &str) -> Option<&Workout> {
        self.store.find_by_id(id)
    }

    pub fn stats(&self) -> SessionStats {
        self.store.stats()
    }

    // ─── Persistence ─────────────────────────────────────────────

    /// Write the current store explicitly.
    pub fn save_session(&self) -> Result<()> {
        self.persistence.save(&self.store)
    }

    /// Wipe stored and in-memory workouts.
    ///
    /// On success the caller re-renders from scratch. If the stored data
    /// cannot be removed, nothing is changed.
    pub fn reset_session(&mut self) -> Result<()> {
        self.persistence.clear()?;
        self.store.clear();
        self.ids.reset();
        if matches!(self.state, SessionState::FormOpen { .. }) {
            self.state = SessionState::Ready;
        }
        tracing::info!("Session reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::time_utils::FixedClock;

    fn session() -> SessionController<MemoryStore> {
        SessionController::new(
            WorkoutStore::new(),
            PersistenceAdapter::new(MemoryStore::new()),
        )
        .with_clock(FixedClock::from_millis(1_744_623_000_000))
    }

    #[test]
    fn test_state_transitions() {
        let mut session = session();
        assert_eq!(session.state(), SessionState::AwaitingLocation);

        session.location_resolved();
        assert_eq!(session.state(), SessionState::Ready);

        let here = Coordinates::new(10.0, 20.0);
        session.open_form(here).unwrap();
        assert_eq!(session.state(), SessionState::FormOpen { coordinates: here });

        session.cancel_form();
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[test]
    fn test_open_form_rejects_bad_coordinates() {
        let mut session = session();
        session.location_unavailable();
        assert!(session.open_form(Coordinates::new(0.0, 200.0)).is_err());
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[test]
    fn test_submit_at_pending_uses_form_position() {
        let mut session = session();
        session.location_resolved();
        assert!(session
            .submit_at_pending(WorkoutKind::Running, 5.0, 25.0, 150.0)
            .is_err());

        let here = Coordinates::new(47.6, -122.3);
        session.open_form(here).unwrap();
        let submission = session
            .submit_at_pending(WorkoutKind::Running, 5.0, 25.0, 150.0)
            .unwrap();
        assert_eq!(submission.workout.coordinates(), here);
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[test]
    fn test_invalid_submit_keeps_form_open() {
        let mut session = session();
        let here = Coordinates::new(10.0, 20.0);
        session.open_form(here).unwrap();

        let result = session.submit_at_pending(WorkoutKind::Cycling, 5.0, -1.0, 0.0);
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(session.state(), SessionState::FormOpen { coordinates: here });
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_submit_before_location_keeps_awaiting_location() {
        let mut session = session();
        session
            .submit_workout(WorkoutInput::running(
                Coordinates::new(10.0, 20.0),
                5.0,
                25.0,
                150.0,
            ))
            .unwrap();
        assert_eq!(session.state(), SessionState::AwaitingLocation);
        assert_eq!(session.store().len(), 1);

        session.location_resolved();
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[test]
    fn test_ids_are_unique_within_the_same_millisecond() {
        let mut session = session();
        let here = Coordinates::new(10.0, 20.0);
        let a = session
            .submit_workout(WorkoutInput::running(here, 5.0, 25.0, 150.0))
            .unwrap();
        let b = session
            .submit_workout(WorkoutInput::cycling(here, 20.0, 60.0, 400.0))
            .unwrap();
        assert_ne!(a.workout.id(), b.workout.id());
        assert_eq!(a.workout.id().as_str(), "4623000000");
    }
}
