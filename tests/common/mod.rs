// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use mapty_tracker::db::MemoryStore;
use mapty_tracker::models::Coordinates;
use mapty_tracker::services::{PersistenceAdapter, SessionController, WorkoutStore};
use mapty_tracker::time_utils::FixedClock;

/// 2025-04-14T09:30:00Z
#[allow(dead_code)]
pub const APRIL_14_MILLIS: i64 = 1_744_623_000_000;

/// Create a session over an in-memory slot with a pinned clock.
/// Returns the session and a handle sharing its slot.
#[allow(dead_code)]
pub fn create_test_session() -> (SessionController<MemoryStore>, MemoryStore) {
    let slot = MemoryStore::new();
    (session_over(slot.clone()), slot)
}

/// Create a session over an existing slot.
#[allow(dead_code)]
pub fn session_over(slot: MemoryStore) -> SessionController<MemoryStore> {
    SessionController::new(WorkoutStore::new(), PersistenceAdapter::new(slot))
        .with_clock(FixedClock::from_millis(APRIL_14_MILLIS))
}

#[allow(dead_code)]
pub fn coords(lat: f64, lng: f64) -> Coordinates {
    Coordinates::new(lat, lng)
}
