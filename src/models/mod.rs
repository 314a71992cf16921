// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for workouts.

pub mod input;
pub mod record;
pub mod stats;
pub mod workout;

pub use input::WorkoutInput;
pub use record::{WorkoutRecord, SCHEMA_VERSION};
pub use stats::{KindTotals, SessionStats};
pub use workout::{Coordinates, Workout, WorkoutDetails, WorkoutExtra, WorkoutId, WorkoutKind};
