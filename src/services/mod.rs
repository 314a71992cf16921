// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - workout lifecycle logic.

pub mod ids;
pub mod persistence;
pub mod session;
pub mod store;

pub use ids::IdGenerator;
pub use persistence::PersistenceAdapter;
pub use session::{
    RestoreOutcome, Selection, SessionController, SessionOptions, SessionState, Submission,
};
pub use store::WorkoutStore;
