// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout identifier generation.
//!
//! Ids are the last ten digits of the millisecond epoch, as a decimal
//! string, which matches what the legacy app stored. The generator never
//! hands out a value at or below the last one it issued or observed, so
//! rapid submissions and restored data cannot produce duplicates.
//!
//! The truncated clock wraps roughly every 115 days. Once the clock has
//! wrapped below the last issued id, the generator keeps counting up from
//! that id instead of following the clock, and past `9999999999` the ids
//! grow an eleventh digit rather than wrapping to reuse old values.

use chrono::{DateTime, Utc};

use crate::models::WorkoutId;

const ID_DIGITS: usize = 10;
const ID_MODULUS: u64 = 10_000_000_000;

/// Monotonic generator of timestamp-shaped ids.
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last: Option<u64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next id for a workout created at `now`.
    pub fn next_id(&mut self, now: DateTime<Utc>) -> WorkoutId {
        let millis = (now.timestamp_millis().max(0) as u64) % ID_MODULUS;
        let candidate = match self.last {
            Some(last) if millis <= last => last.saturating_add(1),
            _ => millis,
        };
        self.last = Some(candidate);
        WorkoutId(format!("{:0width$}", candidate, width = ID_DIGITS))
    }

    /// Account for an id that already exists (e.g. restored from storage).
    pub fn observe(&mut self, id: &WorkoutId) {
        if let Ok(value) = id.as_str().parse::<u64>() {
            if self.last.map_or(true, |last| value > last) {
                self.last = Some(value);
            }
        }
    }

    /// Forget all issued and observed ids.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
