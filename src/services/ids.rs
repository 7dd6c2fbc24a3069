// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout identifier generation.

use crate::models::WorkoutId;
use chrono::{DateTime, Utc};

/// Strictly increasing identifiers seeded from the microsecond clock.
///
/// Two workouts created within the same microsecond (or after a clock step
/// backwards) still get distinct identifiers.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next identifier for a workout created at `now`.
    pub fn next(&mut self, now: DateTime<Utc>) -> WorkoutId {
        let candidate = u64::try_from(now.timestamp_micros()).unwrap_or(0);
        self.last = candidate.max(self.last.saturating_add(1));
        WorkoutId::new(self.last.to_string())
    }

    /// Account for an identifier that already exists (e.g. restored from
    /// storage). Non-numeric identifiers cannot collide and are ignored.
    pub fn observe(&mut self, id: &WorkoutId) {
        if let Ok(value) = id.as_str().parse::<u64>() {
            self.last = self.last.max(value);
        }
    }
}
