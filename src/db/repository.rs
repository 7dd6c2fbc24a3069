// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout persistence bridge.
//!
//! The whole workout list lives in one named slot as a JSON array of
//! [`WorkoutRecord`]s and is rewritten in full on every save.

use crate::db::{KeyValueStore, StorageError};
use crate::models::{Workout, WorkoutRecord};
use std::sync::Arc;

/// Reads and writes the workout slot.
#[derive(Clone)]
pub struct WorkoutRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl WorkoutRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace the slot with exactly these workouts, in order.
    pub fn save(&self, workouts: &[Workout]) -> Result<(), StorageError> {
        let records: Vec<WorkoutRecord> = workouts.iter().map(WorkoutRecord::from).collect();
        let encoded = serde_json::to_string(&records).map_err(StorageError::Encode)?;
        self.store.set(&self.key, &encoded)?;

        tracing::debug!(key = %self.key, count = records.len(), "Saved workouts");
        Ok(())
    }

    /// Read the slot.
    ///
    /// An absent slot means no prior session and yields an empty list.
    /// Content that is not a JSON array is a `Decode` error. Elements that
    /// do not match the record shape are logged and skipped.
    pub fn load(&self) -> Result<Vec<WorkoutRecord>, StorageError> {
        let Some(encoded) = self.store.get(&self.key)? else {
            tracing::debug!(key = %self.key, "No stored workouts");
            return Ok(Vec::new());
        };

        let elements: Vec<serde_json::Value> =
            serde_json::from_str(&encoded).map_err(StorageError::Decode)?;
        let total = elements.len();
        let records: Vec<WorkoutRecord> = elements
            .into_iter()
            .enumerate()
            .filter_map(|(index, element)| match serde_json::from_value(element) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(
                        key = %self.key,
                        index,
                        error = %e,
                        "Skipping malformed stored workout"
                    );
                    None
                }
            })
            .collect();

        tracing::debug!(
            key = %self.key,
            count = records.len(),
            skipped = total - records.len(),
            "Loaded workouts"
        );
        Ok(records)
    }

    /// Remove the slot entirely.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(&self.key)?;
        tracing::info!(key = %self.key, "Cleared stored workouts");
        Ok(())
    }
}
