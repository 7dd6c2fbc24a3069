// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Persisted workout record.
//!
//! A flat projection of [`Workout`] in the same camelCase shape the browser
//! client kept in local storage. Kind-specific fields are optional here and
//! the `type` tag decides which ones are required on rehydration.

use crate::models::workout::{
    Coords, ValidationError, Workout, WorkoutId, WorkoutKind, WorkoutType,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored workout record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    pub date: DateTime<Utc>,
    pub id: WorkoutId,
    #[serde(default)]
    pub clicks: u32,
    pub coords: Coords,
    pub distance: f64,
    pub duration: f64,
    #[serde(rename = "type")]
    pub kind: WorkoutType,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_gain: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl From<&Workout> for WorkoutRecord {
    fn from(workout: &Workout) -> Self {
        let (cadence, pace, elevation_gain, speed) = match workout.kind() {
            WorkoutKind::Running { cadence, pace } => {
                (Some(f64::from(*cadence)), Some(*pace), None, None)
            }
            WorkoutKind::Cycling {
                elevation_gain,
                speed,
            } => (None, None, Some(*elevation_gain), Some(*speed)),
        };

        Self {
            date: workout.date(),
            id: workout.id().clone(),
            clicks: workout.clicks(),
            coords: workout.coords(),
            distance: workout.distance(),
            duration: workout.duration(),
            kind: workout.workout_type(),
            description: workout.description().to_string(),
            cadence,
            pace,
            elevation_gain,
            speed,
        }
    }
}

impl TryFrom<WorkoutRecord> for Workout {
    type Error = RecordError;

    /// Rebuild the typed workout from the stored `type` tag.
    ///
    /// Pace and speed are recomputed from distance and duration; the stored
    /// description and click count are kept.
    fn try_from(record: WorkoutRecord) -> Result<Self, Self::Error> {
        let workout = match record.kind {
            WorkoutType::Running => {
                let cadence = record.cadence.ok_or(RecordError::MissingField {
                    id: record.id.clone(),
                    field: "cadence",
                })?;
                Workout::running(
                    record.id.clone(),
                    record.date,
                    record.coords,
                    record.distance,
                    record.duration,
                    cadence,
                )
            }
            WorkoutType::Cycling => {
                let elevation_gain = record.elevation_gain.ok_or(RecordError::MissingField {
                    id: record.id.clone(),
                    field: "elevationGain",
                })?;
                Workout::cycling(
                    record.id.clone(),
                    record.date,
                    record.coords,
                    record.distance,
                    record.duration,
                    elevation_gain,
                )
            }
        }
        .map_err(|source| RecordError::Invalid {
            id: record.id.clone(),
            source,
        })?;

        Ok(workout.with_history(record.description, record.clicks))
    }
}

/// A stored record that cannot be turned back into a workout.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Record {id} is missing field '{field}'")]
    MissingField { id: WorkoutId, field: &'static str },

    #[error("Record {id} holds invalid values: {source}")]
    Invalid {
        id: WorkoutId,
        #[source]
        source: ValidationError,
    },
}
