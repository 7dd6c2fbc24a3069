// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout model: a logged activity and its running/cycling variants.

use crate::time_utils::month_day_label;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Geographic position of a workout, serialized as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coords {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(coords: Coords) -> Self {
        [coords.lat, coords.lng]
    }
}

/// Unique workout identifier (decimal string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for WorkoutId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for WorkoutId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Workout kind discriminator, stored as `"running"` / `"cycling"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    Running,
    Cycling,
}

impl WorkoutType {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutType::Running => "running",
            WorkoutType::Cycling => "cycling",
        }
    }

    /// Capitalized name used in descriptions.
    pub fn label(self) -> &'static str {
        match self {
            WorkoutType::Running => "Running",
            WorkoutType::Cycling => "Cycling",
        }
    }

    /// Emoji shown on markers and list items.
    pub fn icon(self) -> &'static str {
        match self {
            WorkoutType::Running => "🏃‍♂️",
            WorkoutType::Cycling => "🚴‍♀️",
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(WorkoutType::Running),
            "cycling" => Ok(WorkoutType::Cycling),
            other => Err(ValidationError::UnknownType(other.to_string())),
        }
    }
}

/// Kind-specific fields, each variant carrying its derived metric.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkoutKind {
    /// `pace` is minutes per kilometer.
    Running { cadence: u32, pace: f64 },
    /// `speed` is kilometers per hour; elevation gain may be negative.
    Cycling { elevation_gain: f64, speed: f64 },
}

impl WorkoutKind {
    pub fn workout_type(&self) -> WorkoutType {
        match self {
            WorkoutKind::Running { .. } => WorkoutType::Running,
            WorkoutKind::Cycling { .. } => WorkoutType::Cycling,
        }
    }
}

/// One logged workout.
///
/// Distance is in kilometers, duration in minutes. The derived metric and the
/// description are computed once at construction; afterwards only the
/// description (user edit) and the interaction counter change.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: WorkoutId,
    date: DateTime<Utc>,
    coords: Coords,
    distance: f64,
    duration: f64,
    clicks: u32,
    description: String,
    kind: WorkoutKind,
}

impl Workout {
    /// Create a running workout. Distance, duration and cadence must be finite
    /// and strictly positive; cadence must also be whole.
    pub fn running(
        id: WorkoutId,
        date: DateTime<Utc>,
        coords: Coords,
        distance: f64,
        duration: f64,
        cadence: f64,
    ) -> Result<Self, ValidationError> {
        require_positive("distance", distance)?;
        require_positive("duration", duration)?;
        require_positive("cadence", cadence)?;
        if cadence.fract() != 0.0 || cadence > f64::from(u32::MAX) {
            return Err(ValidationError::NotWhole { field: "cadence" });
        }

        let kind = WorkoutKind::Running {
            cadence: cadence as u32,
            pace: duration / distance,
        };
        Ok(Self::assemble(id, date, coords, distance, duration, kind))
    }

    /// Create a cycling workout. Distance and duration must be finite and
    /// strictly positive; elevation gain only has to be finite.
    pub fn cycling(
        id: WorkoutId,
        date: DateTime<Utc>,
        coords: Coords,
        distance: f64,
        duration: f64,
        elevation_gain: f64,
    ) -> Result<Self, ValidationError> {
        require_positive("distance", distance)?;
        require_positive("duration", duration)?;
        require_finite("elevation_gain", elevation_gain)?;

        let kind = WorkoutKind::Cycling {
            elevation_gain,
            speed: distance / (duration / 60.0),
        };
        Ok(Self::assemble(id, date, coords, distance, duration, kind))
    }

    fn assemble(
        id: WorkoutId,
        date: DateTime<Utc>,
        coords: Coords,
        distance: f64,
        duration: f64,
        kind: WorkoutKind,
    ) -> Self {
        let description = format!(
            "{} on {}",
            kind.workout_type().label(),
            month_day_label(date)
        );
        Self {
            id,
            date,
            coords,
            distance,
            duration,
            clicks: 0,
            description,
            kind,
        }
    }

    /// Restore fields that may have diverged from their construction values.
    pub(crate) fn with_history(mut self, description: String, clicks: u32) -> Self {
        self.description = description;
        self.clicks = clicks;
        self
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &WorkoutKind {
        &self.kind
    }

    pub fn workout_type(&self) -> WorkoutType {
        self.kind.workout_type()
    }

    /// Overwrite the description. Nothing else is recomputed.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Bump the interaction counter.
    pub fn record_interaction(&mut self) {
        self.clicks = self.clicks.saturating_add(1);
    }

    /// Popup text for the map marker.
    pub fn marker_label(&self) -> String {
        format!("{} {}", self.workout_type().icon(), self.description)
    }
}

fn require_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NotFinite { field })
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NotPositive { field })
    }
}

/// Rejected workout input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    #[error("{field} must be a whole number")]
    NotWhole { field: &'static str },

    #[error("{field} must not be blank")]
    Blank { field: &'static str },

    #[error("Unknown workout type: {0}")]
    UnknownType(String),
}
