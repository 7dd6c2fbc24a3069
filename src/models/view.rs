// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Render projections sent to the browser client.

use crate::models::workout::{Coords, Workout, WorkoutId, WorkoutKind, WorkoutType};
use crate::time_utils::format_utc_rfc3339;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A workout as shown in the sidebar list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutView {
    pub id: WorkoutId,
    #[serde(rename = "type")]
    pub kind: WorkoutType,
    pub icon: String,
    pub description: String,
    pub date: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "[number, number]"))]
    pub coords: Coords,
    pub distance: f64,
    pub duration: f64,
    pub details: Vec<WorkoutDetail>,
}

/// One icon/value/unit cell of a list item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutDetail {
    pub icon: String,
    pub value: String,
    pub unit: String,
}

fn detail(icon: &str, value: String, unit: &str) -> WorkoutDetail {
    WorkoutDetail {
        icon: icon.to_string(),
        value,
        unit: unit.to_string(),
    }
}

impl From<&Workout> for WorkoutView {
    fn from(workout: &Workout) -> Self {
        let kind = workout.workout_type();
        let mut details = vec![
            detail(kind.icon(), workout.distance().to_string(), "km"),
            detail("⏱", workout.duration().to_string(), "min"),
        ];
        match workout.kind() {
            WorkoutKind::Running { cadence, pace } => {
                details.push(detail("⚡️", format!("{:.1}", pace), "min/km"));
                details.push(detail("🦶🏼", cadence.to_string(), "spm"));
            }
            WorkoutKind::Cycling {
                elevation_gain,
                speed,
            } => {
                details.push(detail("⚡️", format!("{:.1}", speed), "km/h"));
                details.push(detail("⛰", elevation_gain.to_string(), "m"));
            }
        }

        Self {
            id: workout.id().clone(),
            kind,
            icon: kind.icon().to_string(),
            description: workout.description().to_string(),
            date: format_utc_rfc3339(workout.date()),
            coords: workout.coords(),
            distance: workout.distance(),
            duration: workout.duration(),
            details,
        }
    }
}

/// Instruction for the browser's map widget or DOM.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ViewCommand {
    // ─── Map ─────────────────────────────────────────────────────
    InitMap {
        #[cfg_attr(feature = "binding-generation", ts(type = "[number, number]"))]
        center: Coords,
        zoom: u8,
    },
    RenderMarker {
        id: WorkoutId,
        #[cfg_attr(feature = "binding-generation", ts(type = "[number, number]"))]
        coords: Coords,
        #[serde(rename = "type")]
        kind: WorkoutType,
        label: String,
    },
    RemoveMarker {
        id: WorkoutId,
    },
    Recenter {
        #[cfg_attr(feature = "binding-generation", ts(type = "[number, number]"))]
        center: Coords,
        zoom: u8,
    },
    TeardownMap,

    // ─── Form ────────────────────────────────────────────────────
    ShowForm,
    HideForm,
    ShowKindField {
        #[serde(rename = "type")]
        kind: WorkoutType,
    },
    ReportError {
        message: String,
    },

    // ─── Workout list ────────────────────────────────────────────
    RenderWorkout {
        workout: WorkoutView,
    },
    RemoveWorkout {
        id: WorkoutId,
    },
    ClearWorkouts,
    BeginEdit {
        id: WorkoutId,
    },
    EndEdit {
        id: WorkoutId,
    },
    ShowGuidance,
    HideGuidance,
}
