// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod record;
pub mod view;
pub mod workout;

pub use record::{RecordError, WorkoutRecord};
pub use view::{ViewCommand, WorkoutDetail, WorkoutView};
pub use workout::{Coords, ValidationError, Workout, WorkoutId, WorkoutKind, WorkoutType};
