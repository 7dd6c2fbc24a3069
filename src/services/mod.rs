// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod ids;
pub mod session;
pub mod workout_store;

pub use ids::IdGenerator;
pub use session::{
    CommandBuffer, EditPhase, MapSurface, SessionController, SessionError, SessionState,
    SessionView, WorkoutForm, WorkoutPanel,
};
pub use workout_store::WorkoutStore;
