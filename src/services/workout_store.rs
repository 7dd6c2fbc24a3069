// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory, insertion-ordered workout collection for one session.

use crate::models::{Workout, WorkoutId};
use std::cmp::Ordering;

/// Ordered workouts owned by the session controller.
#[derive(Debug, Default, Clone)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already-ordered workouts (hydration).
    pub fn from_workouts(workouts: Vec<Workout>) -> Self {
        Self { workouts }
    }

    /// Append to the end. Identifiers are not checked for duplicates.
    pub fn add(&mut self, workout: Workout) {
        self.workouts.push(workout);
    }

    /// Remove the first workout with this identifier.
    pub fn remove_by_id(&mut self, id: &WorkoutId) -> Option<Workout> {
        let index = self.workouts.iter().position(|w| w.id() == id)?;
        Some(self.workouts.remove(index))
    }

    pub fn find_by_id(&self, id: &WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    pub fn find_by_id_mut(&mut self, id: &WorkoutId) -> Option<&mut Workout> {
        self.workouts.iter_mut().find(|w| w.id() == id)
    }

    /// Sort by distance, shortest first. The sort is stable, so workouts with
    /// equal distance keep their relative order.
    pub fn sort_by_distance(&mut self) {
        self.workouts.sort_by(|a, b| {
            a.distance()
                .partial_cmp(&b.distance())
                .unwrap_or(Ordering::Equal)
        });
    }

    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    pub fn clear(&mut self) {
        self.workouts.clear();
    }
}
