// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session controller.
//!
//! Owns the workout store for one session and reacts to discrete events:
//! 1. Location acquired / failed
//! 2. Map click (opens the form at that point)
//! 3. Form submission (validate, store, persist, render)
//! 4. Per-workout edit toggle, delete and focus
//! 5. Sort and reset
//!
//! Every mutating step updates the store and rewrites the persisted slot as
//! one unit: if the write fails the store is rolled back.

use crate::db::{StorageError, WorkoutRepository};
use crate::models::{
    Coords, ValidationError, ViewCommand, Workout, WorkoutId, WorkoutType, WorkoutView,
};
use crate::services::ids::IdGenerator;
use crate::services::workout_store::WorkoutStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Map widget collaborator.
pub trait MapSurface {
    fn init_map(&mut self, center: Coords, zoom: u8);
    /// Place (or replace) the marker for this workout.
    fn render_marker(&mut self, workout: &Workout);
    fn remove_marker(&mut self, id: &WorkoutId);
    fn recenter(&mut self, center: Coords, zoom: u8);
    fn teardown_map(&mut self);
}

/// Form and workout list collaborator.
pub trait WorkoutPanel {
    fn show_form(&mut self);
    /// Hide the form and clear its fields.
    fn hide_form(&mut self);
    fn show_kind_field(&mut self, kind: WorkoutType);
    fn report_error(&mut self, message: &str);
    /// Insert (or replace) the list item for this workout.
    fn render_workout(&mut self, workout: &Workout);
    fn remove_workout(&mut self, id: &WorkoutId);
    fn clear_workouts(&mut self);
    fn begin_edit(&mut self, id: &WorkoutId);
    fn end_edit(&mut self, id: &WorkoutId);
    fn show_guidance(&mut self);
    fn hide_guidance(&mut self);
}

/// Everything the controller renders through.
pub trait SessionView: MapSurface + WorkoutPanel {}

impl<T: MapSurface + WorkoutPanel> SessionView for T {}

/// Records view calls as [`ViewCommand`]s for the browser to replay.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    commands: Vec<ViewCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[ViewCommand] {
        &self.commands
    }

    /// Take everything recorded since the last drain.
    pub fn drain(&mut self) -> Vec<ViewCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl MapSurface for CommandBuffer {
    fn init_map(&mut self, center: Coords, zoom: u8) {
        self.commands.push(ViewCommand::InitMap { center, zoom });
    }

    fn render_marker(&mut self, workout: &Workout) {
        self.commands.push(ViewCommand::RenderMarker {
            id: workout.id().clone(),
            coords: workout.coords(),
            kind: workout.workout_type(),
            label: workout.marker_label(),
        });
    }

    fn remove_marker(&mut self, id: &WorkoutId) {
        self.commands
            .push(ViewCommand::RemoveMarker { id: id.clone() });
    }

    fn recenter(&mut self, center: Coords, zoom: u8) {
        self.commands.push(ViewCommand::Recenter { center, zoom });
    }

    fn teardown_map(&mut self) {
        self.commands.push(ViewCommand::TeardownMap);
    }
}

impl WorkoutPanel for CommandBuffer {
    fn show_form(&mut self) {
        self.commands.push(ViewCommand::ShowForm);
    }

    fn hide_form(&mut self) {
        self.commands.push(ViewCommand::HideForm);
    }

    fn show_kind_field(&mut self, kind: WorkoutType) {
        self.commands.push(ViewCommand::ShowKindField { kind });
    }

    fn report_error(&mut self, message: &str) {
        self.commands.push(ViewCommand::ReportError {
            message: message.to_string(),
        });
    }

    fn render_workout(&mut self, workout: &Workout) {
        self.commands.push(ViewCommand::RenderWorkout {
            workout: WorkoutView::from(workout),
        });
    }

    fn remove_workout(&mut self, id: &WorkoutId) {
        self.commands
            .push(ViewCommand::RemoveWorkout { id: id.clone() });
    }

    fn clear_workouts(&mut self) {
        self.commands.push(ViewCommand::ClearWorkouts);
    }

    fn begin_edit(&mut self, id: &WorkoutId) {
        self.commands.push(ViewCommand::BeginEdit { id: id.clone() });
    }

    fn end_edit(&mut self, id: &WorkoutId) {
        self.commands.push(ViewCommand::EndEdit { id: id.clone() });
    }

    fn show_guidance(&mut self) {
        self.commands.push(ViewCommand::ShowGuidance);
    }

    fn hide_guidance(&mut self) {
        self.commands.push(ViewCommand::HideGuidance);
    }
}

/// Top-level interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    /// Waiting for the browser's location (the map does not exist yet).
    AwaitingLocation,
    Idle,
    /// Form visible; `pending` is where the new workout will be placed.
    FormOpen {
        #[cfg_attr(feature = "binding-generation", ts(type = "[number, number]"))]
        pending: Coords,
    },
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::AwaitingLocation => "awaiting location",
            SessionState::Idle => "idle",
            SessionState::FormOpen { .. } => "form open",
        }
    }
}

/// Per-workout edit toggle result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum EditPhase {
    Viewing,
    Editing,
}

/// Raw form fields as the browser read them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkoutForm {
    #[serde(rename = "type")]
    pub kind: String,
    pub distance: String,
    pub duration: String,
    #[serde(default)]
    pub cadence: String,
    #[serde(default)]
    pub elevation: String,
}

/// Numeric coercion of a form field: blank is zero, garbage is NaN.
fn parse_field(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        0.0
    } else {
        trimmed.parse().unwrap_or(f64::NAN)
    }
}

/// Errors surfaced by session flows. All are non-fatal to the session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Workout not found: {0}")]
    NotFound(WorkoutId),

    #[error("Cannot {action} while {state}")]
    InvalidState {
        action: &'static str,
        state: &'static str,
    },

    #[error("Failed to persist workouts: {0}")]
    Storage(#[from] StorageError),
}

/// Single-owner controller for one workout session.
pub struct SessionController<V> {
    repository: WorkoutRepository,
    store: WorkoutStore,
    ids: IdGenerator,
    view: V,
    state: SessionState,
    location: Option<Coords>,
    location_error: Option<String>,
    editing: HashSet<WorkoutId>,
    zoom: u8,
}

impl<V: SessionView> SessionController<V> {
    /// Hydrate from the persisted slot and render the workout list.
    ///
    /// Unreadable storage is treated as "no prior session".
    pub fn start(repository: WorkoutRepository, view: V, zoom: u8) -> Self {
        let mut ids = IdGenerator::new();
        let records = match repository.load() {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    key = repository.key(),
                    error = %e,
                    "Stored workouts unreadable, starting empty"
                );
                Vec::new()
            }
        };

        let workouts: Vec<Workout> = records
            .into_iter()
            .filter_map(|record| match Workout::try_from(record) {
                Ok(workout) => Some(workout),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping stored workout");
                    None
                }
            })
            .collect();
        for workout in &workouts {
            ids.observe(workout.id());
        }
        tracing::info!(count = workouts.len(), "Session started");

        let mut controller = Self {
            repository,
            store: WorkoutStore::from_workouts(workouts),
            ids,
            view,
            state: SessionState::AwaitingLocation,
            location: None,
            location_error: None,
            editing: HashSet::new(),
            zoom,
        };
        controller.render_list();
        controller
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn location(&self) -> Option<Coords> {
        self.location
    }

    pub fn location_error(&self) -> Option<&str> {
        self.location_error.as_deref()
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn workouts(&self) -> &[Workout] {
        self.store.all()
    }

    pub fn is_editing(&self, id: &WorkoutId) -> bool {
        self.editing.contains(id)
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    // ─── Location ────────────────────────────────────────────────

    /// The browser reported its position: build the map and place markers.
    pub fn location_acquired(&mut self, coords: Coords) -> Result<(), SessionError> {
        self.require_awaiting_location("initialize the map")?;

        tracing::info!(lat = coords.lat, lng = coords.lng, "Location acquired");
        self.location = Some(coords);
        self.location_error = None;
        self.state = SessionState::Idle;

        self.view.init_map(coords, self.zoom);
        for workout in self.store.all() {
            self.view.render_marker(workout);
        }
        Ok(())
    }

    /// The browser could not get a position. Map features stay unavailable.
    pub fn location_failed(&mut self, reason: &str) -> Result<(), SessionError> {
        self.require_awaiting_location("report a location failure")?;

        tracing::warn!(reason, "Location acquisition failed");
        self.location_error = Some(reason.to_string());
        self.view
            .report_error(&format!("Could not get your coordinates: {}", reason));
        Ok(())
    }

    fn require_awaiting_location(&mut self, action: &'static str) -> Result<(), SessionError> {
        if self.state == SessionState::AwaitingLocation {
            Ok(())
        } else {
            Err(self.fail(SessionError::InvalidState {
                action,
                state: self.state.name(),
            }))
        }
    }

    // ─── Form ────────────────────────────────────────────────────

    /// Open the form at the clicked point (or move the pending point).
    pub fn map_clicked(&mut self, coords: Coords) -> Result<(), SessionError> {
        if self.state == SessionState::AwaitingLocation {
            return Err(self.fail(SessionError::InvalidState {
                action: "place a workout",
                state: self.state.name(),
            }));
        }

        self.state = SessionState::FormOpen { pending: coords };
        self.view.show_form();
        Ok(())
    }

    /// Kind selector changed: swap the cadence/elevation row.
    pub fn select_kind(&mut self, kind: WorkoutType) {
        self.view.show_kind_field(kind);
    }

    /// Validate the form, create the workout and persist it.
    ///
    /// On invalid input nothing is stored and the form stays open.
    pub fn submit(
        &mut self,
        form: &WorkoutForm,
        now: DateTime<Utc>,
    ) -> Result<WorkoutId, SessionError> {
        let SessionState::FormOpen { pending } = self.state else {
            return Err(self.fail(SessionError::InvalidState {
                action: "submit a workout",
                state: self.state.name(),
            }));
        };

        let workout = match self.build_workout(form, pending, now) {
            Ok(workout) => workout,
            Err(e) => return Err(self.fail(e.into())),
        };
        let id = workout.id().clone();

        let was_empty = self.store.is_empty();
        if let Err(e) = self.commit(|store| store.add(workout)) {
            return Err(self.fail(e));
        }

        tracing::info!(workout_id = %id, count = self.store.len(), "Workout created");

        if let Some(workout) = self.store.find_by_id(&id) {
            self.view.render_marker(workout);
            self.view.render_workout(workout);
        }
        if was_empty {
            self.view.hide_guidance();
        }
        self.view.hide_form();
        self.state = SessionState::Idle;
        Ok(id)
    }

    fn build_workout(
        &mut self,
        form: &WorkoutForm,
        coords: Coords,
        now: DateTime<Utc>,
    ) -> Result<Workout, ValidationError> {
        let kind: WorkoutType = form.kind.trim().parse()?;
        let distance = parse_field(&form.distance);
        let duration = parse_field(&form.duration);
        let id = self.ids.next(now);

        match kind {
            WorkoutType::Running => Workout::running(
                id,
                now,
                coords,
                distance,
                duration,
                parse_field(&form.cadence),
            ),
            WorkoutType::Cycling => Workout::cycling(
                id,
                now,
                coords,
                distance,
                duration,
                parse_field(&form.elevation),
            ),
        }
    }

    // ─── Per-workout actions ─────────────────────────────────────

    /// First activation makes the description editable; the second commits
    /// `description` (if given) and persists.
    pub fn toggle_edit(
        &mut self,
        id: &WorkoutId,
        description: Option<&str>,
    ) -> Result<EditPhase, SessionError> {
        if self.store.find_by_id(id).is_none() {
            return Err(self.fail(SessionError::NotFound(id.clone())));
        }

        if self.editing.insert(id.clone()) {
            self.view.begin_edit(id);
            return Ok(EditPhase::Editing);
        }

        if let Some(text) = description {
            let text = text.trim();
            if text.is_empty() {
                return Err(self.fail(ValidationError::Blank {
                    field: "description",
                }
                .into()));
            }
            let result = self.commit(|store| {
                if let Some(workout) = store.find_by_id_mut(id) {
                    workout.set_description(text);
                }
            });
            if let Err(e) = result {
                return Err(self.fail(e));
            }
            tracing::info!(workout_id = %id, "Workout description edited");
        }

        self.editing.remove(id);
        self.view.end_edit(id);
        if let Some(workout) = self.store.find_by_id(id) {
            self.view.render_workout(workout);
            if self.location.is_some() {
                self.view.render_marker(workout);
                self.view.recenter(workout.coords(), self.zoom);
            }
        }
        Ok(EditPhase::Viewing)
    }

    /// Delete a workout and its marker. An emptied store resets the map to
    /// the user's location and shows the guidance hint.
    pub fn delete(&mut self, id: &WorkoutId) -> Result<(), SessionError> {
        if self.store.find_by_id(id).is_none() {
            return Err(self.fail(SessionError::NotFound(id.clone())));
        }
        if let Err(e) = self.commit(|store| store.remove_by_id(id)) {
            return Err(self.fail(e));
        }

        tracing::info!(workout_id = %id, remaining = self.store.len(), "Workout deleted");
        self.editing.remove(id);
        self.view.remove_workout(id);
        self.view.remove_marker(id);

        if self.store.is_empty() {
            if let Some(location) = self.location {
                self.view.recenter(location, self.zoom);
            }
            self.view.show_guidance();
        }
        Ok(())
    }

    /// Center the map on a workout and count the interaction.
    pub fn focus(&mut self, id: &WorkoutId) -> Result<(), SessionError> {
        if self.location.is_none() {
            return Err(self.fail(SessionError::InvalidState {
                action: "move to a workout",
                state: self.state.name(),
            }));
        }

        let coords = match self.store.find_by_id_mut(id) {
            Some(workout) => {
                workout.record_interaction();
                workout.coords()
            }
            None => return Err(self.fail(SessionError::NotFound(id.clone()))),
        };

        self.view.recenter(coords, self.zoom);
        Ok(())
    }

    // ─── Whole-list actions ──────────────────────────────────────

    /// Sort by distance, persist and re-render the list.
    pub fn sort_by_distance(&mut self) -> Result<(), SessionError> {
        if let Err(e) = self.commit(WorkoutStore::sort_by_distance) {
            return Err(self.fail(e));
        }
        tracing::debug!(count = self.store.len(), "Workouts sorted by distance");

        self.editing.clear();
        self.view.clear_workouts();
        self.render_list();
        Ok(())
    }

    /// Drop all stored workouts and start over from `AwaitingLocation`.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        if let Err(e) = self.repository.clear() {
            return Err(self.fail(e.into()));
        }
        tracing::info!(discarded = self.store.len(), "Session reset");

        self.store.clear();
        self.editing.clear();
        self.location = None;
        self.location_error = None;
        self.state = SessionState::AwaitingLocation;

        self.view.teardown_map();
        self.view.hide_form();
        self.view.clear_workouts();
        self.view.show_guidance();
        Ok(())
    }

    // ─── Helpers ─────────────────────────────────────────────────

    /// Apply a store mutation and rewrite the slot, rolling back on failure.
    fn commit<T>(&mut self, mutate: impl FnOnce(&mut WorkoutStore) -> T) -> Result<T, SessionError> {
        let snapshot = self.store.clone();
        let out = mutate(&mut self.store);
        if let Err(e) = self.repository.save(self.store.all()) {
            self.store = snapshot;
            return Err(e.into());
        }
        Ok(out)
    }

    fn render_list(&mut self) {
        for workout in self.store.all() {
            self.view.render_workout(workout);
        }
        if self.store.is_empty() {
            self.view.show_guidance();
        }
    }

    /// Log and report a failed flow to the user.
    fn fail(&mut self, err: SessionError) -> SessionError {
        match &err {
            SessionError::Storage(e) => tracing::error!(error = %e, "Workout persistence failed"),
            other => tracing::warn!(error = %other, "Session action rejected"),
        }
        self.view.report_error(&err.to_string());
        err
    }
}
