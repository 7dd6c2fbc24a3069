// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for session events.
//!
//! Each mutating endpoint runs one controller flow under the session lock
//! and answers with the view commands that flow produced.

use crate::error::{AppError, FlowError, FlowResult, Result};
use crate::models::{Coords, ViewCommand, WorkoutId, WorkoutType, WorkoutView};
use crate::services::{EditPhase, SessionError, SessionState, WorkoutForm};
use crate::{AppState, Session};
use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Session API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/session", get(get_session))
        .route("/api/location", post(location_acquired))
        .route("/api/location/error", post(location_failed))
        .route("/api/map/click", post(map_click))
        .route("/api/form/kind", post(select_kind))
        .route("/api/workouts", get(list_workouts).post(submit_workout))
        .route("/api/workouts/sort", post(sort_workouts))
        .route("/api/workouts/{id}", delete(delete_workout))
        .route("/api/workouts/{id}/edit", post(toggle_edit))
        .route("/api/workouts/{id}/focus", post(focus_workout))
        .route("/api/reset", post(reset))
}

fn validate<T: Validate>(body: &T) -> Result<()> {
    body.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Drain the commands a flow produced. On failure they travel with the
/// error so the browser still shows the reported message.
fn finish<T>(
    session: &mut Session,
    result: std::result::Result<T, SessionError>,
) -> FlowResult<(T, Vec<ViewCommand>)> {
    let commands = session.view_mut().drain();
    match result {
        Ok(value) => Ok((value, commands)),
        Err(e) => Err(FlowError {
            error: e.into(),
            commands,
        }),
    }
}

/// Render commands for the browser to apply in order.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CommandsResponse {
    pub commands: Vec<ViewCommand>,
}

// ─── Session Snapshot ────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionResponse {
    #[serde(flatten)]
    pub state: SessionState,
    #[cfg_attr(feature = "binding-generation", ts(type = "[number, number] | null"))]
    pub location: Option<Coords>,
    pub location_error: Option<String>,
    pub zoom: u8,
    pub workouts: Vec<WorkoutView>,
}

/// Full state for a freshly loaded page.
async fn get_session(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    let session = state.session.lock().await;
    Json(SessionResponse {
        state: session.state(),
        location: session.location(),
        location_error: session.location_error().map(str::to_string),
        zoom: session.zoom(),
        workouts: session.workouts().iter().map(WorkoutView::from).collect(),
    })
}

async fn list_workouts(State(state): State<Arc<AppState>>) -> Json<Vec<WorkoutView>> {
    let session = state.session.lock().await;
    Json(session.workouts().iter().map(WorkoutView::from).collect())
}

// ─── Location & Map ──────────────────────────────────────────

/// A position reported by the browser.
#[derive(Debug, Deserialize, Validate)]
pub struct PositionRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl From<&PositionRequest> for Coords {
    fn from(req: &PositionRequest) -> Self {
        Coords::new(req.latitude, req.longitude)
    }
}

async fn location_acquired(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PositionRequest>,
) -> FlowResult<Json<CommandsResponse>> {
    validate(&body)?;
    let mut session = state.session.lock().await;
    let result = session.location_acquired(Coords::from(&body));
    let ((), commands) = finish(&mut session, result)?;
    Ok(Json(CommandsResponse { commands }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct LocationErrorRequest {
    #[validate(length(max = 200))]
    pub message: String,
}

async fn location_failed(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LocationErrorRequest>,
) -> FlowResult<Json<CommandsResponse>> {
    validate(&body)?;
    let mut session = state.session.lock().await;
    let result = session.location_failed(&body.message);
    let ((), commands) = finish(&mut session, result)?;
    Ok(Json(CommandsResponse { commands }))
}

async fn map_click(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PositionRequest>,
) -> FlowResult<Json<CommandsResponse>> {
    validate(&body)?;
    let mut session = state.session.lock().await;
    let result = session.map_clicked(Coords::from(&body));
    let ((), commands) = finish(&mut session, result)?;
    Ok(Json(CommandsResponse { commands }))
}

// ─── Form ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct KindRequest {
    #[serde(rename = "type")]
    pub kind: WorkoutType,
}

async fn select_kind(
    State(state): State<Arc<AppState>>,
    Json(body): Json<KindRequest>,
) -> Json<CommandsResponse> {
    let mut session = state.session.lock().await;
    session.select_kind(body.kind);
    Json(CommandsResponse {
        commands: session.view_mut().drain(),
    })
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SubmitResponse {
    pub id: WorkoutId,
    pub commands: Vec<ViewCommand>,
}

/// Form submission. Fields are the raw strings from the inputs.
async fn submit_workout(
    State(state): State<Arc<AppState>>,
    Json(form): Json<WorkoutForm>,
) -> FlowResult<Json<SubmitResponse>> {
    tracing::debug!(kind = %form.kind, "Workout submitted");

    let mut session = state.session.lock().await;
    let result = session.submit(&form, chrono::Utc::now());
    let (id, commands) = finish(&mut session, result)?;
    Ok(Json(SubmitResponse { id, commands }))
}

// ─── Workouts ────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize, Validate)]
pub struct EditRequest {
    /// Edited text; only used when leaving edit mode.
    #[serde(default)]
    #[validate(length(min = 1, max = 120))]
    pub description: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EditResponse {
    pub phase: EditPhase,
    pub commands: Vec<ViewCommand>,
}

async fn toggle_edit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Option<Json<EditRequest>>,
) -> FlowResult<Json<EditResponse>> {
    let body = body.map(|Json(body)| body).unwrap_or_default();
    validate(&body)?;
    let id = WorkoutId::from(id);

    let mut session = state.session.lock().await;
    let result = session.toggle_edit(&id, body.description.as_deref());
    let (phase, commands) = finish(&mut session, result)?;
    Ok(Json(EditResponse { phase, commands }))
}

async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> FlowResult<Json<CommandsResponse>> {
    let id = WorkoutId::from(id);
    let mut session = state.session.lock().await;
    let result = session.delete(&id);
    let ((), commands) = finish(&mut session, result)?;
    Ok(Json(CommandsResponse { commands }))
}

async fn focus_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> FlowResult<Json<CommandsResponse>> {
    let id = WorkoutId::from(id);
    let mut session = state.session.lock().await;
    let result = session.focus(&id);
    let ((), commands) = finish(&mut session, result)?;
    Ok(Json(CommandsResponse { commands }))
}

async fn sort_workouts(
    State(state): State<Arc<AppState>>,
) -> FlowResult<Json<CommandsResponse>> {
    let mut session = state.session.lock().await;
    let result = session.sort_by_distance();
    let ((), commands) = finish(&mut session, result)?;
    Ok(Json(CommandsResponse { commands }))
}

/// Wipe stored workouts and restart the session.
async fn reset(State(state): State<Arc<AppState>>) -> FlowResult<Json<CommandsResponse>> {
    tracing::info!("Session reset requested");

    let mut session = state.session.lock().await;
    let result = session.reset();
    let ((), commands) = finish(&mut session, result)?;
    Ok(Json(CommandsResponse { commands }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_request_bounds() {
        let ok = PositionRequest {
            latitude: 37.3,
            longitude: -122.0,
        };
        assert!(validate(&ok).is_ok());

        let bad = PositionRequest {
            latitude: 91.0,
            longitude: 0.0,
        };
        assert!(matches!(validate(&bad), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_edit_request_description_length() {
        assert!(validate(&EditRequest::default()).is_ok());

        let too_long = EditRequest {
            description: Some("x".repeat(121)),
        };
        assert!(validate(&too_long).is_err());

        let empty = EditRequest {
            description: Some(String::new()),
        };
        assert!(validate(&empty).is_err());
    }
}
