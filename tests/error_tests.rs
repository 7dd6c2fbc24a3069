// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use workout_mapper::db::StorageError;
use workout_mapper::error::{AppError, FlowError};
use workout_mapper::models::ViewCommand;
use workout_mapper::models::ValidationError;
use workout_mapper::services::SessionError;

fn encode_error() -> StorageError {
    StorageError::Encode(serde_json::from_str::<u32>("not a number").unwrap_err())
}

async fn body_of(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn status_of(err: SessionError) -> StatusCode {
    AppError::from(err).into_response().status()
}

#[test]
fn test_session_errors_map_to_status_codes() {
    assert_eq!(
        status_of(SessionError::Validation(ValidationError::NotPositive {
            field: "distance"
        })),
        StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(
        status_of(SessionError::NotFound("42".into())),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        status_of(SessionError::InvalidState {
            action: "place a workout",
            state: "awaiting location",
        }),
        StatusCode::CONFLICT
    );
    assert_eq!(
        status_of(SessionError::Storage(encode_error())),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        status_of(SessionError::Storage(StorageError::InvalidKey(
            "../x".to_string()
        ))),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn test_not_found_names_the_workout() {
    let err = AppError::from(SessionError::NotFound("42".into()));
    assert!(err.to_string().contains("42"));
}

#[test]
fn test_invalid_state_message() {
    let err = SessionError::InvalidState {
        action: "submit a workout",
        state: "idle",
    };
    assert_eq!(err.to_string(), "Cannot submit a workout while idle");
}

#[tokio::test]
async fn test_encode_failure_is_internal_error() {
    let err = AppError::from(SessionError::Storage(encode_error()));
    assert!(matches!(err, AppError::Internal(_)));

    let body = body_of(err.into_response()).await;
    assert_eq!(body["error"], "internal_error");
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn test_flow_error_carries_commands() {
    let err = FlowError {
        error: AppError::Validation("distance must be greater than zero".to_string()),
        commands: vec![ViewCommand::ReportError {
            message: "distance must be greater than zero".to_string(),
        }],
    };

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_of(response).await;
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["commands"][0]["command"], "report_error");
}

#[tokio::test]
async fn test_plain_app_error_omits_commands() {
    let err = AppError::NotFound("Workout 1 not found".to_string());
    let body = body_of(err.into_response()).await;
    assert!(body.get("commands").is_none());
    assert_eq!(body["details"], "Workout 1 not found");
}
