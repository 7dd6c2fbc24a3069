// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use crate::db::StorageError;
use crate::models::ViewCommand;
use crate::services::SessionError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Invalid workout: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Validation(e) => AppError::Validation(e.to_string()),
            SessionError::NotFound(id) => AppError::NotFound(format!("Workout {} not found", id)),
            e @ SessionError::InvalidState { .. } => AppError::Conflict(e.to_string()),
            SessionError::Storage(e @ StorageError::Encode(_)) => {
                AppError::Internal(anyhow::anyhow!("Workout serialization failed: {}", e))
            }
            SessionError::Storage(e) => AppError::Storage(e.to_string()),
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    /// Render commands the failed flow still wants applied (e.g. `report_error`).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    commands: Vec<ViewCommand>,
}

impl AppError {
    fn status_and_body(&self) -> (StatusCode, ErrorResponse) {
        let (status, error, details) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                Some(msg.clone()),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "invalid_state", Some(msg.clone())),
            AppError::Storage(msg) => {
                tracing::error!(error = %msg, "Storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
            commands: Vec::new(),
        };
        (status, body)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

/// A failed session flow together with the commands it rendered before
/// failing. The browser applies them the same way as on success.
#[derive(Debug)]
pub struct FlowError {
    pub error: AppError,
    pub commands: Vec<ViewCommand>,
}

impl From<AppError> for FlowError {
    fn from(error: AppError) -> Self {
        Self {
            error,
            commands: Vec::new(),
        }
    }
}

impl IntoResponse for FlowError {
    fn into_response(self) -> Response {
        let (status, mut body) = self.error.status_and_body();
        body.commands = self.commands;
        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for handlers that drive a session flow
pub type FlowResult<T> = std::result::Result<T, FlowError>;
