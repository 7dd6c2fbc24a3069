// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use workout_mapper::config::Config;
use workout_mapper::db::{KeyValueStore, MemoryKeyValueStore};
use workout_mapper::routes::create_router;
use workout_mapper::AppState;

/// Create a test app backed by in-memory storage.
/// Returns the router, the shared state and the storage.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, Arc<MemoryKeyValueStore>) {
    let store = Arc::new(MemoryKeyValueStore::new());
    let (app, state) = create_app_with_store(store.clone());
    (app, state, store)
}

/// Create a test app on top of an existing storage backend.
#[allow(dead_code)]
pub fn create_app_with_store(store: Arc<dyn KeyValueStore>) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(Config::default(), store));
    (create_router(state.clone()), state)
}

/// Send a request and decode the JSON response body (`Value::Null` if empty).
#[allow(dead_code)]
pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

/// Acquire a location and click the map so the form is open.
#[allow(dead_code)]
pub async fn open_form(app: &axum::Router) {
    let position = serde_json::json!({"latitude": 37.33, "longitude": -122.06});
    let (status, _) = send(app, "POST", "/api/location", Some(position.clone())).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(app, "POST", "/api/map/click", Some(position)).await;
    assert_eq!(status, StatusCode::OK);
}

/// Names of the commands in a response, in order.
#[allow(dead_code)]
pub fn command_names(body: &Value) -> Vec<String> {
    body["commands"]
        .as_array()
        .map(|cmds| {
            cmds.iter()
                .filter_map(|c| c["command"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
