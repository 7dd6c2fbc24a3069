// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout-Mapper API Server
//!
//! Keeps the workout log for a map-based browser client and persists it to
//! a durable storage slot.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_mapper::{
    config::Config,
    db::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Workout-Mapper API");

    // Open the storage backend
    let store: Arc<dyn KeyValueStore> = match &config.storage_dir {
        Some(dir) => Arc::new(FileKeyValueStore::open(dir)?),
        None => {
            tracing::warn!("STORAGE_DIR not set, workouts will not survive a restart");
            Arc::new(MemoryKeyValueStore::new())
        }
    };

    // Build shared state (hydrates the session from storage)
    let state = Arc::new(AppState::new(config.clone(), store));
    let hydrated = state.session.lock().await.workouts().len();
    tracing::info!(
        workouts = hydrated,
        slot = %config.storage_key,
        "Session hydrated"
    );

    // Build router
    let app = workout_mapper::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("workout_mapper=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
