// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout-Mapper: log runs and rides on a map
//!
//! This crate provides the backend for a map-based workout log. The browser
//! owns the map widget, the form and geolocation; it forwards user events to
//! the session controller here and replays the view commands it gets back.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::{KeyValueStore, WorkoutRepository};
use services::{CommandBuffer, SessionController};
use std::sync::Arc;
use tokio::sync::Mutex;

/// The controller as driven over HTTP.
pub type Session = SessionController<CommandBuffer>;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// Single-writer session; every handler runs its flow under this lock.
    pub session: Mutex<Session>,
}

impl AppState {
    /// Hydrate the session from `store`.
    pub fn new(config: Config, store: Arc<dyn KeyValueStore>) -> Self {
        let repository = WorkoutRepository::new(store, config.storage_key.clone());
        let mut session =
            SessionController::start(repository, CommandBuffer::new(), config.map_zoom_level);
        // The initial list render is served by `GET /api/session`.
        session.view_mut().drain();

        Self {
            config,
            session: Mutex::new(session),
        }
    }
}
