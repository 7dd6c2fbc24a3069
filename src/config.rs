//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local development.

use std::env;
use std::path::PathBuf;

use crate::db::slots;

/// Zoom used for the initial map view and every re-center.
pub const DEFAULT_MAP_ZOOM_LEVEL: u8 = 13;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL (allowed CORS origin)
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Directory for file-backed storage; `None` keeps workouts in memory only
    pub storage_dir: Option<PathBuf>,
    /// Name of the persisted workout slot
    pub storage_key: String,
    /// Map zoom level (1..=20)
    pub map_zoom_level: u8,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            storage_dir: None,
            storage_key: slots::WORKOUTS.to_string(),
            map_zoom_level: DEFAULT_MAP_ZOOM_LEVEL,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            Err(_) => 8080,
        };

        let map_zoom_level = match env::var("MAP_ZOOM_LEVEL") {
            Ok(raw) => match raw.trim().parse::<u8>() {
                Ok(zoom) if (1..=20).contains(&zoom) => zoom,
                _ => return Err(ConfigError::Invalid("MAP_ZOOM_LEVEL", raw)),
            },
            Err(_) => DEFAULT_MAP_ZOOM_LEVEL,
        };

        let storage_key = env::var("STORAGE_KEY")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|_| slots::WORKOUTS.to_string());
        if storage_key.is_empty() {
            return Err(ConfigError::Invalid("STORAGE_KEY", storage_key));
        }

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port,
            storage_dir: env::var("STORAGE_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            storage_key,
            map_zoom_level,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
