//! Persistence layer (durable key-value slots).

pub mod repository;
pub mod slot;

pub use repository::WorkoutRepository;
pub use slot::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};

/// Slot names as constants.
pub mod slots {
    /// Serialized workout list.
    pub const WORKOUTS: &str = "workouts";
}

/// Errors from the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O error on slot '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid slot name: {0}")]
    InvalidKey(String),

    #[error("Failed to encode workouts: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode stored workouts: {0}")]
    Decode(#[source] serde_json::Error),
}
