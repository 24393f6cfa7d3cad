//! Core error types for focusloop-core.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focusloop-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Schedule construction errors
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Timer engine errors
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// State storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Schedule-builder errors.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// The requested total duration cannot produce a schedule.
    #[error("total duration must be positive (got {total_secs}s)")]
    InvalidDuration { total_secs: u64 },

    /// A cadence field is zero.
    #[error("cadence durations and session count must be non-zero")]
    InvalidCadence,
}

/// Timer-engine errors.
///
/// Misplaced control calls (`pause` while idle and the like) are silent
/// no-ops, not errors; only operations that would lose a run or index past
/// the schedule surface here.
#[derive(Error, Debug)]
pub enum TimerError {
    /// The builder returned no sessions. Unreachable given the builder's
    /// one-session floor, but checked before indexing.
    #[error("schedule is empty")]
    EmptySchedule,

    /// `setup_schedule` was called while a run is in progress.
    #[error("timer is already active; stop or reset it first")]
    AlreadyActive,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// State-storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the state database
    #[error("Failed to open state database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// The data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::QueryFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
