//! Core error types for tickmind-core.
//!
//! Defines the error hierarchy using thiserror. Alert-primitive failures are
//! deliberately non-fatal: the engine logs and swallows them so countdown
//! correctness never depends on audio or notification success.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for tickmind-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Alert-primitive errors (audio, notification)
    #[error("Alert error: {0}")]
    Alert(#[from] AlertError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Config directory could not be resolved or created
    #[error("Failed to resolve config directory: {0}")]
    DirUnavailable(String),
}

/// Alert-primitive errors.
///
/// These never escape the engine; they surface only as warn-level logs and
/// as return values from directly invoked primitives (e.g. the CLI's
/// one-shot alert command).
#[derive(Error, Debug)]
pub enum AlertError {
    /// No usable audio player was found on this system
    #[error("No audio player available")]
    NoPlayer,

    /// Spawning the audio player failed
    #[error("Failed to play sound via '{player}': {source}")]
    PlaybackFailed {
        player: String,
        #[source]
        source: std::io::Error,
    },

    /// Desktop notification could not be shown
    #[error("Failed to show notification: {0}")]
    NotificationFailed(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Interval length is negative or not a finite number
    #[error("Invalid interval length '{value}': {message}")]
    InvalidInterval { value: String, message: String },
}

impl From<notify_rust::error::Error> for AlertError {
    fn from(err: notify_rust::error::Error) -> Self {
        AlertError::NotificationFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
