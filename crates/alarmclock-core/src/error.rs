//! Core error types for alarmclock-core.
//!
//! The only recoverable domain error is [`InvalidTimeError`], raised when the
//! alarm form cannot be turned into a valid target. Everything else here
//! belongs to the configuration layer.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for alarmclock-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Alarm form could not be parsed
    #[error("Invalid time: {0}")]
    InvalidTime(#[from] InvalidTimeError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which field of the alarm form was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Hour,
    Minute,
}

impl fmt::Display for TimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeField::Hour => f.write_str("hour"),
            TimeField::Minute => f.write_str("minute"),
        }
    }
}

/// The alarm form held something that is not a valid 12-hour time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidTimeError {
    /// Free text that does not parse as an integer
    #[error("{field} '{input}' is not a number")]
    NotANumber { field: TimeField, input: String },

    /// Parsed, but outside the 12-hour clock
    #[error("{field} {value} is out of range ({min}-{max})")]
    OutOfRange {
        field: TimeField,
        value: i64,
        min: u8,
        max: u8,
    },
}

impl InvalidTimeError {
    pub fn field(&self) -> TimeField {
        match self {
            InvalidTimeError::NotANumber { field, .. } => *field,
            InvalidTimeError::OutOfRange { field, .. } => *field,
        }
    }
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

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
