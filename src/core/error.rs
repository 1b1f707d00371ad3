//! Error types for the logger
//!
//! Only configuration entry points and appenders return these. The dispatch
//! path swallows every error so a failing sink can never fail the caller.

use std::path::Path;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// The file sink could not open its target
    #[error("Failed to open log file '{path}': {source}")]
    FileOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Write or flush failure inside a sink
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON configuration error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Malformed channel filter pattern
    #[error("Invalid channel filter '{pattern}': {message}")]
    InvalidFilter { pattern: String, message: String },

    /// Failure reported by a custom appender
    #[error("Sink error: {0}")]
    SinkError(String),
}

impl LoggerError {
    pub fn file_open(path: &Path, source: std::io::Error) -> Self {
        LoggerError::FileOpen {
            path: path.display().to_string(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an invalid filter error
    pub fn filter(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidFilter {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    pub fn sink<S: Into<String>>(msg: S) -> Self {
        LoggerError::SinkError(msg.into())
    }
}
