//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Change window must be at least one second")]
    InvalidChangeWindow,

    #[error("Lock duration must be at least one second")]
    InvalidLockDuration,

    #[error("Lock duration ({lock_secs}s) is shorter than the change window ({change_window_secs}s)")]
    LockShorterThanWindow {
        change_window_secs: u64,
        lock_secs: u64,
    },

    #[error("Tick interval must be between 1ms and 60000ms, got {0}ms")]
    InvalidTickInterval(u64),

    #[error("Record file name must not be empty")]
    EmptyRecordFile,

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
