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
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Push delivery timeout must be between 1 and 60 seconds")]
    InvalidPushTimeout,

    #[error("Push max_concurrency must be between 1 and 64")]
    InvalidConcurrency,

    #[error("Invalid Redis URL format")]
    InvalidRedisUrl,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool size must be between 1 and 100")]
    InvalidPoolSize,

    #[error("Device check interval must be at least 60 seconds")]
    InvalidCheckInterval,
}
