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
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid socket address: {0}")]
    InvalidSocketAddr(String),

    #[error("URL must use http or https: {0}")]
    InvalidUrl(&'static str),

    #[error("Threshold must be in (0, 1]: {0}")]
    InvalidThreshold(&'static str),

    #[error("Concurrency bound must be at least 1")]
    InvalidConcurrency,

    #[error("Idle timeout must be positive: {0}")]
    InvalidIdleTimeout(&'static str),

    #[error("Reply must have at least one non-empty line: {0}")]
    EmptyReply(&'static str),
}
