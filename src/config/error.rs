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
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Log filter directive cannot be empty")]
    EmptyLogLevel,

    #[error("Requirement pass threshold must be within 0-100, got {0}")]
    InvalidPassThreshold(f64),

    #[error("Synergy bonus fraction must be within 0-0.5, got {0}")]
    InvalidSynergyBonus(f64),

    #[error("Effort ratio must be within 0-1, got {0}")]
    InvalidEffortRatio(f64),
}
