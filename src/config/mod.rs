//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PARTNER_LIFT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use partner_lift::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Pass threshold: {}", config.analysis.requirement_pass_threshold);
//! ```

mod analysis;
mod error;
mod logging;

pub use analysis::AnalysisConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Logging configuration (filter, format)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Analysis engine tunables
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PARTNER_LIFT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PARTNER_LIFT__LOGGING__FORMAT=json` -> `logging.format = json`
    /// - `PARTNER_LIFT__ANALYSIS__REVENUE_MODEL=equal` -> `analysis.revenue_model = equal`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PARTNER_LIFT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.logging.validate()?;
        self.analysis.validate()?;
        Ok(())
    }
}
