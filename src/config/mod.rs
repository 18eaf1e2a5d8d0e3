//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is loaded
//! with the `MEMBERSHIP_BRIDGE_` prefix and nested values use double
//! underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use membership_bridge::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod application;
mod error;
mod google;

pub use application::ApplicationConfig;
pub use error::{ConfigError, ValidationError};
pub use google::GooglePlayConfig;

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Application identity (display name used to label outbound clients)
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Google Play provider configuration
    pub google: GooglePlayConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `MEMBERSHIP_BRIDGE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// For example, `MEMBERSHIP_BRIDGE_GOOGLE__PACKAGE_NAME` maps to
    /// `google.package_name`.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("MEMBERSHIP_BRIDGE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Validate every configuration section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.application.validate()?;
        self.google.validate()?;
        Ok(())
    }
}
