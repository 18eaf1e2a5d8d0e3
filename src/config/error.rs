//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Service account key file '{path}' could not be read: {reason}")]
    KeyFileUnreadable { path: String, reason: String },

    #[error("Service account key file '{path}' is not a valid key: {reason}")]
    KeyFileInvalid { path: String, reason: String },

    #[error("HTTP client construction failed: {0}")]
    HttpClient(String),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Application display name cannot be empty")]
    EmptyDisplayName,

    #[error("Invalid package name (expected reverse-DNS form, e.g. com.example.app)")]
    InvalidPackageName,

    #[error("API base URL must be an http(s) URL")]
    InvalidApiBaseUrl,
}
