//! Application identity configuration

use serde::Deserialize;

use super::error::ValidationError;

fn default_display_name() -> String {
    "Membership Bridge".to_string()
}

/// Application identity configuration.
///
/// The display name is only used to label outbound remote clients; it never
/// reaches the billing platform's data model.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationConfig {
    /// Human-readable application name
    #[serde(default = "default_display_name")]
    pub display_name: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            display_name: default_display_name(),
        }
    }
}

impl ApplicationConfig {
    /// User-agent string for outbound HTTP clients.
    pub fn user_agent(&self) -> String {
        format!("{}/{}", self.display_name, env!("CARGO_PKG_VERSION"))
    }

    /// Validate application configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.display_name.trim().is_empty() {
            return Err(ValidationError::EmptyDisplayName);
        }
        Ok(())
    }
}
