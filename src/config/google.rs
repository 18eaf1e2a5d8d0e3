//! Google Play provider configuration

use serde::Deserialize;

use super::error::ValidationError;

fn default_api_base_url() -> String {
    "https://androidpublisher.googleapis.com".to_string()
}

/// Google Play provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GooglePlayConfig {
    /// Package whose subscriptions this provider manages
    pub package_name: String,

    /// Path to the service-account JSON key file
    pub service_account_key_path: String,

    /// Android Publisher API endpoint (overridable for tests)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl Default for GooglePlayConfig {
    fn default() -> Self {
        Self {
            package_name: String::new(),
            service_account_key_path: String::new(),
            api_base_url: default_api_base_url(),
        }
    }
}

impl GooglePlayConfig {
    /// Validate Google Play configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.package_name.is_empty() {
            return Err(ValidationError::MissingRequired(
                "GOOGLE__PACKAGE_NAME",
            ));
        }
        if self.service_account_key_path.is_empty() {
            return Err(ValidationError::MissingRequired(
                "GOOGLE__SERVICE_ACCOUNT_KEY_PATH",
            ));
        }

        // Play package names are reverse-DNS with at least one dot.
        if !self.package_name.contains('.') || self.package_name.contains(char::is_whitespace) {
            return Err(ValidationError::InvalidPackageName);
        }

        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(ValidationError::InvalidApiBaseUrl);
        }

        Ok(())
    }
}
