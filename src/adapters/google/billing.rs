//! Google Play billing client.
//!
//! Implements the `BillingClient` port over the Android Publisher v3 REST
//! surface. One authenticated HTTP call per operation; no retries here -
//! the workflow engine owns retry policy, so every failure is returned with
//! its platform classification intact.

use std::sync::Arc;

use async_trait::async_trait;

use crate::ports::{BillingClient, BillingError, BillingErrorCode, PurchaseRecord};

use super::api_types::SubscriptionPurchase;
use super::auth::{ServiceAccountAuthenticator, ANDROID_PUBLISHER_SCOPE};

const DEFAULT_API_BASE_URL: &str = "https://androidpublisher.googleapis.com";

/// Billing client for the Android Publisher API.
pub struct GooglePlayBillingClient {
    api_base_url: String,
    http: reqwest::Client,
    auth: Arc<ServiceAccountAuthenticator>,
}

impl GooglePlayBillingClient {
    /// Creates a client using the production API endpoint.
    pub fn new(http: reqwest::Client, auth: Arc<ServiceAccountAuthenticator>) -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            http,
            auth,
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    fn subscription_url(
        &self,
        package_name: &str,
        product_id: &str,
        purchase_token: &str,
        suffix: &str,
    ) -> String {
        format!(
            "{}/androidpublisher/v3/applications/{}/purchases/subscriptions/{}/tokens/{}{}",
            self.api_base_url, package_name, product_id, purchase_token, suffix
        )
    }

    async fn access_token(&self) -> Result<String, BillingError> {
        self.auth.token(&[ANDROID_PUBLISHER_SCOPE]).await
    }

    /// Maps a non-success platform response to a structured failure.
    fn map_failure(status: reqwest::StatusCode, body: String) -> BillingError {
        let code = match status.as_u16() {
            400 => BillingErrorCode::InvalidArgument,
            401 => BillingErrorCode::AuthenticationError,
            403 => BillingErrorCode::PermissionDenied,
            404 => BillingErrorCode::NotFound,
            429 => BillingErrorCode::RateLimitExceeded,
            500..=599 => BillingErrorCode::PlatformUnavailable,
            _ => BillingErrorCode::Unknown,
        };

        BillingError::new(code, format!("Android Publisher API error: {}", body))
            .with_http_status(status.as_u16())
    }
}

#[async_trait]
impl BillingClient for GooglePlayBillingClient {
    async fn cancel_subscription(
        &self,
        package_name: &str,
        product_id: &str,
        purchase_token: &str,
    ) -> Result<(), BillingError> {
        let access_token = self.access_token().await?;
        let url = self.subscription_url(package_name, product_id, purchase_token, ":cancel");

        let response = self
            .http
            .post(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| BillingError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                http_status = status.as_u16(),
                package = package_name,
                product_id,
                "subscription cancel rejected"
            );
            return Err(Self::map_failure(status, body));
        }

        tracing::info!(
            package = package_name,
            product_id,
            "subscription cancellation accepted"
        );
        Ok(())
    }

    async fn query_purchase(
        &self,
        package_name: &str,
        product_id: &str,
        purchase_token: &str,
    ) -> Result<PurchaseRecord, BillingError> {
        let access_token = self.access_token().await?;
        let url = self.subscription_url(package_name, product_id, purchase_token, "");

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| BillingError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                http_status = status.as_u16(),
                package = package_name,
                product_id,
                "purchase query rejected"
            );
            return Err(Self::map_failure(status, body));
        }

        let purchase: SubscriptionPurchase = response.json().await.map_err(|e| {
            BillingError::new(
                BillingErrorCode::Unknown,
                format!("malformed purchase resource: {}", e),
            )
        })?;

        Ok(purchase.into_record())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::google::ServiceAccountKey;
    use secrecy::SecretString;

    fn client() -> GooglePlayBillingClient {
        let key = ServiceAccountKey {
            client_email: "svc@example.iam.gserviceaccount.com".to_string(),
            private_key: SecretString::new("placeholder".to_string()),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
        };
        let http = reqwest::Client::new();
        let auth = Arc::new(ServiceAccountAuthenticator::new(key, http.clone()));
        GooglePlayBillingClient::new(http, auth)
    }

    #[test]
    fn subscription_url_embeds_all_identifiers() {
        let client = client().with_base_url("http://localhost:8080");
        let url = client.subscription_url("com.example.app", "sub_premium", "tok_123", ":cancel");

        assert_eq!(
            url,
            "http://localhost:8080/androidpublisher/v3/applications/com.example.app/purchases/subscriptions/sub_premium/tokens/tok_123:cancel"
        );
    }

    #[test]
    fn default_base_url_is_production_endpoint() {
        let client = client();
        let url = client.subscription_url("p", "s", "t", "");
        assert!(url.starts_with("https://androidpublisher.googleapis.com/"));
    }

    #[test]
    fn map_failure_classifies_statuses() {
        let cases = [
            (400, BillingErrorCode::InvalidArgument, false),
            (401, BillingErrorCode::AuthenticationError, false),
            (403, BillingErrorCode::PermissionDenied, false),
            (404, BillingErrorCode::NotFound, false),
            (429, BillingErrorCode::RateLimitExceeded, true),
            (500, BillingErrorCode::PlatformUnavailable, true),
            (503, BillingErrorCode::PlatformUnavailable, true),
            (418, BillingErrorCode::Unknown, false),
        ];

        for (status, expected_code, expected_retryable) in cases {
            let err = GooglePlayBillingClient::map_failure(
                reqwest::StatusCode::from_u16(status).unwrap(),
                "{}".to_string(),
            );
            assert_eq!(err.code, expected_code, "status {}", status);
            assert_eq!(err.retryable, expected_retryable, "status {}", status);
            assert_eq!(err.http_status, Some(status));
        }
    }
}
