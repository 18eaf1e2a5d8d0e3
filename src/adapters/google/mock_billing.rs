//! Mock billing client for testing.
//!
//! Provides a configurable mock implementation of `BillingClient` for unit
//! and integration tests. Supports:
//! - Call tracking with exact argument capture
//! - Per-method error injection
//! - Pre-configured purchase records

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{BillingClient, BillingError, PurchaseRecord};

/// Mock billing client for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockBillingClient::new();
/// mock.set_method_error("cancel_subscription", BillingError::rate_limited("quota"));
///
/// let result = mock.cancel_subscription("com.example.app", "sub", "tok").await;
/// assert!(result.is_err());
/// assert_eq!(mock.cancel_calls().len(), 1);
/// ```
#[derive(Default)]
pub struct MockBillingClient {
    /// Inner state (thread-safe for async tests).
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Track method calls for assertions.
    call_log: Vec<RecordedCall>,

    /// Specific errors by method name.
    method_errors: HashMap<String, BillingError>,

    /// Purchase record returned by `query_purchase`.
    purchase: Option<PurchaseRecord>,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub package_name: String,
    pub product_id: String,
    pub purchase_token: String,
}

impl MockBillingClient {
    /// Create a new mock with no configured behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an error to return from a specific method.
    pub fn set_method_error(&self, method: &str, error: BillingError) {
        self.inner
            .lock()
            .unwrap()
            .method_errors
            .insert(method.to_string(), error);
    }

    /// Clear all configured errors.
    pub fn clear_errors(&self) {
        self.inner.lock().unwrap().method_errors.clear();
    }

    /// Set the purchase record returned by `query_purchase`.
    pub fn set_purchase(&self, purchase: PurchaseRecord) {
        self.inner.lock().unwrap().purchase = Some(purchase);
    }

    /// Get all recorded calls.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.lock().unwrap().call_log.clone()
    }

    /// Get recorded `cancel_subscription` calls.
    pub fn cancel_calls(&self) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == "cancel_subscription")
            .collect()
    }

    /// Check if a method was called.
    pub fn was_called(&self, method: &str) -> bool {
        self.calls().iter().any(|c| c.method == method)
    }

    fn record(&self, method: &str, package_name: &str, product_id: &str, purchase_token: &str) {
        self.inner.lock().unwrap().call_log.push(RecordedCall {
            method: method.to_string(),
            package_name: package_name.to_string(),
            product_id: product_id.to_string(),
            purchase_token: purchase_token.to_string(),
        });
    }

    fn injected_error(&self, method: &str) -> Option<BillingError> {
        self.inner.lock().unwrap().method_errors.get(method).cloned()
    }
}

#[async_trait]
impl BillingClient for MockBillingClient {
    async fn cancel_subscription(
        &self,
        package_name: &str,
        product_id: &str,
        purchase_token: &str,
    ) -> Result<(), BillingError> {
        self.record("cancel_subscription", package_name, product_id, purchase_token);
        if let Some(error) = self.injected_error("cancel_subscription") {
            return Err(error);
        }
        Ok(())
    }

    async fn query_purchase(
        &self,
        package_name: &str,
        product_id: &str,
        purchase_token: &str,
    ) -> Result<PurchaseRecord, BillingError> {
        self.record("query_purchase", package_name, product_id, purchase_token);
        if let Some(error) = self.injected_error("query_purchase") {
            return Err(error);
        }
        self.inner
            .lock()
            .unwrap()
            .purchase
            .clone()
            .ok_or_else(|| BillingError::not_found("Purchase"))
    }
}
