//! Billing client port for a remote billing platform.
//!
//! The billing platform is an opaque collaborator with a narrow operation
//! set: cancel a subscription, query a purchase. Its wire schema is owned by
//! the platform; this port only carries the fields the membership system can
//! act on.
//!
//! # Design
//!
//! - **Pass-through boundary**: no retries and no error reclassification
//!   happen here; retry policy belongs to the invoking workflow engine
//! - **Explicit retryability**: every failure states whether retrying makes
//!   sense, and that classification must survive all the way to the caller

use crate::domain::foundation::Timestamp;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for one remote billing platform.
///
/// One blocking outbound call per operation; implementations hold no mutable
/// state shared between concurrent calls.
#[async_trait]
pub trait BillingClient: Send + Sync {
    /// Cancel the remote subscription identified by (package, product, token).
    ///
    /// A timeout is surfaced as a plain failure: the remote cancellation may
    /// or may not have happened, and this port does not mask that ambiguity.
    async fn cancel_subscription(
        &self,
        package_name: &str,
        product_id: &str,
        purchase_token: &str,
    ) -> Result<(), BillingError>;

    /// Fetch the remote purchase record backing a subscription.
    async fn query_purchase(
        &self,
        package_name: &str,
        product_id: &str,
        purchase_token: &str,
    ) -> Result<PurchaseRecord, BillingError>;
}

/// Remote purchase state, reduced to the fields the membership system reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    /// Order id assigned by the platform.
    pub order_id: Option<String>,

    /// When the subscription period started.
    pub start_at: Option<Timestamp>,

    /// When the current period expires.
    pub expiry_at: Option<Timestamp>,

    /// Whether the subscription renews automatically.
    pub auto_renewing: bool,

    /// Why the subscription was cancelled, if it was.
    pub cancel_reason: Option<CancelReason>,

    /// Whether the purchase was acknowledged.
    pub acknowledged: bool,
}

/// Who or what cancelled a remote subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    /// The user cancelled voluntarily.
    User,

    /// The platform cancelled (e.g. billing failure).
    System,

    /// The subscription was replaced by a new one.
    Replaced,

    /// The developer cancelled.
    Developer,

    /// Reason code not recognized.
    Unknown,
}

/// Errors from billing platform operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingError {
    /// Error code for categorization.
    pub code: BillingErrorCode,

    /// Human-readable message.
    pub message: String,

    /// HTTP status returned by the platform (if the call got that far).
    pub http_status: Option<u16>,

    /// Whether the operation can be retried.
    pub retryable: bool,
}

impl BillingError {
    /// Create a new billing error.
    pub fn new(code: BillingErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            http_status: None,
            retryable: code.is_retryable(),
        }
    }

    /// Attach the HTTP status the platform responded with.
    pub fn with_http_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(BillingErrorCode::NetworkError, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(BillingErrorCode::AuthenticationError, message)
    }

    /// Create a permission error.
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(BillingErrorCode::PermissionDenied, message)
    }

    /// Create a not found error.
    pub fn not_found(resource: &str) -> Self {
        Self::new(
            BillingErrorCode::NotFound,
            format!("{} not found", resource),
        )
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(BillingErrorCode::InvalidArgument, message)
    }

    /// Create a rate limit error.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(BillingErrorCode::RateLimitExceeded, message)
    }

    /// Create a platform unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(BillingErrorCode::PlatformUnavailable, message)
    }
}

impl std::fmt::Display for BillingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for BillingError {}

/// Billing error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// API authentication failed.
    AuthenticationError,

    /// Credentials lack access to the package.
    PermissionDenied,

    /// Purchase or subscription not found.
    NotFound,

    /// Request rejected as malformed by the platform.
    InvalidArgument,

    /// Rate limit exceeded.
    RateLimitExceeded,

    /// Platform returned a server-side failure.
    PlatformUnavailable,

    /// Unknown error.
    Unknown,
}

impl BillingErrorCode {
    /// Check if this error type is typically retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BillingErrorCode::NetworkError
                | BillingErrorCode::RateLimitExceeded
                | BillingErrorCode::PlatformUnavailable
        )
    }
}

impl std::fmt::Display for BillingErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BillingErrorCode::NetworkError => "network_error",
            BillingErrorCode::AuthenticationError => "authentication_error",
            BillingErrorCode::PermissionDenied => "permission_denied",
            BillingErrorCode::NotFound => "not_found",
            BillingErrorCode::InvalidArgument => "invalid_argument",
            BillingErrorCode::RateLimitExceeded => "rate_limit_exceeded",
            BillingErrorCode::PlatformUnavailable => "platform_unavailable",
            BillingErrorCode::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}
