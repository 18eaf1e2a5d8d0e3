//! Wire types for the Android Publisher v3 API.
//!
//! Only the fields the membership system reads are deserialized; everything
//! else in the platform's schema is ignored.

use serde::Deserialize;

use crate::domain::foundation::Timestamp;
use crate::ports::{CancelReason, PurchaseRecord};

/// Subscription purchase resource as returned by the purchases endpoint.
///
/// Numeric 64-bit fields arrive as JSON strings (int64 encoding).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPurchase {
    pub order_id: Option<String>,
    pub start_time_millis: Option<String>,
    pub expiry_time_millis: Option<String>,
    #[serde(default)]
    pub auto_renewing: bool,
    pub cancel_reason: Option<i32>,
    pub acknowledgement_state: Option<i32>,
}

impl SubscriptionPurchase {
    /// Reduces the wire resource to the record the domain reads.
    pub fn into_record(self) -> PurchaseRecord {
        PurchaseRecord {
            order_id: self.order_id,
            start_at: parse_millis(self.start_time_millis.as_deref()),
            expiry_at: parse_millis(self.expiry_time_millis.as_deref()),
            auto_renewing: self.auto_renewing,
            cancel_reason: self.cancel_reason.map(|code| match code {
                0 => CancelReason::User,
                1 => CancelReason::System,
                2 => CancelReason::Replaced,
                3 => CancelReason::Developer,
                _ => CancelReason::Unknown,
            }),
            acknowledged: self.acknowledgement_state == Some(1),
        }
    }
}

fn parse_millis(value: Option<&str>) -> Option<Timestamp> {
    value
        .and_then(|s| s.parse::<i64>().ok())
        .map(Timestamp::from_unix_millis)
}

/// OAuth token endpoint response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
}
