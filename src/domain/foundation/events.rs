//! Event envelope for domain event transport.
//!
//! Domain events are wrapped in an envelope before being handed to the
//! publisher port, so transports only ever deal with one shape.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::{EventId, Timestamp};

/// Transport wrapper for a serialized domain event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique ID for this event instance (deduplication).
    pub event_id: EventId,

    /// Event type string used for routing (e.g. "membership.cancelled").
    pub event_type: String,

    /// ID of the aggregate that emitted the event.
    pub aggregate_id: String,

    /// When the event occurred.
    pub occurred_at: Timestamp,

    /// Serialized event payload.
    pub payload: JsonValue,
}

impl EventEnvelope {
    /// Creates an envelope for a freshly-emitted event.
    pub fn new(
        event_type: impl Into<String>,
        aggregate_id: impl Into<String>,
        occurred_at: Timestamp,
        payload: JsonValue,
    ) -> Self {
        Self {
            event_id: EventId::new(),
            event_type: event_type.into(),
            aggregate_id: aggregate_id.into(),
            occurred_at,
            payload,
        }
    }
}
