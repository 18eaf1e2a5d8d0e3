//! Membership domain events.
//!
//! Events emitted by the workflow engine as memberships move through their
//! lifecycle. Used for audit logging and for integration with the hosting
//! system.
//!
//! # Event Naming Convention
//!
//! Events are named in past tense to indicate something that has already
//! happened: `Created` not `CreateMembership`.

use crate::domain::foundation::{EventEnvelope, MembershipId, Timestamp};
use serde::{Deserialize, Serialize};

/// Events that occur during the membership lifecycle.
///
/// Publication order follows persistence: an event is only emitted after the
/// corresponding state change was durably stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MembershipEvent {
    /// A membership was durably created under a provider's workflow.
    Created {
        membership_id: MembershipId,
        workflow: String,
        occurred_at: Timestamp,
    },

    /// The remote platform confirmed cancellation and the local record
    /// transitioned to Cancelled.
    Cancelled {
        membership_id: MembershipId,
        workflow: String,
        occurred_at: Timestamp,
    },
}

impl MembershipEvent {
    /// Returns the event type string used for routing.
    pub fn event_type(&self) -> &'static str {
        match self {
            MembershipEvent::Created { .. } => "membership.created",
            MembershipEvent::Cancelled { .. } => "membership.cancelled",
        }
    }

    /// Returns the id of the membership this event belongs to.
    pub fn membership_id(&self) -> MembershipId {
        match self {
            MembershipEvent::Created { membership_id, .. }
            | MembershipEvent::Cancelled { membership_id, .. } => *membership_id,
        }
    }

    /// Returns when the event occurred.
    pub fn occurred_at(&self) -> Timestamp {
        match self {
            MembershipEvent::Created { occurred_at, .. }
            | MembershipEvent::Cancelled { occurred_at, .. } => *occurred_at,
        }
    }

    /// Wraps this event in a transport envelope.
    pub fn to_envelope(&self) -> EventEnvelope {
        EventEnvelope::new(
            self.event_type(),
            self.membership_id().to_string(),
            self.occurred_at(),
            serde_json::to_value(self)
                .expect("membership events always serialize"),
        )
    }
}
