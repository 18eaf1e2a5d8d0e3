//! Membership aggregate entity.
//!
//! A Membership is the local record of a remotely-billed subscription.
//! Exactly one provider is responsible for a membership at any time,
//! selected by the membership's workflow id.
//!
//! # Design Decisions
//!
//! - **Opaque payload**: provider-specific data lives in untyped records;
//!   only the owning provider knows their shape
//! - **Remote linkage**: remote identifiers are stored per provider scope key,
//!   at most one value per key
//! - **Engine-owned transitions**: state changes go through the validated
//!   state machine; providers never mutate local state

use crate::domain::foundation::{DomainError, MembershipId, StateMachine, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::{MembershipState, RemoteIdentifierMap};

/// Membership aggregate - a locally-tracked subscription record.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `workflow` names the state machine (and thereby the provider) that
///   drives this membership
/// - State transitions follow the `MembershipState` transition table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    /// Unique identifier for this membership.
    pub id: MembershipId,

    /// Workflow id routing lifecycle events to the responsible provider.
    pub workflow: String,

    /// Current lifecycle state.
    pub state: MembershipState,

    /// Provider-specific data records (e.g. `{"productId": "..."}`).
    pub payload: Vec<JsonValue>,

    /// Remote identifiers issued by billing platforms, keyed by scope.
    pub remote_ids: RemoteIdentifierMap,

    /// When the membership was created.
    pub created_at: Timestamp,

    /// When the membership was last updated.
    pub updated_at: Timestamp,

    /// When cancellation was confirmed (if cancelled).
    pub cancelled_at: Option<Timestamp>,
}

impl Membership {
    /// Creates a new active membership under the given workflow.
    ///
    /// Memberships under remote billing providers are created only after the
    /// remote purchase already happened, so the initial state is Active.
    pub fn create(id: MembershipId, workflow: impl Into<String>, payload: Vec<JsonValue>) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            workflow: workflow.into(),
            state: MembershipState::Active,
            payload,
            remote_ids: RemoteIdentifierMap::new(),
            created_at: now,
            updated_at: now,
            cancelled_at: None,
        }
    }

    /// Returns the remote identifier stored under the given scope key.
    pub fn remote_id(&self, key: &str) -> Option<&str> {
        self.remote_ids.get(key)
    }

    /// Stores a remote identifier, overwriting any previous value for the key.
    pub fn set_remote_id(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.remote_ids.insert(key, value);
        self.updated_at = Timestamp::now();
    }

    /// Marks this membership cancelled.
    ///
    /// Called by the workflow engine after the remote platform confirmed the
    /// cancellation, never before.
    ///
    /// # Errors
    ///
    /// Returns error if the transition from the current state is not allowed.
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        self.state = self.state.transition_to(MembershipState::Cancelled)?;
        self.cancelled_at = Some(Timestamp::now());
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Marks this membership expired.
    ///
    /// # Errors
    ///
    /// Returns error if the transition from the current state is not allowed.
    pub fn expire(&mut self) -> Result<(), DomainError> {
        self.state = self.state.transition_to(MembershipState::Expired)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}
