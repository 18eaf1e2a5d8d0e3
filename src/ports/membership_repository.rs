//! Membership repository port.
//!
//! Persistence of membership records belongs to the hosting system; this port
//! is the narrow surface the workflow engine needs from it. The engine reads
//! records, saves them on creation, and writes back state transitions.

use crate::domain::foundation::{DomainError, MembershipId};
use crate::domain::membership::Membership;
use async_trait::async_trait;

/// Storage collaborator for membership records.
///
/// Implementations must ensure:
/// - `save` rejects a duplicate membership id
/// - `update` fails for a membership that was never saved
/// - reads reflect the latest completed write
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Persist a new membership.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the id already exists
    /// - `StorageError` on persistence failure
    async fn save(&self, membership: &Membership) -> Result<(), DomainError>;

    /// Update an existing membership.
    ///
    /// # Errors
    ///
    /// - `MembershipNotFound` if the membership doesn't exist
    /// - `StorageError` on persistence failure
    async fn update(&self, membership: &Membership) -> Result<(), DomainError>;

    /// Find a membership by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError>;
}
