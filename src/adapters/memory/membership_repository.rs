//! In-memory membership repository for testing.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, MembershipId};
use crate::domain::membership::Membership;
use crate::ports::MembershipRepository;

/// In-memory membership repository.
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. This is acceptable
/// for test code but this adapter should NOT be used in production.
#[derive(Default)]
pub struct InMemoryMembershipRepository {
    memberships: RwLock<Vec<Membership>>,
}

impl InMemoryMembershipRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored memberships (for test assertions).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn membership_count(&self) -> usize {
        self.memberships
            .read()
            .expect("InMemoryMembershipRepository: lock poisoned")
            .len()
    }
}

#[async_trait]
impl MembershipRepository for InMemoryMembershipRepository {
    async fn save(&self, membership: &Membership) -> Result<(), DomainError> {
        let mut memberships = self
            .memberships
            .write()
            .expect("InMemoryMembershipRepository: lock poisoned");

        if memberships.iter().any(|m| m.id == membership.id) {
            return Err(DomainError::validation(
                "id",
                format!("Membership {} already exists", membership.id),
            ));
        }

        memberships.push(membership.clone());
        Ok(())
    }

    async fn update(&self, membership: &Membership) -> Result<(), DomainError> {
        let mut memberships = self
            .memberships
            .write()
            .expect("InMemoryMembershipRepository: lock poisoned");

        match memberships.iter_mut().find(|m| m.id == membership.id) {
            Some(existing) => {
                *existing = membership.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::MembershipNotFound,
                format!("Membership {} does not exist", membership.id),
            )),
        }
    }

    async fn find_by_id(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError> {
        let memberships = self
            .memberships
            .read()
            .expect("InMemoryMembershipRepository: lock poisoned");
        Ok(memberships.iter().find(|m| &m.id == id).cloned())
    }
}
