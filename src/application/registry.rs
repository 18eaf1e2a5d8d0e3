//! Provider registry.
//!
//! Maps workflow ids to provider instances so the engine can resolve the one
//! provider responsible for a membership. Registration happens once at
//! startup; lookups are read-only afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::membership::Membership;
use crate::ports::MembershipProvider;

use super::MembershipError;

/// Registry of membership providers, keyed by the workflow each one drives.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<&'static str, Arc<dyn MembershipProvider>>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider under its declared workflow id.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateProvider` if a provider already claimed the same
    /// workflow id; exactly one provider is responsible per workflow.
    pub fn register(
        &mut self,
        provider: Arc<dyn MembershipProvider>,
    ) -> Result<(), MembershipError> {
        let workflow = provider.workflow_id();
        if self.providers.contains_key(workflow) {
            return Err(MembershipError::DuplicateProvider(workflow));
        }
        self.providers.insert(workflow, provider);
        Ok(())
    }

    /// Returns the provider registered for a workflow id, if any.
    pub fn get(&self, workflow: &str) -> Option<&Arc<dyn MembershipProvider>> {
        self.providers.get(workflow)
    }

    /// Resolves the provider responsible for a membership.
    ///
    /// # Errors
    ///
    /// Returns `ProviderNotFound` if no provider claims the membership's
    /// workflow id.
    pub fn for_membership(
        &self,
        membership: &Membership,
    ) -> Result<&Arc<dyn MembershipProvider>, MembershipError> {
        self.get(&membership.workflow)
            .ok_or_else(|| MembershipError::provider_not_found(membership.workflow.clone()))
    }

    /// Registered workflow ids, sorted for deterministic output.
    pub fn workflow_ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<&'static str> = self.providers.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
