//! Membership provider port - the lifecycle contract platform providers
//! implement.
//!
//! The workflow engine treats all providers uniformly through this trait and
//! routes lifecycle events by workflow id. Capabilities beyond the base
//! contract (currently: remote cancellation) are modeled as separate narrow
//! traits discovered through an accessor, so the engine checks support before
//! dispatch instead of probing at call time.
//!
//! # Design
//!
//! - **Stateless between calls**: a provider owns configuration and a remote
//!   client handle, never membership data
//! - **Shared read-only**: one instance serves every membership under its
//!   workflow, so no locking is needed inside a provider
//! - **Pass-through errors**: remote failures propagate unmodified; retry
//!   policy belongs to the engine

use crate::domain::foundation::{DomainError, ErrorCode, MembershipId};
use crate::domain::membership::Membership;
use async_trait::async_trait;

use super::BillingError;

/// Arbitrary values handed to a provider alongside lifecycle hooks.
pub type PluginValues = serde_json::Map<String, serde_json::Value>;

/// Contract every platform-specific membership provider implements.
#[async_trait]
pub trait MembershipProvider: Send + Sync {
    /// Identifier of the workflow this provider drives.
    ///
    /// Pure and constant for a given implementation; the engine uses it to
    /// route lifecycle events.
    fn workflow_id(&self) -> &'static str;

    /// Human-readable provider name, for display by the hosting system.
    fn label(&self) -> &'static str;

    /// Hook invoked exactly once after a membership is durably created under
    /// this provider.
    ///
    /// Callers may retry on ambiguous failure, so side effects must tolerate
    /// duplicate invocation. The default is a no-op, which is a valid
    /// implementation.
    async fn post_create_membership(
        &self,
        membership: &Membership,
        plugin_values: &PluginValues,
    ) -> Result<(), ProviderError> {
        let _ = (membership, plugin_values);
        Ok(())
    }

    /// Returns the cancellation capability if this provider supports it.
    ///
    /// The engine checks this before dispatching a cancellation; a provider
    /// without the capability never sees the request.
    fn cancellation(&self) -> Option<&dyn SupportsCancellation> {
        None
    }
}

/// Optional capability: the provider can cancel the remote subscription
/// backing a membership.
#[async_trait]
pub trait SupportsCancellation: Send + Sync {
    /// Request cancellation of the remote subscription backing `membership`.
    ///
    /// On success no local state is mutated; transitioning the membership's
    /// workflow state is the engine's responsibility. Failures leave remote
    /// and local state as they were (modulo wire ambiguity on timeouts).
    async fn cancel(&self, membership: &Membership) -> Result<(), ProviderError>;
}

/// Errors surfaced by provider operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The membership lacks the payload shape or remote linkage the provider
    /// requires. Never retryable; the record must be fixed upstream.
    DataIntegrity {
        membership: MembershipId,
        reason: String,
    },

    /// The remote billing call failed. Carries the platform classification
    /// unmodified, including whether a retry makes sense.
    Remote(BillingError),
}

impl ProviderError {
    /// Create a data integrity error for a membership.
    pub fn data_integrity(membership: MembershipId, reason: impl Into<String>) -> Self {
        ProviderError::DataIntegrity {
            membership,
            reason: reason.into(),
        }
    }

    /// Returns true if retrying the operation could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::DataIntegrity { .. } => false,
            ProviderError::Remote(err) => err.retryable,
        }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ProviderError::DataIntegrity { .. } => ErrorCode::DataIntegrity,
            ProviderError::Remote(_) => ErrorCode::RemoteApiError,
        }
    }

    /// Returns a descriptive error message.
    pub fn message(&self) -> String {
        match self {
            ProviderError::DataIntegrity { membership, reason } => {
                format!("Membership {} has broken remote linkage: {}", membership, reason)
            }
            ProviderError::Remote(err) => format!("Billing platform call failed: {}", err),
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ProviderError {}

impl From<BillingError> for ProviderError {
    fn from(err: BillingError) -> Self {
        ProviderError::Remote(err)
    }
}

impl From<ProviderError> for DomainError {
    fn from(err: ProviderError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::BillingErrorCode;

    // Trait object safety tests
    #[test]
    fn membership_provider_is_object_safe() {
        fn _accepts_dyn(_provider: &dyn MembershipProvider) {}
    }

    #[test]
    fn supports_cancellation_is_object_safe() {
        fn _accepts_dyn(_capability: &dyn SupportsCancellation) {}
    }

    #[test]
    fn data_integrity_is_never_retryable() {
        let err = ProviderError::data_integrity(MembershipId::new(), "payload has no productId");
        assert!(!err.is_retryable());
        assert_eq!(err.code(), ErrorCode::DataIntegrity);
    }

    #[test]
    fn remote_error_keeps_retryable_classification() {
        let retryable = ProviderError::from(BillingError::rate_limited("quota"));
        assert!(retryable.is_retryable());

        let permanent = ProviderError::from(BillingError::authentication("bad key"));
        assert!(!permanent.is_retryable());
    }

    #[test]
    fn remote_error_keeps_platform_code() {
        let err = ProviderError::from(BillingError::not_found("Subscription"));
        match err {
            ProviderError::Remote(inner) => assert_eq!(inner.code, BillingErrorCode::NotFound),
            other => panic!("expected Remote, got {:?}", other),
        }
    }

    #[test]
    fn data_integrity_message_names_membership() {
        let id = MembershipId::new();
        let err = ProviderError::data_integrity(id, "no purchase token");
        assert!(err.message().contains(&id.to_string()));
        assert!(err.message().contains("no purchase token"));
    }

    #[test]
    fn converts_to_domain_error_with_matching_code() {
        let err = ProviderError::from(BillingError::network("reset"));
        let domain: DomainError = err.into();
        assert_eq!(domain.code, ErrorCode::RemoteApiError);
    }
}
