//! CancelMembershipHandler - Command handler for cancelling memberships.

use std::sync::Arc;

use crate::application::{MembershipError, ProviderRegistry};
use crate::domain::foundation::{MembershipId, StateMachine, Timestamp};
use crate::domain::membership::{Membership, MembershipEvent, MembershipState};
use crate::ports::{EventPublisher, MembershipRepository};

/// Command to cancel a membership.
#[derive(Debug, Clone)]
pub struct CancelMembershipCommand {
    pub membership_id: MembershipId,
}

/// Result of successful membership cancellation.
#[derive(Debug, Clone)]
pub struct CancelMembershipResult {
    pub membership: Membership,
    pub event: MembershipEvent,
}

/// Handler for cancelling memberships.
///
/// The provider's remote cancellation runs first; the local state transition
/// happens only after the remote platform confirmed. A failed remote call
/// leaves the stored membership untouched, so a retry is safe.
pub struct CancelMembershipHandler {
    registry: Arc<ProviderRegistry>,
    repository: Arc<dyn MembershipRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CancelMembershipHandler {
    pub fn new(
        registry: Arc<ProviderRegistry>,
        repository: Arc<dyn MembershipRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            registry,
            repository,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: CancelMembershipCommand,
    ) -> Result<CancelMembershipResult, MembershipError> {
        // 1. Load the membership
        let mut membership = self
            .repository
            .find_by_id(&cmd.membership_id)
            .await?
            .ok_or_else(|| MembershipError::not_found(cmd.membership_id))?;

        // 2. Reject impossible transitions before touching the remote platform
        if !membership
            .state
            .can_transition_to(&MembershipState::Cancelled)
        {
            return Err(MembershipError::invalid_state(
                format!("{:?}", membership.state),
                "cancel",
            ));
        }

        // 3. Resolve the responsible provider and check the capability
        let provider = self.registry.for_membership(&membership)?;
        let cancellation = provider.cancellation().ok_or_else(|| {
            MembershipError::cancellation_not_supported(membership.workflow.clone())
        })?;

        // 4. Remote cancellation; failures propagate with their original
        //    retryability and leave the stored record unchanged
        if let Err(err) = cancellation.cancel(&membership).await {
            tracing::warn!(
                membership_id = %membership.id,
                workflow = %membership.workflow,
                error = %err,
                retryable = err.is_retryable(),
                "remote cancellation failed"
            );
            return Err(err.into());
        }

        // 5. Transition and persist, now that the remote platform confirmed
        membership
            .cancel()
            .map_err(|e| MembershipError::invalid_state(format!("{:?}", membership.state), e.to_string()))?;
        self.repository.update(&membership).await?;

        // 6. Publish the lifecycle event
        let event = MembershipEvent::Cancelled {
            membership_id: membership.id,
            workflow: membership.workflow.clone(),
            occurred_at: Timestamp::now(),
        };
        self.event_publisher.publish(event.to_envelope()).await?;

        tracing::info!(
            membership_id = %membership.id,
            workflow = %membership.workflow,
            "membership cancelled"
        );

        Ok(CancelMembershipResult { membership, event })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{
        GooglePlayProvider, InMemoryEventBus, InMemoryMembershipRepository, MockBillingClient,
    };
    use crate::ports::{BillingError, MembershipProvider, ProviderError};
    use serde_json::json;

    const PACKAGE: &str = "com.example.app";

    struct NoCancellationProvider;

    impl MembershipProvider for NoCancellationProvider {
        fn workflow_id(&self) -> &'static str {
            "membership_local"
        }

        fn label(&self) -> &'static str {
            "Locally Managed"
        }
    }

    struct Fixture {
        handler: CancelMembershipHandler,
        repo: Arc<InMemoryMembershipRepository>,
        bus: Arc<InMemoryEventBus>,
        billing: Arc<MockBillingClient>,
    }

    fn fixture() -> Fixture {
        let billing = Arc::new(MockBillingClient::new());
        let provider = Arc::new(GooglePlayProvider::new(billing.clone(), PACKAGE));

        let mut registry = ProviderRegistry::new();
        registry.register(provider).unwrap();
        registry.register(Arc::new(NoCancellationProvider)).unwrap();

        let repo = Arc::new(InMemoryMembershipRepository::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let handler =
            CancelMembershipHandler::new(Arc::new(registry), repo.clone(), bus.clone());

        Fixture {
            handler,
            repo,
            bus,
            billing,
        }
    }

    async fn seed_google_membership(repo: &InMemoryMembershipRepository) -> Membership {
        let mut membership = Membership::create(
            MembershipId::new(),
            GooglePlayProvider::WORKFLOW_ID,
            vec![json!({"productId": "sub_premium"})],
        );
        membership.set_remote_id(GooglePlayProvider::PURCHASE_TOKEN_KEY, "tok_123");
        repo.save(&membership).await.unwrap();
        membership
    }

    #[tokio::test]
    async fn cancels_membership_and_persists_transition() {
        let f = fixture();
        let membership = seed_google_membership(&f.repo).await;

        let result = f
            .handler
            .handle(CancelMembershipCommand {
                membership_id: membership.id,
            })
            .await
            .unwrap();

        assert_eq!(result.membership.state, MembershipState::Cancelled);
        assert!(result.membership.cancelled_at.is_some());

        let stored = f.repo.find_by_id(&membership.id).await.unwrap().unwrap();
        assert_eq!(stored.state, MembershipState::Cancelled);
    }

    #[tokio::test]
    async fn issues_exactly_one_remote_call_with_stored_values() {
        let f = fixture();
        let membership = seed_google_membership(&f.repo).await;

        f.handler
            .handle(CancelMembershipCommand {
                membership_id: membership.id,
            })
            .await
            .unwrap();

        let calls = f.billing.cancel_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].package_name, PACKAGE);
        assert_eq!(calls[0].product_id, "sub_premium");
        assert_eq!(calls[0].purchase_token, "tok_123");
    }

    #[tokio::test]
    async fn publishes_cancelled_event() {
        let f = fixture();
        let membership = seed_google_membership(&f.repo).await;

        f.handler
            .handle(CancelMembershipCommand {
                membership_id: membership.id,
            })
            .await
            .unwrap();

        let events = f.bus.published_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "membership.cancelled");
        assert_eq!(events[0].aggregate_id, membership.id.to_string());
    }

    #[tokio::test]
    async fn fails_when_membership_not_found() {
        let f = fixture();

        let result = f
            .handler
            .handle(CancelMembershipCommand {
                membership_id: MembershipId::new(),
            })
            .await;

        assert!(matches!(result, Err(MembershipError::NotFound(_))));
        assert!(f.billing.calls().is_empty());
    }

    #[tokio::test]
    async fn fails_when_already_cancelled_without_remote_call() {
        let f = fixture();
        let mut membership = seed_google_membership(&f.repo).await;
        membership.cancel().unwrap();
        f.repo.update(&membership).await.unwrap();

        let result = f
            .handler
            .handle(CancelMembershipCommand {
                membership_id: membership.id,
            })
            .await;

        assert!(matches!(result, Err(MembershipError::InvalidState { .. })));
        assert!(f.billing.calls().is_empty());
    }

    #[tokio::test]
    async fn capability_mismatch_never_reaches_a_provider() {
        let f = fixture();
        let membership = Membership::create(MembershipId::new(), "membership_local", vec![]);
        f.repo.save(&membership).await.unwrap();

        let result = f
            .handler
            .handle(CancelMembershipCommand {
                membership_id: membership.id,
            })
            .await;

        assert!(matches!(
            result,
            Err(MembershipError::CancellationNotSupported(ref w)) if w == "membership_local"
        ));
        assert!(f.billing.calls().is_empty());
        assert!(f.bus.published_events().is_empty());
    }

    #[tokio::test]
    async fn remote_failure_leaves_state_unchanged() {
        let f = fixture();
        let membership = seed_google_membership(&f.repo).await;
        f.billing.set_method_error(
            "cancel_subscription",
            BillingError::rate_limited("quota exhausted"),
        );

        let result = f
            .handler
            .handle(CancelMembershipCommand {
                membership_id: membership.id,
            })
            .await;

        let err = result.unwrap_err();
        assert!(err.is_retryable(), "retryable classification must survive");

        let stored = f.repo.find_by_id(&membership.id).await.unwrap().unwrap();
        assert_eq!(stored.state, MembershipState::Active);
        assert!(stored.cancelled_at.is_none());
        assert!(f.bus.published_events().is_empty());
    }

    #[tokio::test]
    async fn data_integrity_failure_makes_no_remote_call() {
        let f = fixture();
        let mut membership = Membership::create(
            MembershipId::new(),
            GooglePlayProvider::WORKFLOW_ID,
            vec![json!({"productId": "sub_premium"})],
        );
        // No purchase token stored.
        f.repo.save(&membership).await.unwrap();

        let result = f
            .handler
            .handle(CancelMembershipCommand {
                membership_id: membership.id,
            })
            .await;

        match result {
            Err(MembershipError::Provider(ProviderError::DataIntegrity { .. })) => {}
            other => panic!("expected data integrity error, got {:?}", other),
        }
        assert!(f.billing.calls().is_empty());

        // Retrying after the linkage is fixed succeeds.
        membership.set_remote_id(GooglePlayProvider::PURCHASE_TOKEN_KEY, "tok_123");
        f.repo.update(&membership).await.unwrap();
        f.handler
            .handle(CancelMembershipCommand {
                membership_id: membership.id,
            })
            .await
            .unwrap();
    }
}
