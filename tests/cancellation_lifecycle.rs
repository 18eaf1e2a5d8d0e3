//! Integration tests for the membership cancellation lifecycle.
//!
//! These tests wire the full engine surface together:
//! 1. Provider registry with the Google Play provider
//! 2. Create handler persisting a membership and firing the post-create hook
//! 3. Cancel handler performing the capability check and remote call
//! 4. Event publication after each durable transition
//!
//! Uses in-memory implementations to exercise the flow without external
//! dependencies.

use std::sync::Arc;

use serde_json::json;

use membership_bridge::adapters::{
    GooglePlayProvider, InMemoryEventBus, InMemoryMembershipRepository, MockBillingClient,
};
use membership_bridge::application::{
    CancelMembershipCommand, CancelMembershipHandler, CreateMembershipCommand,
    CreateMembershipHandler, MembershipError, ProviderRegistry,
};
use membership_bridge::domain::membership::MembershipState;
use membership_bridge::ports::{BillingError, MembershipRepository, PluginValues};

const PACKAGE: &str = "com.example.app";

fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

struct Harness {
    create: CreateMembershipHandler,
    cancel: CancelMembershipHandler,
    repo: Arc<InMemoryMembershipRepository>,
    bus: Arc<InMemoryEventBus>,
    billing: Arc<MockBillingClient>,
}

fn harness() -> Harness {
    init_tracing();

    let billing = Arc::new(MockBillingClient::new());
    let provider = Arc::new(GooglePlayProvider::new(billing.clone(), PACKAGE));

    let mut registry = ProviderRegistry::new();
    registry.register(provider).unwrap();
    let registry = Arc::new(registry);

    let repo = Arc::new(InMemoryMembershipRepository::new());
    let bus = Arc::new(InMemoryEventBus::new());

    Harness {
        create: CreateMembershipHandler::new(registry.clone(), repo.clone(), bus.clone()),
        cancel: CancelMembershipHandler::new(registry, repo.clone(), bus.clone()),
        repo,
        bus,
        billing,
    }
}

async fn create_linked_membership(h: &Harness) -> membership_bridge::domain::membership::Membership {
    let result = h
        .create
        .handle(CreateMembershipCommand {
            workflow: GooglePlayProvider::WORKFLOW_ID.to_string(),
            payload: vec![json!({"productId": "sub_premium"})],
            plugin_values: PluginValues::new(),
        })
        .await
        .unwrap();

    // The hosting system records the purchase token it received from the
    // store before cancellation can be requested.
    let mut membership = result.membership;
    membership.set_remote_id(GooglePlayProvider::PURCHASE_TOKEN_KEY, "tok_123");
    h.repo.update(&membership).await.unwrap();
    membership
}

#[tokio::test]
async fn full_lifecycle_create_then_cancel() {
    let h = harness();
    let membership = create_linked_membership(&h).await;

    let result = h
        .cancel
        .handle(CancelMembershipCommand {
            membership_id: membership.id,
        })
        .await
        .unwrap();

    assert_eq!(result.membership.state, MembershipState::Cancelled);

    // Exactly one remote call, carrying the membership's stored values.
    let calls = h.billing.cancel_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].package_name, "com.example.app");
    assert_eq!(calls[0].product_id, "sub_premium");
    assert_eq!(calls[0].purchase_token, "tok_123");

    // Both lifecycle events were published, in order.
    let events = h.bus.published_events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event_type, "membership.created");
    assert_eq!(events[1].event_type, "membership.cancelled");

    // The stored record reflects the transition.
    let stored = h.repo.find_by_id(&membership.id).await.unwrap().unwrap();
    assert_eq!(stored.state, MembershipState::Cancelled);
}

#[tokio::test]
async fn membership_without_remote_identifiers_fails_before_any_remote_call() {
    let h = harness();

    let result = h
        .create
        .handle(CreateMembershipCommand {
            workflow: GooglePlayProvider::WORKFLOW_ID.to_string(),
            payload: vec![json!({"productId": "sub_premium"})],
            plugin_values: PluginValues::new(),
        })
        .await
        .unwrap();
    assert!(result.membership.remote_ids.is_empty());

    let err = h
        .cancel
        .handle(CancelMembershipCommand {
            membership_id: result.membership.id,
        })
        .await
        .unwrap_err();

    assert!(!err.is_retryable());
    assert!(h.billing.calls().is_empty());

    let stored = h
        .repo
        .find_by_id(&result.membership.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.state, MembershipState::Active);
}

#[tokio::test]
async fn retryable_remote_failure_is_safe_to_retry() {
    let h = harness();
    let membership = create_linked_membership(&h).await;

    // First attempt hits a transient platform failure.
    h.billing.set_method_error(
        "cancel_subscription",
        BillingError::unavailable("backend error").with_http_status(503),
    );

    let err = h
        .cancel
        .handle(CancelMembershipCommand {
            membership_id: membership.id,
        })
        .await
        .unwrap_err();
    assert!(err.is_retryable());

    // Local state is untouched, so the retry starts from the same place.
    let stored = h.repo.find_by_id(&membership.id).await.unwrap().unwrap();
    assert_eq!(stored.state, MembershipState::Active);
    assert_eq!(h.bus.events_of_type("membership.cancelled").len(), 0);

    // Second attempt succeeds.
    h.billing.clear_errors();
    h.cancel
        .handle(CancelMembershipCommand {
            membership_id: membership.id,
        })
        .await
        .unwrap();

    assert_eq!(h.billing.cancel_calls().len(), 2);
    assert_eq!(h.bus.events_of_type("membership.cancelled").len(), 1);
}

#[tokio::test]
async fn second_cancellation_request_is_rejected_locally() {
    let h = harness();
    let membership = create_linked_membership(&h).await;

    h.cancel
        .handle(CancelMembershipCommand {
            membership_id: membership.id,
        })
        .await
        .unwrap();

    let err = h
        .cancel
        .handle(CancelMembershipCommand {
            membership_id: membership.id,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, MembershipError::InvalidState { .. }));
    // The remote platform saw only the first request.
    assert_eq!(h.billing.cancel_calls().len(), 1);
}

#[tokio::test]
async fn creation_under_unknown_workflow_is_rejected() {
    let h = harness();

    let err = h
        .create
        .handle(CreateMembershipCommand {
            workflow: "membership_apple".to_string(),
            payload: vec![],
            plugin_values: PluginValues::new(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, MembershipError::ProviderNotFound(_)));
    assert_eq!(h.repo.membership_count(), 0);
    assert!(h.bus.published_events().is_empty());
}
