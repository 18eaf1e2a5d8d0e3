//! CreateMembershipHandler - Command handler for creating memberships.

use std::sync::Arc;

use crate::domain::foundation::{MembershipId, Timestamp};
use crate::domain::membership::{Membership, MembershipEvent};
use crate::ports::{EventPublisher, MembershipRepository, PluginValues};
use serde_json::Value as JsonValue;

use crate::application::{MembershipError, ProviderRegistry};

/// Command to create a membership under a provider's workflow.
#[derive(Debug, Clone, Default)]
pub struct CreateMembershipCommand {
    /// Workflow id of the provider responsible for the new membership.
    pub workflow: String,

    /// Provider-specific payload records.
    pub payload: Vec<JsonValue>,

    /// Values forwarded to the provider's post-create hook.
    pub plugin_values: PluginValues,
}

/// Result of successful membership creation.
#[derive(Debug, Clone)]
pub struct CreateMembershipResult {
    pub membership: Membership,
    pub event: MembershipEvent,
}

/// Handler for creating memberships.
///
/// The provider's post-create hook fires only after the membership is
/// durably stored, so the hook always observes an existing record. Callers
/// retrying after an ambiguous hook failure rely on the hook being
/// idempotent-safe, which the provider contract requires.
pub struct CreateMembershipHandler {
    registry: Arc<ProviderRegistry>,
    repository: Arc<dyn MembershipRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CreateMembershipHandler {
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
        cmd: CreateMembershipCommand,
    ) -> Result<CreateMembershipResult, MembershipError> {
        // 1. A provider must claim the workflow before anything is stored
        let provider = self
            .registry
            .get(&cmd.workflow)
            .ok_or_else(|| MembershipError::provider_not_found(cmd.workflow.clone()))?;

        // 2. Persist the membership
        let membership = Membership::create(MembershipId::new(), cmd.workflow, cmd.payload);
        self.repository.save(&membership).await?;

        // 3. Fire the provider hook, now that creation is durable
        provider
            .post_create_membership(&membership, &cmd.plugin_values)
            .await?;

        // 4. Publish the lifecycle event
        let event = MembershipEvent::Created {
            membership_id: membership.id,
            workflow: membership.workflow.clone(),
            occurred_at: Timestamp::now(),
        };
        self.event_publisher.publish(event.to_envelope()).await?;

        tracing::info!(
            membership_id = %membership.id,
            workflow = %membership.workflow,
            "membership created"
        );

        Ok(CreateMembershipResult { membership, event })
    }
}
