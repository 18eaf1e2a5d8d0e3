//! Google Play membership provider.
//!
//! Implements the provider contract for Google Play subscriptions. The
//! provider is immutable after construction: it holds a billing client
//! handle and the package identifier it manages subscriptions for, and no
//! membership data. One instance is shared read-only across all memberships
//! under its workflow.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::membership::Membership;
use crate::ports::{
    BillingClient, MembershipProvider, PluginValues, ProviderError, SupportsCancellation,
};

/// Membership provider for Google Play subscriptions.
pub struct GooglePlayProvider {
    billing: Arc<dyn BillingClient>,
    package_name: String,
}

impl GooglePlayProvider {
    /// Workflow driven by this provider.
    pub const WORKFLOW_ID: &'static str = "membership_google";

    /// Display name of this provider.
    pub const LABEL: &'static str = "Google Play";

    /// Remote identifier scope key for the Play purchase token.
    pub const PURCHASE_TOKEN_KEY: &'static str = "google_play_purchase_token";

    /// Payload field naming the subscription product.
    pub const PRODUCT_ID_FIELD: &'static str = "productId";

    /// Creates a provider bound to one billing client and package.
    pub fn new(billing: Arc<dyn BillingClient>, package_name: impl Into<String>) -> Self {
        Self {
            billing,
            package_name: package_name.into(),
        }
    }

    /// The package this provider manages subscriptions for.
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// Extracts the subscription product id from the membership payload.
    ///
    /// Exactly one payload record must carry the field; anything else means
    /// the membership was created without correct remote linkage.
    fn product_id<'m>(&self, membership: &'m Membership) -> Result<&'m str, ProviderError> {
        let mut candidates = membership.payload.iter().filter_map(|record| {
            record
                .get(Self::PRODUCT_ID_FIELD)
                .and_then(|value| value.as_str())
        });

        let product_id = candidates.next().ok_or_else(|| {
            ProviderError::data_integrity(
                membership.id,
                format!("payload has no record with '{}'", Self::PRODUCT_ID_FIELD),
            )
        })?;

        if candidates.next().is_some() {
            return Err(ProviderError::data_integrity(
                membership.id,
                format!(
                    "payload has more than one record with '{}'",
                    Self::PRODUCT_ID_FIELD
                ),
            ));
        }

        Ok(product_id)
    }

    /// Looks up the purchase token linking the membership to its remote
    /// subscription.
    fn purchase_token<'m>(&self, membership: &'m Membership) -> Result<&'m str, ProviderError> {
        membership
            .remote_id(Self::PURCHASE_TOKEN_KEY)
            .ok_or_else(|| {
                ProviderError::data_integrity(
                    membership.id,
                    format!("no '{}' remote identifier", Self::PURCHASE_TOKEN_KEY),
                )
            })
    }
}

#[async_trait]
impl MembershipProvider for GooglePlayProvider {
    fn workflow_id(&self) -> &'static str {
        Self::WORKFLOW_ID
    }

    fn label(&self) -> &'static str {
        Self::LABEL
    }

    async fn post_create_membership(
        &self,
        _membership: &Membership,
        _plugin_values: &PluginValues,
    ) -> Result<(), ProviderError> {
        // The Play purchase is acknowledged before the membership record
        // exists, so creation needs no remote side effect.
        Ok(())
    }

    fn cancellation(&self) -> Option<&dyn SupportsCancellation> {
        Some(self)
    }
}

#[async_trait]
impl SupportsCancellation for GooglePlayProvider {
    async fn cancel(&self, membership: &Membership) -> Result<(), ProviderError> {
        let product_id = self.product_id(membership)?;
        let purchase_token = self.purchase_token(membership)?;

        self.billing
            .cancel_subscription(&self.package_name, product_id, purchase_token)
            .await?;

        Ok(())
    }
}
