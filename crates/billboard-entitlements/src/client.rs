//! Entitlement client
//!
//! Wraps an [`EntitlementProvider`] and gives "not provisioned" a single
//! meaning: an organization the provider has never seen has no plans, no
//! entitlements and no access. Every other provider failure is returned to
//! the caller unchanged, without retries.

use crate::error::ProviderError;
use crate::provider::EntitlementProvider;
use crate::types::{Entitlement, EntitlementPlan, EntitlementResult, FeatureKind, OrganizationId};
use std::sync::Arc;

/// Denial reason reported for organizations unknown to the provider
pub const CUSTOMER_NOT_FOUND: &str = "customer_not_found";

/// Client over a billing provider
#[derive(Debug)]
pub struct EntitlementClient<P: ?Sized> {
    provider: Arc<P>,
}

impl<P: ?Sized> Clone for EntitlementClient<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

impl<P: EntitlementProvider + ?Sized> EntitlementClient<P> {
    /// Create client over a shared provider
    #[inline]
    #[must_use]
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Plans of the organization's active subscriptions
    ///
    /// # Errors
    /// Provider failures other than an unknown customer, and
    /// [`ProviderError::UnknownPlan`] for plan ids this build does not know.
    pub async fn plans(
        &self,
        org_id: &OrganizationId,
    ) -> Result<Vec<EntitlementPlan>, ProviderError> {
        let plan_ids = match self.provider.active_plan_ids(org_id).await {
            Ok(ids) => ids,
            Err(err) if err.is_not_found() => {
                tracing::info!(
                    org_id = %org_id,
                    "No active subscriptions; organization not present in billing provider"
                );
                return Ok(Vec::new());
            }
            Err(err) => return Err(err),
        };

        plan_ids
            .into_iter()
            .map(|id| {
                id.parse::<EntitlementPlan>()
                    .map_err(|_| ProviderError::UnknownPlan(id))
            })
            .collect()
    }

    /// Whether the organization is subscribed to `plan`
    ///
    /// # Errors
    /// Same as [`EntitlementClient::plans`].
    pub async fn has_plan(
        &self,
        org_id: &OrganizationId,
        plan: EntitlementPlan,
    ) -> Result<bool, ProviderError> {
        Ok(self.plans(org_id).await?.contains(&plan))
    }

    /// Provision the organization as a billing customer on `plan`
    ///
    /// # Errors
    /// Any provider failure.
    pub async fn provision_customer(
        &self,
        org_id: &OrganizationId,
        plan: EntitlementPlan,
    ) -> Result<(), ProviderError> {
        self.provider.provision_customer(org_id, plan).await
    }

    /// Check a single boolean entitlement
    ///
    /// # Errors
    /// Provider failures other than an unknown customer.
    pub async fn check_entitlement(
        &self,
        org_id: &OrganizationId,
        entitlement: &Entitlement,
    ) -> Result<EntitlementResult, ProviderError> {
        tracing::debug!(
            org_id = %org_id,
            feature_id = %entitlement.feature_id,
            "Checking entitlement"
        );

        let check = match self.provider.check_access(org_id, entitlement).await {
            Ok(check) => check,
            Err(err) if err.is_not_found() => {
                tracing::debug!(org_id = %org_id, "Entitlement denied; customer not provisioned");
                return Ok(EntitlementResult::denied(
                    entitlement.feature_id.clone(),
                    CUSTOMER_NOT_FOUND,
                ));
            }
            Err(err) => return Err(err),
        };

        tracing::debug!(
            org_id = %org_id,
            feature_id = %entitlement.feature_id,
            is_granted = check.has_access,
            denied_reason = ?check.denied_reason,
            "Got entitlement"
        );

        Ok(EntitlementResult {
            feature_id: entitlement.feature_id.clone(),
            is_entitled: check.has_access,
            reason: check.denied_reason,
        })
    }

    /// Every entitlement the organization currently holds
    ///
    /// Only granted features are returned, so every result is entitled.
    /// Grants without entitlement data are skipped.
    ///
    /// # Errors
    /// Provider failures other than an unknown customer.
    pub async fn entitlements(
        &self,
        org_id: &OrganizationId,
    ) -> Result<Vec<EntitlementResult>, ProviderError> {
        tracing::debug!(org_id = %org_id, "Getting entitlements");

        let grants = match self.provider.granted_features(org_id).await {
            Ok(grants) => grants,
            Err(err) if err.is_not_found() => {
                tracing::debug!(org_id = %org_id, "No entitlements; customer not provisioned");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err),
        };

        tracing::debug!(org_id = %org_id, count = grants.len(), "Got entitlements");

        Ok(grants
            .into_iter()
            .filter(|grant| grant.kind != FeatureKind::Unset)
            .map(|grant| EntitlementResult::granted(grant.feature_id))
            .collect())
    }
}
