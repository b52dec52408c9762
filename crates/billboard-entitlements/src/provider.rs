//! Billing provider seam
//!
//! [`EntitlementProvider`] is the thin transport-facing interface the
//! [`EntitlementClient`](crate::EntitlementClient) is written against. An
//! implementation reports an unprovisioned organization with
//! [`ProviderError::CustomerNotFound`] and every other failure with the
//! remaining variants; it never encodes "not found" in an error message.

use crate::error::ProviderError;
use crate::types::{
    AccessCheck, Entitlement, EntitlementPlan, FeatureGrant, FeatureKind, OrganizationId,
};
use async_trait::async_trait;
use dashmap::DashMap;

/// Denial reason the in-memory provider reports for ungranted features
pub const NO_FEATURE_ENTITLEMENT: &str = "no_feature_entitlement_in_subscription";

/// Billing provider trait for dependency injection
#[async_trait]
pub trait EntitlementProvider: Send + Sync {
    /// Plan ids of the organization's active subscriptions
    async fn active_plan_ids(&self, org_id: &OrganizationId) -> Result<Vec<String>, ProviderError>;

    /// Create the billing customer with an initial subscription
    async fn provision_customer(
        &self,
        org_id: &OrganizationId,
        plan: EntitlementPlan,
    ) -> Result<(), ProviderError>;

    /// Check one boolean entitlement
    async fn check_access(
        &self,
        org_id: &OrganizationId,
        entitlement: &Entitlement,
    ) -> Result<AccessCheck, ProviderError>;

    /// Every feature currently granted to the organization
    async fn granted_features(
        &self,
        org_id: &OrganizationId,
    ) -> Result<Vec<FeatureGrant>, ProviderError>;
}

#[derive(Debug, Clone, Default)]
struct CustomerRecord {
    plan_ids: Vec<String>,
    features: Vec<FeatureGrant>,
}

/// In-memory provider for development and testing
#[derive(Debug, Default)]
pub struct InMemoryEntitlementProvider {
    customers: DashMap<OrganizationId, CustomerRecord>,
}

impl InMemoryEntitlementProvider {
    /// Create provider with no customers
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant a feature to an already provisioned customer
    ///
    /// # Errors
    /// Returns [`ProviderError::CustomerNotFound`] for unknown organizations.
    pub fn grant(&self, org_id: &OrganizationId, grant: FeatureGrant) -> Result<(), ProviderError> {
        let mut record = self
            .customers
            .get_mut(org_id)
            .ok_or(ProviderError::CustomerNotFound(*org_id))?;
        record.features.retain(|g| g.feature_id != grant.feature_id);
        record.features.push(grant);
        Ok(())
    }

    /// Attach a raw plan id, known or not, to an already provisioned customer
    ///
    /// # Errors
    /// Returns [`ProviderError::CustomerNotFound`] for unknown organizations.
    pub fn attach_plan_id(
        &self,
        org_id: &OrganizationId,
        plan_id: impl Into<String>,
    ) -> Result<(), ProviderError> {
        let mut record = self
            .customers
            .get_mut(org_id)
            .ok_or(ProviderError::CustomerNotFound(*org_id))?;
        record.plan_ids.push(plan_id.into());
        Ok(())
    }

    /// Number of provisioned customers
    #[inline]
    #[must_use]
    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }
}

#[async_trait]
impl EntitlementProvider for InMemoryEntitlementProvider {
    async fn active_plan_ids(&self, org_id: &OrganizationId) -> Result<Vec<String>, ProviderError> {
        self.customers
            .get(org_id)
            .map(|record| record.plan_ids.clone())
            .ok_or(ProviderError::CustomerNotFound(*org_id))
    }

    async fn provision_customer(
        &self,
        org_id: &OrganizationId,
        plan: EntitlementPlan,
    ) -> Result<(), ProviderError> {
        let mut record = self.customers.entry(*org_id).or_default();
        record.plan_ids = vec![plan.id().to_string()];

        tracing::info!(
            org_id = %org_id,
            plan = %plan,
            "In-memory customer provisioned"
        );

        Ok(())
    }

    async fn check_access(
        &self,
        org_id: &OrganizationId,
        entitlement: &Entitlement,
    ) -> Result<AccessCheck, ProviderError> {
        let record = self
            .customers
            .get(org_id)
            .ok_or(ProviderError::CustomerNotFound(*org_id))?;

        let granted = record
            .features
            .iter()
            .any(|g| g.feature_id == entitlement.feature_id && g.kind != FeatureKind::Unset);

        Ok(AccessCheck {
            has_access: granted,
            denied_reason: (!granted).then(|| NO_FEATURE_ENTITLEMENT.to_string()),
        })
    }

    async fn granted_features(
        &self,
        org_id: &OrganizationId,
    ) -> Result<Vec<FeatureGrant>, ProviderError> {
        self.customers
            .get(org_id)
            .map(|record| record.features.clone())
            .ok_or(ProviderError::CustomerNotFound(*org_id))
    }
}
