//! Error types for entitlement lookups

use crate::types::OrganizationId;

/// Errors reported by an [`EntitlementProvider`](crate::EntitlementProvider)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The organization was never provisioned as a billing customer
    #[error("customer not found: {0}")]
    CustomerNotFound(OrganizationId),

    /// The provider returned a plan id this build does not know
    #[error("unknown plan id: {0}")]
    UnknownPlan(String),

    /// The provider could not be reached
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// Any other provider-side failure
    #[error("provider error: {0}")]
    Provider(String),
}

impl ProviderError {
    /// Check whether the subject is simply unknown to the provider
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CustomerNotFound(_))
    }

    /// Check if the caller may reasonably retry
    ///
    /// The client never retries on its own.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_classification() {
        let err = ProviderError::CustomerNotFound(OrganizationId::nil());
        assert!(err.is_not_found());
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("customer not found"));
    }

    #[test]
    fn retryable_classification() {
        assert!(ProviderError::Unavailable("timeout".to_string()).is_retryable());
        assert!(!ProviderError::Provider("bad request".to_string()).is_retryable());
        assert!(!ProviderError::UnknownPlan("plan-x".to_string()).is_not_found());
    }
}
