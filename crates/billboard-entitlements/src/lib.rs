//! Billboard Entitlements
//!
//! Plan and feature-entitlement lookups over an abstract billing provider.
//!
//! # Core Concepts
//!
//! - [`EntitlementProvider`]: Transport-facing seam implemented per billing backend
//! - [`EntitlementClient`]: Maps "customer not found" to "no plans / no access"
//! - [`InMemoryEntitlementProvider`]: Provider for development and tests
//!
//! # Example
//!
//! ```rust,ignore
//! use billboard_entitlements::{Entitlement, EntitlementClient, InMemoryEntitlementProvider};
//! use std::sync::Arc;
//!
//! let client = EntitlementClient::new(Arc::new(InMemoryEntitlementProvider::new()));
//! let result = client.check_entitlement(&org_id, &Entitlement::new("feature-sso")).await?;
//! assert!(!result.is_entitled);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod client;
mod error;
mod provider;
mod types;

// Re-exports
pub use client::{EntitlementClient, CUSTOMER_NOT_FOUND};
pub use error::ProviderError;
pub use provider::{EntitlementProvider, InMemoryEntitlementProvider, NO_FEATURE_ENTITLEMENT};
pub use types::{
    AccessCheck, Entitlement, EntitlementPlan, EntitlementResult, FeatureGrant, FeatureKind,
    OrganizationId,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
