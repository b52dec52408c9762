//! Entitlement domain types

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Organization identity, used as the billing customer id
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrganizationId(pub Uuid);

impl OrganizationId {
    /// Generate a random organization id
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The all-zero id
    #[inline]
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Customer id as the billing provider knows it
    #[inline]
    #[must_use]
    pub fn customer_id(&self) -> String {
        self.0.to_string()
    }
}

impl Default for OrganizationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Subscription plans an organization can be provisioned on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntitlementPlan {
    /// Self-managed core plan
    Core,
    /// Standard cloud plan
    Standard,
    /// Standard plan trial
    StandardTrial,
    /// Trial across all products
    UnifiedTrial,
    /// Capacity-based plan
    Flex,
    /// Pro plan
    Pro,
    /// Small and medium enterprise plan
    Sme,
    /// Partner plan
    Partner,
}

impl EntitlementPlan {
    /// Every plan
    pub const ALL: [EntitlementPlan; 8] = [
        Self::Core,
        Self::Standard,
        Self::StandardTrial,
        Self::UnifiedTrial,
        Self::Flex,
        Self::Pro,
        Self::Sme,
        Self::Partner,
    ];

    /// Plan id in the billing provider
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Self::Core => "plan-core",
            Self::Standard => "plan-standard",
            Self::StandardTrial => "plan-standard-trial",
            Self::UnifiedTrial => "plan-unified-trial",
            Self::Flex => "plan-flex",
            Self::Pro => "plan-pro",
            Self::Sme => "plan-sme",
            Self::Partner => "plan-partner",
        }
    }
}

impl std::fmt::Display for EntitlementPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for EntitlementPlan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|plan| plan.id() == s)
            .ok_or_else(|| format!("Unknown plan id: {s}"))
    }
}

/// A feature that can be granted to an organization
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entitlement {
    /// Feature id in the billing provider
    pub feature_id: String,
}

impl Entitlement {
    /// Create entitlement for a feature id
    #[inline]
    #[must_use]
    pub fn new(feature_id: impl Into<String>) -> Self {
        Self {
            feature_id: feature_id.into(),
        }
    }
}

/// Result of an entitlement lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementResult {
    /// Feature id
    pub feature_id: String,

    /// Whether the organization may use the feature
    pub is_entitled: bool,

    /// Why access was denied, when the provider said so
    pub reason: Option<String>,
}

impl EntitlementResult {
    /// Granted result
    #[inline]
    #[must_use]
    pub fn granted(feature_id: impl Into<String>) -> Self {
        Self {
            feature_id: feature_id.into(),
            is_entitled: true,
            reason: None,
        }
    }

    /// Denied result with a reason
    #[inline]
    #[must_use]
    pub fn denied(feature_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            feature_id: feature_id.into(),
            is_entitled: false,
            reason: Some(reason.into()),
        }
    }
}

/// Provider answer to a single boolean entitlement check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessCheck {
    /// Whether access is granted
    pub has_access: bool,

    /// Provider's denial reason
    pub denied_reason: Option<String>,
}

/// Shape of a granted feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// On/off feature
    Boolean,
    /// Numeric limit
    Numeric,
    /// Usage-metered feature
    Metered,
    /// One of a fixed set of values
    Enum,
    /// Provider sent no entitlement data
    Unset,
}

/// A feature the provider reports as granted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureGrant {
    /// Feature id
    pub feature_id: String,
    /// Kind of grant
    pub kind: FeatureKind,
}

impl FeatureGrant {
    /// Create grant
    #[inline]
    #[must_use]
    pub fn new(feature_id: impl Into<String>, kind: FeatureKind) -> Self {
        Self {
            feature_id: feature_id.into(),
            kind,
        }
    }

    /// Boolean grant
    #[inline]
    #[must_use]
    pub fn boolean(feature_id: impl Into<String>) -> Self {
        Self::new(feature_id, FeatureKind::Boolean)
    }
}
