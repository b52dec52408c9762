//! Billing status vocabularies
//!
//! The enums in this module mirror the status values reported by the billing
//! data provider. Their member sets are part of the public contract: every
//! enum carries an `Unrecognized` catch-all so that a value introduced by the
//! provider later deserializes cleanly and simply matches no banner rule.

use serde::de::value::StrDeserializer;
use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer, Serialize};

/// Payment state of an organization, computed by the billing provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Payment method on file and in good standing
    Okay,

    /// Invoiced outside the self-serve flow
    Manual,

    /// Locked by support; requires contacting them
    Locked,

    /// Disabled after the grace period ran out
    Disabled,

    /// Payment failed; service continues until the grace period ends
    GracePeriod,

    /// No payment method was ever set up
    Uninitialized,

    /// A value this build does not know about
    #[serde(other)]
    Unrecognized,
}

impl PaymentStatus {
    /// Wire name of the status
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Okay => "okay",
            Self::Manual => "manual",
            Self::Locked => "locked",
            Self::Disabled => "disabled",
            Self::GracePeriod => "grace_period",
            Self::Uninitialized => "uninitialized",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Whether the status blocks or threatens service
    #[inline]
    #[must_use]
    pub fn is_service_impacting(&self) -> bool {
        matches!(self, Self::Locked | Self::Disabled | Self::GracePeriod)
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subscription state; only equality with [`SubscriptionStatus::Subscribed`] matters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Has an active paid subscription
    Subscribed,

    /// No active subscription
    Unsubscribed,

    /// A value this build does not know about
    #[serde(other)]
    Unrecognized,
}

impl SubscriptionStatus {
    /// Wire name of the status
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Subscribed => "subscribed",
            Self::Unsubscribed => "unsubscribed",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Check for an active subscription
    #[inline]
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        matches!(self, Self::Subscribed)
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trial lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialStatus {
    /// Trial not started yet
    PreTrial,

    /// Trial running
    InTrial,

    /// Trial finished
    PostTrial,

    /// A value this build does not know about
    #[serde(other)]
    Unrecognized,
}

impl TrialStatus {
    /// Wire name of the status
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreTrial => "pre_trial",
            Self::InTrial => "in_trial",
            Self::PostTrial => "post_trial",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for TrialStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of account the organization belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Free account
    Free,

    /// Internal (staff) account
    Internal,

    /// Paying customer
    Paid,

    /// A value this build does not know about
    #[serde(other)]
    Unrecognized,
}

impl AccountType {
    /// Wire name of the account type
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Internal => "internal",
            Self::Paid => "paid",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deserialize an optional status, treating `null`, a missing value and a
/// blank string alike as absent.
pub(crate) fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => {
            let de: StrDeserializer<'_, D::Error> = value.into_deserializer();
            T::deserialize(de).map(Some)
        }
    }
}
