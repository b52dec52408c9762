//! Organization billing snapshot
//!
//! A read-only picture of an organization's billing, trial and subscription
//! state at one instant. The snapshot is the only input the banner rules see
//! besides the display context and experiment toggles.

use crate::status::{blank_as_none, AccountType, PaymentStatus, SubscriptionStatus, TrialStatus};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Billing state of one organization, as supplied by the billing provider
///
/// `as_of` is the instant the snapshot describes. Every time-relative value
/// (grace period days, trial countdown) is measured against it, never against
/// the wall clock, so one snapshot always yields one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationBillingSnapshot {
    /// Instant the snapshot was taken
    pub as_of: DateTime<Utc>,

    /// Payment status; `None` when the provider has not reported one
    #[serde(default, deserialize_with = "blank_as_none")]
    pub payment_status: Option<PaymentStatus>,

    /// Subscription status; `None` when the provider has not reported one
    #[serde(default, deserialize_with = "blank_as_none")]
    pub subscription_status: Option<SubscriptionStatus>,

    /// Trial phase
    #[serde(default, deserialize_with = "blank_as_none")]
    pub trial_status: Option<TrialStatus>,

    /// Account type
    #[serde(default, deserialize_with = "blank_as_none")]
    pub account_type: Option<AccountType>,

    /// Whole days left in the trial
    #[serde(default)]
    pub trial_days_left: u32,

    /// End of the trial, if one is scheduled
    #[serde(default)]
    pub trial_ends_at: Option<DateTime<Utc>>,

    /// End of the payment grace period, if one is running
    #[serde(default)]
    pub grace_period_ends_at: Option<DateTime<Utc>>,

    /// Trial ends within the next 24 hours
    #[serde(default)]
    pub is_trial_ending_within_24_hours: bool,

    /// The viewer may act on the organization's billing
    #[serde(default)]
    pub can_manage_organization_billing: bool,
}

impl OrganizationBillingSnapshot {
    /// Create an empty snapshot taken at `as_of`
    #[inline]
    #[must_use]
    pub fn new(as_of: DateTime<Utc>) -> Self {
        Self {
            as_of,
            payment_status: None,
            subscription_status: None,
            trial_status: None,
            account_type: None,
            trial_days_left: 0,
            trial_ends_at: None,
            grace_period_ends_at: None,
            is_trial_ending_within_24_hours: false,
            can_manage_organization_billing: false,
        }
    }

    /// With payment status
    #[inline]
    #[must_use]
    pub fn with_payment_status(mut self, status: PaymentStatus) -> Self {
        self.payment_status = Some(status);
        self
    }

    /// With subscription status
    #[inline]
    #[must_use]
    pub fn with_subscription_status(mut self, status: SubscriptionStatus) -> Self {
        self.subscription_status = Some(status);
        self
    }

    /// With trial status
    #[inline]
    #[must_use]
    pub fn with_trial_status(mut self, status: TrialStatus) -> Self {
        self.trial_status = Some(status);
        self
    }

    /// With account type
    #[inline]
    #[must_use]
    pub fn with_account_type(mut self, account_type: AccountType) -> Self {
        self.account_type = Some(account_type);
        self
    }

    /// With trial days left, leaving the trial end untouched
    #[inline]
    #[must_use]
    pub fn with_trial_days_left(mut self, days: u32) -> Self {
        self.trial_days_left = days;
        self
    }

    /// With the 24 hour flag set explicitly
    #[inline]
    #[must_use]
    pub fn with_trial_ending_within_24_hours(mut self, ending: bool) -> Self {
        self.is_trial_ending_within_24_hours = ending;
        self
    }

    /// With grace period end
    #[inline]
    #[must_use]
    pub fn with_grace_period_ends_at(mut self, ends_at: DateTime<Utc>) -> Self {
        self.grace_period_ends_at = Some(ends_at);
        self
    }

    /// With billing management permission
    #[inline]
    #[must_use]
    pub fn with_billing_access(mut self, can_manage: bool) -> Self {
        self.can_manage_organization_billing = can_manage;
        self
    }

    /// Set the trial end and derive the countdown fields from `as_of`
    ///
    /// `trial_days_left` becomes the whole days between `as_of` and `ends_at`
    /// (never negative) and the 24 hour flag is set when the end is no more
    /// than a day away.
    #[must_use]
    pub fn with_trial_end(mut self, ends_at: DateTime<Utc>) -> Self {
        let remaining = ends_at - self.as_of;
        self.trial_ends_at = Some(ends_at);
        self.trial_days_left = u32::try_from(remaining.num_days().max(0)).unwrap_or(u32::MAX);
        self.is_trial_ending_within_24_hours = remaining <= Duration::hours(24);
        self
    }

    /// Whole days left in the grace period, clamped at zero
    ///
    /// Returns 0 when no grace period end is known.
    #[must_use]
    pub fn grace_period_days_left(&self) -> i64 {
        self.grace_period_ends_at
            .map_or(0, |ends_at| (ends_at - self.as_of).num_days().max(0))
    }

    /// Both statuses required for a decision are present
    #[inline]
    #[must_use]
    pub fn is_determined(&self) -> bool {
        self.payment_status.is_some() && self.subscription_status.is_some()
    }
}
