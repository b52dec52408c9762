//! Testing utilities for the Billboard workspace
//!
//! Shared snapshot fixtures and proptest strategies.

#![allow(missing_docs)]

use billboard_core::{
    AccountType, BannerToggles, DisplayContext, OrganizationBillingSnapshot, PaymentStatus,
    SubscriptionStatus, TrialStatus,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

/// Fixed instant every fixture snapshot is taken at
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 14, 10, 0, 0).unwrap()
}

/// Determined snapshot: okay payment, subscribed, nothing else set
pub fn snapshot() -> OrganizationBillingSnapshot {
    OrganizationBillingSnapshot::new(fixed_now())
        .with_payment_status(PaymentStatus::Okay)
        .with_subscription_status(SubscriptionStatus::Subscribed)
}

pub fn snapshot_with_payment(payment: PaymentStatus) -> OrganizationBillingSnapshot {
    snapshot().with_payment_status(payment)
}

/// Paying customer past their trial
pub fn paid_customer() -> OrganizationBillingSnapshot {
    snapshot()
        .with_account_type(AccountType::Paid)
        .with_trial_status(TrialStatus::PostTrial)
}

/// Free organization in trial without a payment method
pub fn trialing(days_left: i64) -> OrganizationBillingSnapshot {
    snapshot()
        .with_payment_status(PaymentStatus::Uninitialized)
        .with_subscription_status(SubscriptionStatus::Unsubscribed)
        .with_account_type(AccountType::Free)
        .with_trial_status(TrialStatus::InTrial)
        .with_trial_end(fixed_now() + Duration::days(days_left) + Duration::hours(1))
}

/// Same snapshot, seen by a viewer who can manage billing
pub fn as_billing_manager(snapshot: OrganizationBillingSnapshot) -> OrganizationBillingSnapshot {
    snapshot.with_billing_access(true)
}

pub fn any_payment_status() -> impl Strategy<Value = PaymentStatus> {
    prop_oneof![
        Just(PaymentStatus::Okay),
        Just(PaymentStatus::Manual),
        Just(PaymentStatus::Locked),
        Just(PaymentStatus::Disabled),
        Just(PaymentStatus::GracePeriod),
        Just(PaymentStatus::Uninitialized),
        Just(PaymentStatus::Unrecognized),
    ]
}

pub fn any_subscription_status() -> impl Strategy<Value = SubscriptionStatus> {
    prop_oneof![
        Just(SubscriptionStatus::Subscribed),
        Just(SubscriptionStatus::Unsubscribed),
        Just(SubscriptionStatus::Unrecognized),
    ]
}

pub fn any_trial_status() -> impl Strategy<Value = Option<TrialStatus>> {
    prop_oneof![
        Just(None),
        Just(Some(TrialStatus::PreTrial)),
        Just(Some(TrialStatus::InTrial)),
        Just(Some(TrialStatus::PostTrial)),
        Just(Some(TrialStatus::Unrecognized)),
    ]
}

pub fn any_account_type() -> impl Strategy<Value = Option<AccountType>> {
    prop_oneof![
        Just(None),
        Just(Some(AccountType::Free)),
        Just(Some(AccountType::Internal)),
        Just(Some(AccountType::Paid)),
        Just(Some(AccountType::Unrecognized)),
    ]
}

pub fn any_context() -> impl Strategy<Value = DisplayContext> {
    prop_oneof![Just(DisplayContext::TopLevel), Just(DisplayContext::BillingPage)]
}

pub fn any_toggles() -> impl Strategy<Value = BannerToggles> {
    any::<bool>().prop_map(|on| BannerToggles::new().with_upgrade_text(on))
}

/// Determined snapshots covering every status combination
pub fn any_snapshot() -> impl Strategy<Value = OrganizationBillingSnapshot> {
    (
        any_payment_status(),
        any_subscription_status(),
        any_trial_status(),
        any_account_type(),
        0u32..40,
        any::<bool>(),
        proptest::option::of(-5i64..30),
        proptest::option::of(0i64..30),
        any::<bool>(),
    )
        .prop_map(
            |(payment, subscription, trial, account, days, ending, grace, trial_end, manage)| {
                let mut snapshot = OrganizationBillingSnapshot::new(fixed_now())
                    .with_payment_status(payment)
                    .with_subscription_status(subscription)
                    .with_trial_days_left(days)
                    .with_trial_ending_within_24_hours(ending)
                    .with_billing_access(manage);
                snapshot.trial_status = trial;
                snapshot.account_type = account;
                snapshot.grace_period_ends_at = grace.map(|d| fixed_now() + Duration::days(d));
                snapshot.trial_ends_at = trial_end.map(|d| fixed_now() + Duration::days(d));
                snapshot
            },
        )
}
