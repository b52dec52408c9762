use billboard_core::{
    param, resolve, AccountType, BannerLevel, BannerToggles, DisplayContext, LinkTarget,
    MessageKey, OrganizationBillingSnapshot, ParamValue, PaymentStatus, Resolution,
    StatusBannerResolver, SubscriptionStatus, TrialStatus,
};
use billboard_test_utils::{
    any_context, any_snapshot, any_toggles, as_billing_manager, fixed_now, paid_customer,
    snapshot, snapshot_with_payment, trialing,
};
use chrono::Duration;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const TOP: DisplayContext = DisplayContext::TopLevel;
const BILLING: DisplayContext = DisplayContext::BillingPage;

fn off() -> BannerToggles {
    BannerToggles::new()
}

fn on() -> BannerToggles {
    BannerToggles::new().with_upgrade_text(true)
}

#[test]
fn missing_payment_status_yields_nothing() {
    let mut snap = snapshot_with_payment(PaymentStatus::Locked);
    snap.payment_status = None;
    assert_eq!(resolve(&snap, TOP, off()), None);
    assert_eq!(resolve(&snap, BILLING, on()), None);
}

#[test]
fn missing_subscription_status_yields_nothing() {
    let mut snap = snapshot_with_payment(PaymentStatus::Locked);
    snap.subscription_status = None;
    assert_eq!(resolve(&snap, TOP, off()), None);
}

#[test]
fn locked_outranks_pre_trial() {
    let snap =
        snapshot_with_payment(PaymentStatus::Locked).with_trial_status(TrialStatus::PreTrial);
    let banner = resolve(&snap, TOP, off()).unwrap();
    assert_eq!(banner.message_key, MessageKey::LockedPaymentStatus);
    assert_eq!(banner.level, BannerLevel::Warning);
}

#[test]
fn locked_always_links_to_support() {
    for context in [TOP, BILLING] {
        for manage in [true, false] {
            let snap = snapshot_with_payment(PaymentStatus::Locked).with_billing_access(manage);
            let banner = resolve(&snap, context, off()).unwrap();
            assert_eq!(banner.link(), Some(LinkTarget::SupportPortal));
            assert_eq!(banner.message_params.len(), 1);
        }
    }
}

#[test]
fn manual_free_suppressed_at_top_level() {
    let snap = snapshot_with_payment(PaymentStatus::Manual).with_account_type(AccountType::Free);
    assert_eq!(resolve(&snap, TOP, off()), None);
}

#[test]
fn manual_free_on_billing_page() {
    let snap = snapshot_with_payment(PaymentStatus::Manual).with_account_type(AccountType::Free);
    let banner = resolve(&snap, BILLING, off()).unwrap();
    assert_eq!(banner.level, BannerLevel::Info);
    assert_eq!(banner.message_key, MessageKey::ManualPaymentStatusFree);
    assert!(banner.message_params.is_empty());
}

#[test]
fn manual_internal_on_billing_page() {
    let snap =
        snapshot_with_payment(PaymentStatus::Manual).with_account_type(AccountType::Internal);
    let banner = resolve(&snap, BILLING, off()).unwrap();
    assert_eq!(banner.message_key, MessageKey::ManualPaymentStatusInternal);
}

#[test]
fn manual_paid_customer_gets_no_banner() {
    let snap = paid_customer().with_payment_status(PaymentStatus::Manual);
    assert_eq!(resolve(&snap, BILLING, off()), None);
    assert_eq!(resolve(&snap, TOP, off()), None);
}

#[test]
fn manual_paid_continues_to_trial_rules() {
    let snap = snapshot_with_payment(PaymentStatus::Manual)
        .with_account_type(AccountType::Paid)
        .with_trial_status(TrialStatus::PreTrial);
    let banner = resolve(&snap, BILLING, off()).unwrap();
    assert_eq!(banner.message_key, MessageKey::PreTrial);
}

#[test]
fn disabled_with_and_without_link() {
    let snap = snapshot_with_payment(PaymentStatus::Disabled);

    let linked = resolve(&as_billing_manager(snap.clone()), TOP, off()).unwrap();
    assert_eq!(linked.message_key, MessageKey::DisabledPaymentStatusWithLink);
    assert_eq!(linked.link(), Some(LinkTarget::BillingPage));

    let plain = resolve(&snap, TOP, off()).unwrap();
    assert_eq!(plain.message_key, MessageKey::DisabledPaymentStatus);
    assert_eq!(plain.link(), None);
    assert!(plain.message_params.is_empty());
}

#[test]
fn grace_period_counts_days() {
    let snap = snapshot_with_payment(PaymentStatus::GracePeriod)
        .with_grace_period_ends_at(fixed_now() + Duration::days(3));
    let banner = resolve(&snap, BILLING, off()).unwrap();
    assert_eq!(banner.level, BannerLevel::Warning);
    assert_eq!(banner.message_key, MessageKey::GracePeriodPaymentStatus);
    assert_eq!(banner.days(), Some(3));
}

#[test]
fn grace_period_without_end_is_zero_days() {
    let snap = as_billing_manager(snapshot_with_payment(PaymentStatus::GracePeriod));
    let banner = resolve(&snap, TOP, off()).unwrap();
    assert_eq!(banner.message_key, MessageKey::GracePeriodPaymentStatusWithLink);
    assert_eq!(banner.days(), Some(0));
    assert_eq!(banner.link(), Some(LinkTarget::BillingPage));
}

#[test]
fn grace_period_outranks_trial_prompt() {
    let snap = trialing(2).with_payment_status(PaymentStatus::GracePeriod);
    let banner = resolve(&snap, TOP, on()).unwrap();
    assert_eq!(banner.message_key, MessageKey::GracePeriodPaymentStatus);
}

#[test]
fn pre_trial_banner() {
    let snap = snapshot().with_trial_status(TrialStatus::PreTrial);
    let banner = resolve(&snap, TOP, on()).unwrap();
    assert_eq!(banner.level, BannerLevel::Info);
    assert_eq!(banner.message_key, MessageKey::PreTrial);
    assert!(banner.message_params.is_empty());
}

#[test]
fn trial_prompt_is_error_within_24_hours() {
    let snap = snapshot()
        .with_trial_status(TrialStatus::InTrial)
        .with_trial_ending_within_24_hours(true);
    let banner = resolve(&snap, BILLING, on()).unwrap();
    assert_eq!(banner.level, BannerLevel::Error);
    assert_eq!(
        banner.param(param::TRIAL_ENDING_WITHIN_24_HOURS),
        Some(&ParamValue::Flag(true))
    );
}

#[test]
fn trial_prompt_is_warning_otherwise() {
    let snap = snapshot()
        .with_trial_status(TrialStatus::InTrial)
        .with_trial_ending_within_24_hours(false)
        .with_trial_days_left(9);
    let banner = resolve(&snap, BILLING, on()).unwrap();
    assert_eq!(banner.level, BannerLevel::Warning);
    assert_eq!(banner.message_key, MessageKey::TrialEnding);
    assert_eq!(banner.days(), Some(9));
    assert_eq!(banner.param(param::EXACT_TIME), None);
    assert_eq!(banner.link(), None);
}

#[test]
fn trial_prompt_with_link_and_exact_time() {
    let snap = as_billing_manager(trialing(4));
    let banner = resolve(&snap, TOP, on()).unwrap();

    assert_eq!(banner.message_key, MessageKey::TrialEndingWithLink);
    assert_eq!(banner.days(), Some(4));
    assert_eq!(banner.link(), Some(LinkTarget::BillingPage));
    assert_eq!(
        banner.param(param::EXACT_TIME),
        Some(&ParamValue::Timestamp(
            fixed_now() + Duration::days(4) + Duration::hours(1)
        ))
    );
}

#[test]
fn in_trial_with_payment_method() {
    let snap = snapshot()
        .with_trial_status(TrialStatus::InTrial)
        .with_trial_days_left(12)
        .with_billing_access(true);
    let banner = resolve(&snap, TOP, off()).unwrap();
    assert_eq!(banner.level, BannerLevel::Info);
    assert_eq!(banner.message_key, MessageKey::InTrialWithPaymentMethod);
    assert_eq!(banner.days(), Some(12));
    assert_eq!(banner.message_params.len(), 1);
}

#[test]
fn in_trial_without_payment_method() {
    let linked = resolve(&as_billing_manager(trialing(6)), TOP, off()).unwrap();
    assert_eq!(linked.message_key, MessageKey::InTrialWithLink);
    assert_eq!(linked.days(), Some(6));
    assert_eq!(linked.link(), Some(LinkTarget::BillingPage));

    let plain = resolve(&trialing(6), TOP, off()).unwrap();
    assert_eq!(plain.message_key, MessageKey::InTrial);
    assert_eq!(plain.link(), None);
}

#[test]
fn in_trial_with_other_payment_status_has_no_banner() {
    let snap = snapshot_with_payment(PaymentStatus::Manual)
        .with_account_type(AccountType::Paid)
        .with_trial_status(TrialStatus::InTrial);
    assert_eq!(resolve(&snap, BILLING, off()), None);
}

#[test]
fn post_trial_subscribed_and_paid_has_no_banner() {
    assert_eq!(resolve(&paid_customer(), TOP, off()), None);
    assert_eq!(resolve(&paid_customer(), BILLING, on()), None);
}

#[test]
fn post_trial_unsubscribed() {
    let snap = paid_customer().with_subscription_status(SubscriptionStatus::Unsubscribed);
    let plain = resolve(&snap, TOP, off()).unwrap();
    assert_eq!(plain.level, BannerLevel::Info);
    assert_eq!(plain.message_key, MessageKey::PostTrial);
    assert!(plain.message_params.is_empty());

    let linked = resolve(&as_billing_manager(snap), TOP, off()).unwrap();
    assert_eq!(linked.message_key, MessageKey::PostTrialWithLink);
    assert_eq!(linked.link(), Some(LinkTarget::BillingPage));
    assert_eq!(linked.message_params.len(), 1);
}

#[test]
fn post_trial_uninitialized_even_when_subscribed() {
    let snap = paid_customer().with_payment_status(PaymentStatus::Uninitialized);
    let banner = resolve(&snap, BILLING, off()).unwrap();
    assert_eq!(banner.message_key, MessageKey::PostTrial);
}

#[test]
fn unknown_payment_status_falls_through() {
    let json = r#"{
        "as_of": "2025-04-14T10:00:00Z",
        "payment_status": "suspended_by_partner",
        "subscription_status": "unsubscribed",
        "trial_status": "pre_trial"
    }"#;
    let snap: OrganizationBillingSnapshot = serde_json::from_str(json).unwrap();
    assert_eq!(snap.payment_status, Some(PaymentStatus::Unrecognized));

    let banner = resolve(&snap, TOP, off()).unwrap();
    assert_eq!(banner.message_key, MessageKey::PreTrial);
}

#[test]
fn unknown_trial_and_account_values_match_nothing() {
    let json = r#"{
        "as_of": "2025-04-14T10:00:00Z",
        "payment_status": "manual",
        "subscription_status": "on_hold",
        "trial_status": "extended",
        "account_type": "partner"
    }"#;
    let snap: OrganizationBillingSnapshot = serde_json::from_str(json).unwrap();
    assert_eq!(resolve(&snap, BILLING, on()), None);
}

#[test]
fn blank_status_is_treated_as_missing() {
    let json = r#"{
        "as_of": "2025-04-14T10:00:00Z",
        "payment_status": "",
        "subscription_status": "subscribed",
        "trial_status": "pre_trial"
    }"#;
    let snap: OrganizationBillingSnapshot = serde_json::from_str(json).unwrap();
    assert_eq!(resolve(&snap, TOP, off()), None);
}

#[test]
fn resolving_twice_is_identical() {
    let snap = as_billing_manager(trialing(1));
    let resolver = StatusBannerResolver::new();
    assert_eq!(
        resolver.resolve(&snap, TOP, on()),
        resolver.resolve(&snap, TOP, on())
    );
}

proptest! {
    #[test]
    fn prop_resolve_is_pure(
        snap in any_snapshot(),
        context in any_context(),
        toggles in any_toggles()
    ) {
        let first = resolve(&snap, context, toggles);
        let second = resolve(&snap.clone(), context, toggles);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_missing_status_never_shows(
        snap in any_snapshot(),
        context in any_context(),
        toggles in any_toggles(),
        drop_payment in any::<bool>()
    ) {
        let mut snap = snap;
        if drop_payment {
            snap.payment_status = None;
        } else {
            snap.subscription_status = None;
        }
        prop_assert!(resolve(&snap, context, toggles).is_none());
    }

    #[test]
    fn prop_billing_link_only_for_top_level_managers(
        snap in any_snapshot(),
        context in any_context(),
        toggles in any_toggles()
    ) {
        if let Some(banner) = resolve(&snap, context, toggles) {
            let may_link =
                context == DisplayContext::TopLevel && snap.can_manage_organization_billing;
            if banner.message_key.is_billing_link_variant() {
                prop_assert!(may_link);
                prop_assert_eq!(banner.link(), Some(LinkTarget::BillingPage));
            }
            if banner.message_key.is_plain_variant() {
                prop_assert!(!may_link);
                prop_assert_eq!(banner.link(), None);
            }
            if banner.link() == Some(LinkTarget::BillingPage) {
                prop_assert!(may_link);
            }
        }
    }

    #[test]
    fn prop_blocking_payment_outranks_trial(
        snap in any_snapshot(),
        context in any_context(),
        toggles in any_toggles()
    ) {
        let payment = snap.payment_status.unwrap();
        if payment.is_service_impacting() {
            let banner = resolve(&snap, context, toggles).unwrap();
            prop_assert_eq!(banner.level, BannerLevel::Warning);
            let expected = match payment {
                PaymentStatus::Locked => vec![MessageKey::LockedPaymentStatus],
                PaymentStatus::Disabled => vec![
                    MessageKey::DisabledPaymentStatus,
                    MessageKey::DisabledPaymentStatusWithLink,
                ],
                _ => vec![
                    MessageKey::GracePeriodPaymentStatus,
                    MessageKey::GracePeriodPaymentStatusWithLink,
                ],
            };
            prop_assert!(expected.contains(&banner.message_key));
        }
    }

    #[test]
    fn prop_manual_never_shows_at_top_level(snap in any_snapshot(), toggles in any_toggles()) {
        let snap = snap.with_payment_status(PaymentStatus::Manual);
        prop_assert!(resolve(&snap, DisplayContext::TopLevel, toggles).is_none());
    }

    #[test]
    fn prop_grace_days_never_negative(snap in any_snapshot(), context in any_context()) {
        let snap = snap.with_payment_status(PaymentStatus::GracePeriod);
        let banner = resolve(&snap, context, BannerToggles::new()).unwrap();
        prop_assert!(banner.days().unwrap() >= 0);
    }

    #[test]
    fn prop_suppression_flag_matches_outcome(
        snap in any_snapshot(),
        context in any_context(),
        toggles in any_toggles()
    ) {
        let resolver = StatusBannerResolver::new();
        let resolution = resolver.evaluate(&snap, context, toggles);
        let flagged = |name: &str| {
            resolver.rules().iter().any(|rule| rule.name() == name && rule.is_suppression())
        };
        match resolution {
            Resolution::Suppressed { rule } => prop_assert!(flagged(rule)),
            Resolution::Banner { rule, .. } => prop_assert!(!flagged(rule)),
            Resolution::Undetermined | Resolution::NoMatch => {}
        }
    }
}
