//! Prioritized banner rule table
//!
//! Each row pairs a guard with a builder. The dispatcher walks the table top
//! to bottom and stops at the first row whose guard holds; that row's builder
//! either produces the banner or returns `None` to suppress every banner.
//!
//! Payment-blocking states sit above trial messaging, so a locked, disabled
//! or grace-period organization never sees a trial prompt.

use crate::banner::{param, BannerDescriptor, BannerLevel, LinkTarget, MessageKey, ParamValue};
use crate::context::{BannerToggles, DisplayContext};
use crate::snapshot::OrganizationBillingSnapshot;
use crate::status::{AccountType, PaymentStatus, SubscriptionStatus, TrialStatus};

/// Inputs of one evaluation, after the required statuses were checked
#[derive(Debug, Clone, Copy)]
pub(crate) struct Facts<'a> {
    pub(crate) snapshot: &'a OrganizationBillingSnapshot,
    pub(crate) payment: PaymentStatus,
    pub(crate) subscription: SubscriptionStatus,
    pub(crate) context: DisplayContext,
    pub(crate) toggles: BannerToggles,
}

impl<'a> Facts<'a> {
    /// Returns `None` when either required status is missing
    pub(crate) fn gather(
        snapshot: &'a OrganizationBillingSnapshot,
        context: DisplayContext,
        toggles: BannerToggles,
    ) -> Option<Self> {
        Some(Self {
            snapshot,
            payment: snapshot.payment_status?,
            subscription: snapshot.subscription_status?,
            context,
            toggles,
        })
    }

    fn trial(&self) -> Option<TrialStatus> {
        self.snapshot.trial_status
    }

    fn account(&self) -> Option<AccountType> {
        self.snapshot.account_type
    }

    /// Billing call-to-action is only offered at top level, to users who can act on it
    fn offers_billing_link(&self) -> bool {
        self.context == DisplayContext::TopLevel && self.snapshot.can_manage_organization_billing
    }

    /// Pick the with-link or plain key; only the former carries `lnk`
    fn split(&self, level: BannerLevel, linked: MessageKey, plain: MessageKey) -> BannerDescriptor {
        if self.offers_billing_link() {
            BannerDescriptor::new(level, linked).with_link(LinkTarget::BillingPage)
        } else {
            BannerDescriptor::new(level, plain)
        }
    }
}

/// One row of the rule table
#[derive(Clone, Copy)]
pub struct BannerRule {
    name: &'static str,
    stage: u8,
    suppresses: bool,
    guard: fn(&Facts<'_>) -> bool,
    build: fn(&Facts<'_>) -> Option<BannerDescriptor>,
}

impl BannerRule {
    /// Rule name, used in logs and diagnostics
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Precedence stage (1 = highest); rows sharing a stage never overlap
    #[inline]
    #[must_use]
    pub fn stage(&self) -> u8 {
        self.stage
    }

    /// Whether this row suppresses all banners when it matches
    #[must_use]
    pub fn is_suppression(&self) -> bool {
        self.suppresses
    }

    pub(crate) fn matches(&self, facts: &Facts<'_>) -> bool {
        (self.guard)(facts)
    }

    pub(crate) fn build(&self, facts: &Facts<'_>) -> Option<BannerDescriptor> {
        (self.build)(facts)
    }
}

impl std::fmt::Debug for BannerRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BannerRule")
            .field("name", &self.name)
            .field("stage", &self.stage)
            .finish()
    }
}

/// The standard table, highest precedence first
pub static STANDARD_RULES: [BannerRule; 11] = [
    BannerRule {
        name: "manual_payment_top_level",
        stage: 1,
        suppresses: true,
        guard: manual_at_top_level,
        build: suppress,
    },
    BannerRule {
        name: "manual_payment_free",
        stage: 1,
        suppresses: false,
        guard: manual_free,
        build: manual_free_banner,
    },
    BannerRule {
        name: "manual_payment_internal",
        stage: 1,
        suppresses: false,
        guard: manual_internal,
        build: manual_internal_banner,
    },
    BannerRule {
        name: "locked",
        stage: 2,
        suppresses: false,
        guard: locked,
        build: locked_banner,
    },
    BannerRule {
        name: "disabled",
        stage: 3,
        suppresses: false,
        guard: disabled,
        build: disabled_banner,
    },
    BannerRule {
        name: "grace_period",
        stage: 4,
        suppresses: false,
        guard: grace_period,
        build: grace_period_banner,
    },
    BannerRule {
        name: "pre_trial",
        stage: 5,
        suppresses: false,
        guard: pre_trial,
        build: pre_trial_banner,
    },
    BannerRule {
        name: "trial_upgrade_prompt",
        stage: 6,
        suppresses: false,
        guard: trial_upgrade_prompt,
        build: trial_upgrade_banner,
    },
    BannerRule {
        name: "in_trial_with_payment_method",
        stage: 7,
        suppresses: false,
        guard: in_trial_with_payment_method,
        build: in_trial_with_payment_method_banner,
    },
    BannerRule {
        name: "in_trial_without_payment_method",
        stage: 7,
        suppresses: false,
        guard: in_trial_without_payment_method,
        build: in_trial_without_payment_method_banner,
    },
    BannerRule {
        name: "post_trial_unsubscribed",
        stage: 8,
        suppresses: false,
        guard: post_trial_unsubscribed,
        build: post_trial_banner,
    },
];

fn suppress(_: &Facts<'_>) -> Option<BannerDescriptor> {
    None
}

fn manual_at_top_level(facts: &Facts<'_>) -> bool {
    facts.payment == PaymentStatus::Manual && facts.context == DisplayContext::TopLevel
}

// Manual payment with any other account type matches nothing here and
// evaluation continues with the next stage.
fn manual_free(facts: &Facts<'_>) -> bool {
    facts.payment == PaymentStatus::Manual && facts.account() == Some(AccountType::Free)
}

fn manual_free_banner(_: &Facts<'_>) -> Option<BannerDescriptor> {
    Some(BannerDescriptor::info(MessageKey::ManualPaymentStatusFree))
}

fn manual_internal(facts: &Facts<'_>) -> bool {
    facts.payment == PaymentStatus::Manual && facts.account() == Some(AccountType::Internal)
}

fn manual_internal_banner(_: &Facts<'_>) -> Option<BannerDescriptor> {
    Some(BannerDescriptor::info(MessageKey::ManualPaymentStatusInternal))
}

fn locked(facts: &Facts<'_>) -> bool {
    facts.payment == PaymentStatus::Locked
}

fn locked_banner(_: &Facts<'_>) -> Option<BannerDescriptor> {
    Some(
        BannerDescriptor::warning(MessageKey::LockedPaymentStatus)
            .with_link(LinkTarget::SupportPortal),
    )
}

fn disabled(facts: &Facts<'_>) -> bool {
    facts.payment == PaymentStatus::Disabled
}

fn disabled_banner(facts: &Facts<'_>) -> Option<BannerDescriptor> {
    Some(facts.split(
        BannerLevel::Warning,
        MessageKey::DisabledPaymentStatusWithLink,
        MessageKey::DisabledPaymentStatus,
    ))
}

fn grace_period(facts: &Facts<'_>) -> bool {
    facts.payment == PaymentStatus::GracePeriod
}

fn grace_period_banner(facts: &Facts<'_>) -> Option<BannerDescriptor> {
    let banner = facts.split(
        BannerLevel::Warning,
        MessageKey::GracePeriodPaymentStatusWithLink,
        MessageKey::GracePeriodPaymentStatus,
    );
    Some(banner.with_days(facts.snapshot.grace_period_days_left()))
}

fn pre_trial(facts: &Facts<'_>) -> bool {
    facts.trial() == Some(TrialStatus::PreTrial)
}

fn pre_trial_banner(_: &Facts<'_>) -> Option<BannerDescriptor> {
    Some(BannerDescriptor::info(MessageKey::PreTrial))
}

fn trial_upgrade_prompt(facts: &Facts<'_>) -> bool {
    facts.trial() == Some(TrialStatus::InTrial) && facts.toggles.show_upgrade_text_in_status_banner
}

fn trial_upgrade_banner(facts: &Facts<'_>) -> Option<BannerDescriptor> {
    let snapshot = facts.snapshot;
    let level = if snapshot.is_trial_ending_within_24_hours {
        BannerLevel::Error
    } else {
        BannerLevel::Warning
    };

    let mut banner = facts
        .split(level, MessageKey::TrialEndingWithLink, MessageKey::TrialEnding)
        .with_param(
            param::TRIAL_ENDING_WITHIN_24_HOURS,
            ParamValue::Flag(snapshot.is_trial_ending_within_24_hours),
        );
    if let Some(ends_at) = snapshot.trial_ends_at {
        banner = banner.with_param(param::EXACT_TIME, ParamValue::Timestamp(ends_at));
    }
    Some(banner.with_days(i64::from(snapshot.trial_days_left)))
}

fn in_trial_with_payment_method(facts: &Facts<'_>) -> bool {
    facts.trial() == Some(TrialStatus::InTrial) && facts.payment == PaymentStatus::Okay
}

fn in_trial_with_payment_method_banner(facts: &Facts<'_>) -> Option<BannerDescriptor> {
    Some(
        BannerDescriptor::info(MessageKey::InTrialWithPaymentMethod)
            .with_days(i64::from(facts.snapshot.trial_days_left)),
    )
}

fn in_trial_without_payment_method(facts: &Facts<'_>) -> bool {
    facts.trial() == Some(TrialStatus::InTrial) && facts.payment == PaymentStatus::Uninitialized
}

fn in_trial_without_payment_method_banner(facts: &Facts<'_>) -> Option<BannerDescriptor> {
    let banner = facts.split(BannerLevel::Info, MessageKey::InTrialWithLink, MessageKey::InTrial);
    Some(banner.with_days(i64::from(facts.snapshot.trial_days_left)))
}

fn post_trial_unsubscribed(facts: &Facts<'_>) -> bool {
    facts.trial() == Some(TrialStatus::PostTrial)
        && (facts.payment == PaymentStatus::Uninitialized || !facts.subscription.is_subscribed())
}

fn post_trial_banner(facts: &Facts<'_>) -> Option<BannerDescriptor> {
    Some(facts.split(BannerLevel::Info, MessageKey::PostTrialWithLink, MessageKey::PostTrial))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn facts_for(
        snapshot: &OrganizationBillingSnapshot,
        context: DisplayContext,
    ) -> Facts<'_> {
        Facts::gather(snapshot, context, BannerToggles::new()).unwrap()
    }

    fn snapshot(payment: PaymentStatus) -> OrganizationBillingSnapshot {
        OrganizationBillingSnapshot::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
            .with_payment_status(payment)
            .with_subscription_status(SubscriptionStatus::Unsubscribed)
    }

    #[test]
    fn stages_are_non_decreasing() {
        let stages: Vec<u8> = STANDARD_RULES.iter().map(BannerRule::stage).collect();
        let mut sorted = stages.clone();
        sorted.sort_unstable();
        assert_eq!(stages, sorted);
        assert_eq!(stages.first(), Some(&1));
        assert_eq!(stages.last(), Some(&8));
    }

    #[test]
    fn rule_names_are_unique() {
        let mut names: Vec<&str> = STANDARD_RULES.iter().map(BannerRule::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), STANDARD_RULES.len());
    }

    #[test]
    fn only_manual_top_level_row_suppresses() {
        let suppressing: Vec<_> = STANDARD_RULES
            .iter()
            .filter(|rule| rule.is_suppression())
            .map(BannerRule::name)
            .collect();
        assert_eq!(suppressing, vec!["manual_payment_top_level"]);
    }

    #[test]
    fn gather_requires_both_statuses() {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let missing_subscription =
            OrganizationBillingSnapshot::new(at).with_payment_status(PaymentStatus::Okay);
        assert!(Facts::gather(
            &missing_subscription,
            DisplayContext::TopLevel,
            BannerToggles::new()
        )
        .is_none());
    }

    #[test]
    fn split_needs_context_and_permission() {
        let manager = snapshot(PaymentStatus::Disabled).with_billing_access(true);
        let viewer = snapshot(PaymentStatus::Disabled);

        let linked = facts_for(&manager, DisplayContext::TopLevel).split(
            BannerLevel::Warning,
            MessageKey::DisabledPaymentStatusWithLink,
            MessageKey::DisabledPaymentStatus,
        );
        assert_eq!(linked.message_key, MessageKey::DisabledPaymentStatusWithLink);
        assert_eq!(linked.link(), Some(LinkTarget::BillingPage));

        for (snap, context) in [
            (&manager, DisplayContext::BillingPage),
            (&viewer, DisplayContext::TopLevel),
            (&viewer, DisplayContext::BillingPage),
        ] {
            let plain = facts_for(snap, context).split(
                BannerLevel::Warning,
                MessageKey::DisabledPaymentStatusWithLink,
                MessageKey::DisabledPaymentStatus,
            );
            assert_eq!(plain.message_key, MessageKey::DisabledPaymentStatus);
            assert!(plain.link().is_none());
        }
    }
}
