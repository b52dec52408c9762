//! Banner descriptors
//!
//! A [`BannerDescriptor`] is what the presentation layer renders: a severity,
//! a message key looked up in its localization table, and the parameters the
//! message interpolates. Message keys are stable identifiers and must not be
//! renamed without a matching change on the presentation side.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Parameter names used by the billing banner messages
pub mod param {
    //! Message parameter names

    /// Whole days remaining (grace period or trial)
    pub const DAYS: &str = "days";

    /// Link wrapped around the call to action
    pub const LINK: &str = "lnk";

    /// Trial ends within the next 24 hours
    pub const TRIAL_ENDING_WITHIN_24_HOURS: &str = "isTrialEndingWithin24Hours";

    /// Exact trial end, formatted by the presentation layer
    pub const EXACT_TIME: &str = "exactTime";
}

/// Banner severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerLevel {
    /// Informational
    Info,
    /// Needs attention
    Warning,
    /// Service about to be impacted
    Error,
}

impl std::fmt::Display for BannerLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// Localization key of a banner message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKey {
    /// Manual payment, free account
    #[serde(rename = "billing.banners.manualPaymentStatusFree")]
    ManualPaymentStatusFree,
    /// Manual payment, internal account
    #[serde(rename = "billing.banners.manualPaymentStatusInternal")]
    ManualPaymentStatusInternal,
    /// Account locked; contact support
    #[serde(rename = "billing.banners.lockedPaymentStatus")]
    LockedPaymentStatus,
    /// Account disabled
    #[serde(rename = "billing.banners.disabledPaymentStatus")]
    DisabledPaymentStatus,
    /// Account disabled, with a link to billing
    #[serde(rename = "billing.banners.disabledPaymentStatusWithLink")]
    DisabledPaymentStatusWithLink,
    /// Grace period running
    #[serde(rename = "billing.banners.gracePeriodPaymentStatus")]
    GracePeriodPaymentStatus,
    /// Grace period running, with a link to billing
    #[serde(rename = "billing.banners.gracePeriodPaymentStatusWithLink")]
    GracePeriodPaymentStatusWithLink,
    /// Trial not started
    #[serde(rename = "billing.banners.preTrial")]
    PreTrial,
    /// Trial ending, upgrade prompt
    #[serde(rename = "billing.banners.entitlements.trialEnding")]
    TrialEnding,
    /// Trial ending, upgrade prompt with a link to billing
    #[serde(rename = "billing.banners.entitlements.trialEndingWithLink")]
    TrialEndingWithLink,
    /// In trial with a payment method on file
    #[serde(rename = "billing.banners.inTrialWithPaymentMethod")]
    InTrialWithPaymentMethod,
    /// In trial without a payment method
    #[serde(rename = "billing.banners.inTrial")]
    InTrial,
    /// In trial without a payment method, with a link to billing
    #[serde(rename = "billing.banners.inTrialWithLink")]
    InTrialWithLink,
    /// Trial over, no subscription
    #[serde(rename = "billing.banners.postTrial")]
    PostTrial,
    /// Trial over, no subscription, with a link to billing
    #[serde(rename = "billing.banners.postTrialWithLink")]
    PostTrialWithLink,
}

impl MessageKey {
    /// Every key, in rule order
    pub const ALL: [MessageKey; 15] = [
        Self::ManualPaymentStatusFree,
        Self::ManualPaymentStatusInternal,
        Self::LockedPaymentStatus,
        Self::DisabledPaymentStatus,
        Self::DisabledPaymentStatusWithLink,
        Self::GracePeriodPaymentStatus,
        Self::GracePeriodPaymentStatusWithLink,
        Self::PreTrial,
        Self::TrialEnding,
        Self::TrialEndingWithLink,
        Self::InTrialWithPaymentMethod,
        Self::InTrial,
        Self::InTrialWithLink,
        Self::PostTrial,
        Self::PostTrialWithLink,
    ];

    /// Stable localization identifier
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ManualPaymentStatusFree => "billing.banners.manualPaymentStatusFree",
            Self::ManualPaymentStatusInternal => "billing.banners.manualPaymentStatusInternal",
            Self::LockedPaymentStatus => "billing.banners.lockedPaymentStatus",
            Self::DisabledPaymentStatus => "billing.banners.disabledPaymentStatus",
            Self::DisabledPaymentStatusWithLink => "billing.banners.disabledPaymentStatusWithLink",
            Self::GracePeriodPaymentStatus => "billing.banners.gracePeriodPaymentStatus",
            Self::GracePeriodPaymentStatusWithLink => {
                "billing.banners.gracePeriodPaymentStatusWithLink"
            }
            Self::PreTrial => "billing.banners.preTrial",
            Self::TrialEnding => "billing.banners.entitlements.trialEnding",
            Self::TrialEndingWithLink => "billing.banners.entitlements.trialEndingWithLink",
            Self::InTrialWithPaymentMethod => "billing.banners.inTrialWithPaymentMethod",
            Self::InTrial => "billing.banners.inTrial",
            Self::InTrialWithLink => "billing.banners.inTrialWithLink",
            Self::PostTrial => "billing.banners.postTrial",
            Self::PostTrialWithLink => "billing.banners.postTrialWithLink",
        }
    }

    /// Whether this is the billing-link half of a with-link/plain pair
    #[inline]
    #[must_use]
    pub fn is_billing_link_variant(&self) -> bool {
        matches!(
            self,
            Self::DisabledPaymentStatusWithLink
                | Self::GracePeriodPaymentStatusWithLink
                | Self::TrialEndingWithLink
                | Self::InTrialWithLink
                | Self::PostTrialWithLink
        )
    }

    /// Whether this is the plain half of a with-link/plain pair
    #[inline]
    #[must_use]
    pub fn is_plain_variant(&self) -> bool {
        matches!(
            self,
            Self::DisabledPaymentStatus
                | Self::GracePeriodPaymentStatus
                | Self::TrialEnding
                | Self::InTrial
                | Self::PostTrial
        )
    }
}

impl std::fmt::Display for MessageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Symbolic link destination; the presentation layer maps it to a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkTarget {
    /// External support portal
    SupportPortal,
    /// Organization billing page
    BillingPage,
}

/// Value interpolated into a banner message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Integer count
    Integer(i64),
    /// Boolean flag
    Flag(bool),
    /// Point in time
    Timestamp(DateTime<Utc>),
    /// Link destination
    Link(LinkTarget),
}

/// Message parameters, keyed by name, in insertion order
pub type MessageParams = IndexMap<String, ParamValue>;

/// A single banner selected for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerDescriptor {
    /// Severity
    pub level: BannerLevel,

    /// Localization key
    pub message_key: MessageKey,

    /// Interpolated parameters
    #[serde(default)]
    pub message_params: MessageParams,
}

impl BannerDescriptor {
    /// Create descriptor without parameters
    #[inline]
    #[must_use]
    pub fn new(level: BannerLevel, message_key: MessageKey) -> Self {
        Self {
            level,
            message_key,
            message_params: MessageParams::new(),
        }
    }

    /// Informational banner
    #[inline]
    #[must_use]
    pub fn info(message_key: MessageKey) -> Self {
        Self::new(BannerLevel::Info, message_key)
    }

    /// Warning banner
    #[inline]
    #[must_use]
    pub fn warning(message_key: MessageKey) -> Self {
        Self::new(BannerLevel::Warning, message_key)
    }

    /// Add a parameter
    #[inline]
    #[must_use]
    pub fn with_param(mut self, name: &str, value: ParamValue) -> Self {
        self.message_params.insert(name.to_string(), value);
        self
    }

    /// Add `days`
    #[inline]
    #[must_use]
    pub fn with_days(self, days: i64) -> Self {
        self.with_param(param::DAYS, ParamValue::Integer(days))
    }

    /// Add `lnk`
    #[inline]
    #[must_use]
    pub fn with_link(self, target: LinkTarget) -> Self {
        self.with_param(param::LINK, ParamValue::Link(target))
    }

    /// Look up a parameter
    #[inline]
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.message_params.get(name)
    }

    /// Embedded link target, if any
    #[must_use]
    pub fn link(&self) -> Option<LinkTarget> {
        match self.param(param::LINK) {
            Some(ParamValue::Link(target)) => Some(*target),
            _ => None,
        }
    }

    /// `days` parameter, if any
    #[must_use]
    pub fn days(&self) -> Option<i64> {
        match self.param(param::DAYS) {
            Some(ParamValue::Integer(days)) => Some(*days),
            _ => None,
        }
    }
}
