//! Status banner resolver
//!
//! Provides [`StatusBannerResolver`], the single dispatcher over a banner rule
//! table, and the [`resolve`] shorthand over the standard table.

use crate::banner::BannerDescriptor;
use crate::context::{BannerToggles, DisplayContext};
use crate::rules::{BannerRule, Facts, STANDARD_RULES};
use crate::snapshot::OrganizationBillingSnapshot;

/// Outcome of one evaluation, with the rule that decided it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Payment or subscription status missing; nothing is guessed
    Undetermined,

    /// A rule matched and produced a banner
    Banner {
        /// Name of the matching rule
        rule: &'static str,
        /// Selected banner
        descriptor: BannerDescriptor,
    },

    /// A rule matched and suppressed all banners
    Suppressed {
        /// Name of the matching rule
        rule: &'static str,
    },

    /// No rule matched
    NoMatch,
}

impl Resolution {
    /// Name of the deciding rule, if any
    #[must_use]
    pub fn rule(&self) -> Option<&'static str> {
        match self {
            Self::Banner { rule, .. } | Self::Suppressed { rule } => Some(rule),
            Self::Undetermined | Self::NoMatch => None,
        }
    }

    /// Selected banner, if any
    #[must_use]
    pub fn into_banner(self) -> Option<BannerDescriptor> {
        match self {
            Self::Banner { descriptor, .. } => Some(descriptor),
            _ => None,
        }
    }
}

/// Dispatcher over a prioritized rule table
///
/// Stateless: evaluating the same inputs twice yields equal results, and one
/// resolver can be shared freely across threads.
#[derive(Debug, Clone, Copy)]
pub struct StatusBannerResolver {
    rules: &'static [BannerRule],
}

impl Default for StatusBannerResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBannerResolver {
    /// Resolver over the standard rule table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: &STANDARD_RULES,
        }
    }

    /// Rules in evaluation order
    #[inline]
    #[must_use]
    pub fn rules(&self) -> &'static [BannerRule] {
        self.rules
    }

    /// Evaluate the table and report which rule decided
    #[must_use]
    pub fn evaluate(
        &self,
        snapshot: &OrganizationBillingSnapshot,
        context: DisplayContext,
        toggles: BannerToggles,
    ) -> Resolution {
        let Some(facts) = Facts::gather(snapshot, context, toggles) else {
            tracing::debug!(
                payment_status = ?snapshot.payment_status,
                subscription_status = ?snapshot.subscription_status,
                "billing status undetermined, no banner"
            );
            return Resolution::Undetermined;
        };

        let Some(rule) = self.rules.iter().find(|rule| rule.matches(&facts)) else {
            tracing::trace!(%context, "no status banner rule matched");
            return Resolution::NoMatch;
        };

        match rule.build(&facts) {
            Some(descriptor) => {
                tracing::debug!(
                    rule = rule.name(),
                    %context,
                    level = %descriptor.level,
                    message_key = %descriptor.message_key,
                    "status banner selected"
                );
                Resolution::Banner {
                    rule: rule.name(),
                    descriptor,
                }
            }
            None => {
                tracing::debug!(rule = rule.name(), %context, "status banners suppressed");
                Resolution::Suppressed { rule: rule.name() }
            }
        }
    }

    /// Select at most one banner
    #[inline]
    #[must_use]
    pub fn resolve(
        &self,
        snapshot: &OrganizationBillingSnapshot,
        context: DisplayContext,
        toggles: BannerToggles,
    ) -> Option<BannerDescriptor> {
        self.evaluate(snapshot, context, toggles).into_banner()
    }
}

/// Select at most one banner using the standard rule table
#[inline]
#[must_use]
pub fn resolve(
    snapshot: &OrganizationBillingSnapshot,
    context: DisplayContext,
    toggles: BannerToggles,
) -> Option<BannerDescriptor> {
    StatusBannerResolver::new().resolve(snapshot, context, toggles)
}
