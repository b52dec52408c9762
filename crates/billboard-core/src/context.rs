//! Display context and experiment toggles
//!
//! Neither changes which rule fires (apart from the manual payment
//! suppression at top level); they only decide whether a billing link is
//! embedded in the selected banner.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Where the banner would be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayContext {
    /// Application-wide banner slot
    #[default]
    TopLevel,

    /// Inside the billing page itself
    BillingPage,
}

impl DisplayContext {
    /// Wire name of the context
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopLevel => "top_level",
            Self::BillingPage => "billing_page",
        }
    }
}

impl std::fmt::Display for DisplayContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top_level" | "top-level" => Ok(Self::TopLevel),
            "billing_page" | "billing-page" => Ok(Self::BillingPage),
            _ => Err(format!("Unknown display context: {s}")),
        }
    }
}

/// Externally resolved experiment flags that affect banner selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerToggles {
    /// `entitlements.showUpgradeTextInStatusBanner`
    pub show_upgrade_text_in_status_banner: bool,
}

impl BannerToggles {
    /// All experiments off
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With the upgrade prompt experiment set
    #[inline]
    #[must_use]
    pub fn with_upgrade_text(mut self, enabled: bool) -> Self {
        self.show_upgrade_text_in_status_banner = enabled;
        self
    }
}
