//! Subcommand bodies
//!
//! Each takes parsed input and configuration and returns the text to print,
//! so the binary only deals with files, flags and exit codes.

use crate::config::BillboardConfig;
use billboard_core::{
    param, resolve, BannerDescriptor, DisplayContext, OrganizationBillingSnapshot, ParamValue,
};
use billboard_navigation::{resolve_landing, Landing, NavigationInput};
use serde::Serialize;

/// Banner command output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BannerReport {
    /// Context the banner was resolved for
    pub context: DisplayContext,
    /// Selected banner, if any
    pub banner: Option<BannerDescriptor>,
}

impl BannerReport {
    /// Resolve the banner for `snapshot` with the configured experiments
    #[must_use]
    pub fn resolve(
        snapshot: &OrganizationBillingSnapshot,
        context: DisplayContext,
        config: &BillboardConfig,
    ) -> Self {
        Self {
            context,
            banner: resolve(snapshot, context, config.banner_toggles()),
        }
    }

    /// Human-readable rendering with link targets replaced by URLs
    #[must_use]
    pub fn to_text(&self, config: &BillboardConfig) -> String {
        let Some(banner) = &self.banner else {
            return "no banner".to_string();
        };

        let mut line = format!("{} {}", banner.level, banner.message_key);
        for (name, value) in &banner.message_params {
            let rendered = match value {
                ParamValue::Integer(n) => n.to_string(),
                ParamValue::Flag(flag) => flag.to_string(),
                ParamValue::Timestamp(at) => at.to_rfc3339(),
                ParamValue::Link(target) => config.link_url(*target).to_string(),
            };
            line.push_str(&format!(" {name}={rendered}"));
        }
        line
    }

    /// JSON rendering; links stay symbolic
    ///
    /// # Errors
    /// Serialization failure.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Whether the selected banner links anywhere
    #[must_use]
    pub fn has_link(&self) -> bool {
        self.banner
            .as_ref()
            .is_some_and(|banner| banner.param(param::LINK).is_some())
    }
}

/// Pick the landing target; experiment flags come from configuration
#[must_use]
pub fn navigate(mut input: NavigationInput, config: &BillboardConfig) -> Landing {
    input.toggles = config.navigation_toggles();
    resolve_landing(&input)
}
