//! Configuration for the `billboard` binary

use billboard_core::{BannerToggles, LinkTarget};
use billboard_navigation::NavigationToggles;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Config path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File is not valid TOML for [`BillboardConfig`]
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration could not be rendered
    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Top-level configuration; every section falls back to its defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillboardConfig {
    /// Experiment flags
    pub experiments: ExperimentConfig,
    /// Where symbolic banner links point
    pub links: LinkConfig,
    /// Logging defaults, overridden by flags and `RUST_LOG`
    pub logging: LoggingConfig,
}

/// Experiment flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Show the upgrade prompt while trialing without a payment method
    pub show_upgrade_text_in_status_banner: bool,
    /// Land on the organization workspace list
    pub show_org_picker_v2: bool,
    /// Send new signups through the onboarding survey
    pub onboarding_survey_enabled: bool,
}

/// Link destinations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Support portal URL
    pub support_portal_url: String,
    /// Billing page path
    pub billing_page_url: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            support_portal_url: "https://support.example.com/".to_string(),
            billing_page_url: "/settings/billing".to_string(),
        }
    }
}

/// Logging defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive
    pub level: String,
    /// Emit JSON lines
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

impl BillboardConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With experiment flags
    #[inline]
    #[must_use]
    pub fn with_experiments(mut self, experiments: ExperimentConfig) -> Self {
        self.experiments = experiments;
        self
    }

    /// With link destinations
    #[inline]
    #[must_use]
    pub fn with_links(mut self, links: LinkConfig) -> Self {
        self.links = links;
        self
    }

    /// With log level directive
    #[inline]
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }

    /// Parse from TOML text
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] on malformed TOML or mistyped values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] when the file cannot be read, and
    /// [`ConfigError::Parse`] when it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Render as TOML
    ///
    /// # Errors
    /// Returns [`ConfigError::Render`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Banner experiment flags
    #[must_use]
    pub fn banner_toggles(&self) -> BannerToggles {
        BannerToggles::new().with_upgrade_text(self.experiments.show_upgrade_text_in_status_banner)
    }

    /// Navigation experiment flags
    #[must_use]
    pub fn navigation_toggles(&self) -> NavigationToggles {
        NavigationToggles {
            show_org_picker_v2: self.experiments.show_org_picker_v2,
            onboarding_survey_enabled: self.experiments.onboarding_survey_enabled,
        }
    }

    /// Concrete URL for a symbolic link target
    #[must_use]
    pub fn link_url(&self, target: LinkTarget) -> &str {
        match target {
            LinkTarget::SupportPortal => &self.links.support_portal_url,
            LinkTarget::BillingPage => &self.links.billing_page_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(BillboardConfig::from_toml_str("").unwrap(), BillboardConfig::default());
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config = BillboardConfig::from_toml_str(
            r#"
            [experiments]
            show_upgrade_text_in_status_banner = true

            [links]
            billing_page_url = "/org/billing"
            "#,
        )
        .unwrap();

        assert!(config.banner_toggles().show_upgrade_text_in_status_banner);
        assert!(!config.navigation_toggles().show_org_picker_v2);
        assert_eq!(config.link_url(LinkTarget::BillingPage), "/org/billing");
        assert_eq!(
            config.link_url(LinkTarget::SupportPortal),
            LinkConfig::default().support_portal_url
        );
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn mistyped_value_is_rejected() {
        let err = BillboardConfig::from_toml_str("[logging]\njson = \"yes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rendered_config_parses_back() {
        let config = BillboardConfig::new().with_log_level("billboard_core=debug");
        let text = config.to_toml_string().unwrap();
        assert_eq!(BillboardConfig::from_toml_str(&text).unwrap(), config);
    }
}
