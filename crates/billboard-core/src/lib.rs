//! Billboard Core
//!
//! Deterministic selection of the billing status banner shown to an
//! organization.
//!
//! # Core Concepts
//!
//! - [`OrganizationBillingSnapshot`]: Read-only billing, trial and subscription state
//! - [`DisplayContext`]: Where the banner would be shown
//! - [`BannerToggles`]: Experiment flags that change banner selection
//! - [`BannerDescriptor`]: Level, message key and message params of one banner
//! - [`StatusBannerResolver`]: Dispatcher over the prioritized rule table
//!
//! # Example
//!
//! ```rust,ignore
//! use billboard_core::{resolve, BannerToggles, DisplayContext};
//!
//! let banner = resolve(&snapshot, DisplayContext::TopLevel, BannerToggles::new());
//! if let Some(banner) = banner {
//!     println!("{}: {}", banner.level, banner.message_key);
//! }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod banner;
mod context;
mod resolver;
mod rules;
mod snapshot;
mod status;

// Re-exports
pub use banner::{
    param, BannerDescriptor, BannerLevel, LinkTarget, MessageKey, MessageParams, ParamValue,
};
pub use context::{BannerToggles, DisplayContext};
pub use resolver::{resolve, Resolution, StatusBannerResolver};
pub use rules::{BannerRule, STANDARD_RULES};
pub use snapshot::OrganizationBillingSnapshot;
pub use status::{AccountType, PaymentStatus, SubscriptionStatus, TrialStatus};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
