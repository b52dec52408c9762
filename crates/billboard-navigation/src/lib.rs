//! Billboard Navigation
//!
//! Picks the default landing route for a user from their visible workspaces,
//! the current organization and a few feature toggles.
//!
//! # Example
//!
//! ```rust,ignore
//! use billboard_navigation::{resolve_landing, NavigationInput};
//!
//! let landing = resolve_landing(&NavigationInput::new(org_id).with_workspaces(workspaces));
//! println!("redirect to {}", landing.target.path());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod resolver;
mod types;

// Re-exports
pub use resolver::{resolve_landing, Landing, LandingRule, LANDING_RULES};
pub use types::{
    LandingTarget, NavigationInput, NavigationToggles, OnboardingStatus, WorkspaceId,
    ORGANIZATION_SEGMENT, WORKSPACES_SEGMENT,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
