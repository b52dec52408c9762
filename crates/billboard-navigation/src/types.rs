//! Navigation inputs and targets

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Path segment of the workspaces area
pub const WORKSPACES_SEGMENT: &str = "workspaces";

/// Path segment of the organization area
pub const ORGANIZATION_SEGMENT: &str = "organization";

/// Workspace identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkspaceId(pub Uuid);

impl std::fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the user stands in first-run onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStatus {
    /// Onboarding started but not finished
    InProgress,
    /// Onboarding finished
    Completed,
    /// User opted out
    Skipped,
    /// A value this build does not know about
    #[serde(other)]
    Unrecognized,
}

impl OnboardingStatus {
    /// Onboarding is over, one way or the other
    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Completed | Self::Skipped)
    }
}

/// Experiment flags that affect navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationToggles {
    /// `sidebar.showOrgPickerV2`
    pub show_org_picker_v2: bool,

    /// `onboarding.surveyEnabled`
    pub onboarding_survey_enabled: bool,
}

/// Everything the landing decision depends on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationInput {
    /// Current organization
    pub organization_id: Uuid,

    /// Workspaces visible to the user, first page first
    #[serde(default)]
    pub workspaces: Vec<WorkspaceId>,

    /// Organization UI feature is available
    #[serde(default)]
    pub show_organization_ui: bool,

    /// User signed up in this browser session
    #[serde(default)]
    pub is_new_signup: bool,

    /// Onboarding progress from user metadata
    #[serde(default)]
    pub onboarding_status: Option<OnboardingStatus>,

    /// Pending redirect back into the connector builder
    #[serde(default)]
    pub connector_builder_redirect: Option<String>,

    /// Experiment flags
    #[serde(default)]
    pub toggles: NavigationToggles,
}

impl NavigationInput {
    /// Create input for an organization with no workspaces
    #[inline]
    #[must_use]
    pub fn new(organization_id: Uuid) -> Self {
        Self {
            organization_id,
            workspaces: Vec::new(),
            show_organization_ui: false,
            is_new_signup: false,
            onboarding_status: None,
            connector_builder_redirect: None,
            toggles: NavigationToggles::default(),
        }
    }

    /// With workspaces
    #[inline]
    #[must_use]
    pub fn with_workspaces(mut self, workspaces: Vec<WorkspaceId>) -> Self {
        self.workspaces = workspaces;
        self
    }

    /// With organization UI availability
    #[inline]
    #[must_use]
    pub fn with_organization_ui(mut self, shown: bool) -> Self {
        self.show_organization_ui = shown;
        self
    }

    /// As a fresh signup with the given onboarding progress
    #[inline]
    #[must_use]
    pub fn with_new_signup(mut self, status: Option<OnboardingStatus>) -> Self {
        self.is_new_signup = true;
        self.onboarding_status = status;
        self
    }

    /// With a pending connector builder redirect
    #[inline]
    #[must_use]
    pub fn with_connector_builder_redirect(mut self, url: impl Into<String>) -> Self {
        self.connector_builder_redirect = Some(url.into());
        self
    }

    /// With experiment flags
    #[inline]
    #[must_use]
    pub fn with_toggles(mut self, toggles: NavigationToggles) -> Self {
        self.toggles = toggles;
        self
    }

    /// First visible workspace
    #[inline]
    #[must_use]
    pub fn first_workspace(&self) -> Option<WorkspaceId> {
        self.workspaces.first().copied()
    }

    /// New signup who has not finished onboarding
    #[must_use]
    pub fn needs_onboarding(&self) -> bool {
        self.is_new_signup && !self.onboarding_status.is_some_and(|s| s.is_finished())
    }
}

/// Landing destination; every navigation replaces the current history entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LandingTarget {
    /// Resume a connector builder session
    ConnectorBuilder {
        /// Redirect URL as supplied
        url: String,
    },
    /// Onboarding flow inside a workspace
    Onboarding {
        /// Workspace hosting onboarding
        workspace_id: WorkspaceId,
    },
    /// A single workspace
    Workspace {
        /// Workspace to open
        workspace_id: WorkspaceId,
    },
    /// Workspace list scoped to the organization
    OrganizationWorkspaces {
        /// Organization
        organization_id: Uuid,
    },
    /// Global workspace list
    WorkspaceList,
}

impl LandingTarget {
    /// Application path to navigate to
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::ConnectorBuilder { url } => url.clone(),
            Self::Onboarding { workspace_id } => {
                format!("/{WORKSPACES_SEGMENT}/{workspace_id}/onboarding")
            }
            Self::Workspace { workspace_id } => format!("/{WORKSPACES_SEGMENT}/{workspace_id}"),
            Self::OrganizationWorkspaces { organization_id } => {
                format!("/{ORGANIZATION_SEGMENT}/{organization_id}/{WORKSPACES_SEGMENT}")
            }
            Self::WorkspaceList => format!("/{WORKSPACES_SEGMENT}"),
        }
    }
}
