//! Landing rule table
//!
//! Same shape as the banner rules: ordered guard/builder rows, first match
//! wins. The last row always matches, so a landing target always exists.

use crate::types::{LandingTarget, NavigationInput};

/// One row of the landing table
#[derive(Clone, Copy)]
pub struct LandingRule {
    name: &'static str,
    guard: fn(&NavigationInput) -> bool,
    build: fn(&NavigationInput) -> Option<LandingTarget>,
}

impl LandingRule {
    /// Rule name, used in logs and diagnostics
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl std::fmt::Debug for LandingRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LandingRule").field("name", &self.name).finish()
    }
}

/// Landing rules, highest precedence first
pub static LANDING_RULES: [LandingRule; 6] = [
    LandingRule {
        name: "connector_builder_redirect",
        guard: has_connector_builder_redirect,
        build: connector_builder,
    },
    LandingRule {
        name: "onboarding",
        guard: needs_onboarding_survey,
        build: onboarding,
    },
    LandingRule {
        name: "organization_ui_hidden",
        guard: organization_ui_hidden,
        build: first_workspace,
    },
    LandingRule {
        name: "single_workspace",
        guard: single_workspace,
        build: first_workspace,
    },
    LandingRule {
        name: "organization_picker",
        guard: org_picker_enabled,
        build: organization_workspaces,
    },
    LandingRule {
        name: "workspace_list",
        guard: always,
        build: workspace_list,
    },
];

fn has_connector_builder_redirect(input: &NavigationInput) -> bool {
    input
        .connector_builder_redirect
        .as_deref()
        .is_some_and(|url| !url.is_empty())
}

fn connector_builder(input: &NavigationInput) -> Option<LandingTarget> {
    input
        .connector_builder_redirect
        .clone()
        .map(|url| LandingTarget::ConnectorBuilder { url })
}

fn needs_onboarding_survey(input: &NavigationInput) -> bool {
    input.toggles.onboarding_survey_enabled
        && input.needs_onboarding()
        && input.first_workspace().is_some()
}

fn onboarding(input: &NavigationInput) -> Option<LandingTarget> {
    input
        .first_workspace()
        .map(|workspace_id| LandingTarget::Onboarding { workspace_id })
}

fn organization_ui_hidden(input: &NavigationInput) -> bool {
    !input.workspaces.is_empty() && !input.show_organization_ui
}

fn single_workspace(input: &NavigationInput) -> bool {
    input.workspaces.len() == 1
}

fn first_workspace(input: &NavigationInput) -> Option<LandingTarget> {
    input
        .first_workspace()
        .map(|workspace_id| LandingTarget::Workspace { workspace_id })
}

fn org_picker_enabled(input: &NavigationInput) -> bool {
    input.toggles.show_org_picker_v2
}

fn organization_workspaces(input: &NavigationInput) -> Option<LandingTarget> {
    Some(LandingTarget::OrganizationWorkspaces {
        organization_id: input.organization_id,
    })
}

fn always(_: &NavigationInput) -> bool {
    true
}

fn workspace_list(_: &NavigationInput) -> Option<LandingTarget> {
    Some(LandingTarget::WorkspaceList)
}

/// Chosen landing target and the rule that chose it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Landing {
    /// Name of the deciding rule
    pub rule: &'static str,
    /// Where to navigate
    pub target: LandingTarget,
    /// Replace the current history entry instead of pushing
    pub replace: bool,
}

/// Pick the landing target for `input`
#[must_use]
pub fn resolve_landing(input: &NavigationInput) -> Landing {
    let landing = LANDING_RULES
        .iter()
        .filter(|rule| (rule.guard)(input))
        .find_map(|rule| {
            (rule.build)(input).map(|target| Landing {
                rule: rule.name,
                target,
                replace: true,
            })
        })
        .unwrap_or(Landing {
            rule: "workspace_list",
            target: LandingTarget::WorkspaceList,
            replace: true,
        });

    tracing::debug!(
        rule = landing.rule,
        workspaces = input.workspaces.len(),
        path = %landing.target.path(),
        "landing target selected"
    );

    landing
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn last_rule_always_matches() {
        let last = LANDING_RULES.last().unwrap();
        assert_eq!(last.name(), "workspace_list");
        assert!((last.guard)(&NavigationInput::new(Uuid::nil())));
    }

    #[test]
    fn empty_redirect_is_ignored() {
        let input = NavigationInput::new(Uuid::nil()).with_connector_builder_redirect("");
        let landing = resolve_landing(&input);
        assert_eq!(landing.target, LandingTarget::WorkspaceList);
        assert!(landing.replace);
    }
}
