//! Presentation-neutral binding contract for gated actions.
//!
//! Any consumer (web view, CLI, API formatter) maps a `GatePresentation` onto
//! its own primitives. A failed gate is never rendered without its reason.

use serde::Serialize;

use crate::gate::requirement::{Requirement, RequirementCheck};

/// How a consumer treats a failed gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateStyle {
    /// Render an explanatory panel.
    #[default]
    Panel,
    /// Disable interaction and expose the reason as a tooltip.
    Inert,
}

/// Which failures a multi-requirement scene surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SceneMode {
    #[default]
    FirstFailure,
    AllFailures,
}

/// Suggested remedy attached to a requirement panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Remedy {
    /// Navigable target labelled by the requirement action.
    Navigate { label: String, url: String },
    /// No URL: the consumer invokes its own callback.
    Callback { label: String },
}

/// Explanatory rendering of one unmet requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementPanel {
    pub message: String,
    pub help_text: Option<String>,
    pub remedy: Option<Remedy>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GatePresentation {
    Proceed,
    Explain(RequirementPanel),
    Disabled { tooltip: String },
}

impl GatePresentation {
    pub fn is_proceed(&self) -> bool {
        matches!(self, Self::Proceed)
    }
}

/// Label used when a requirement carries a URL but no action name.
pub const DEFAULT_REMEDY_LABEL: &str = "Resolve";

/// Maps one check onto the binding contract.
pub fn present(check: &RequirementCheck, style: GateStyle) -> GatePresentation {
    match check.failure() {
        None => GatePresentation::Proceed,
        Some(requirement) => present_requirement(requirement, style),
    }
}

pub fn present_requirement(requirement: &Requirement, style: GateStyle) -> GatePresentation {
    match style {
        GateStyle::Panel => GatePresentation::Explain(panel(requirement)),
        GateStyle::Inert => GatePresentation::Disabled {
            tooltip: tooltip(requirement),
        },
    }
}

/// Maps a list of checks onto a scene.
///
/// Returns an empty list when every check passed; otherwise one presentation
/// for the first failure, or one per failure in list order.
pub fn present_scene(
    checks: &[RequirementCheck],
    style: GateStyle,
    mode: SceneMode,
) -> Vec<GatePresentation> {
    let failures = checks.iter().filter_map(RequirementCheck::failure);
    match mode {
        SceneMode::FirstFailure => failures
            .take(1)
            .map(|requirement| present_requirement(requirement, style))
            .collect(),
        SceneMode::AllFailures => failures
            .map(|requirement| present_requirement(requirement, style))
            .collect(),
    }
}

fn panel(requirement: &Requirement) -> RequirementPanel {
    let remedy = match (&requirement.action_url, &requirement.action) {
        (Some(url), action) => Some(Remedy::Navigate {
            label: action
                .clone()
                .unwrap_or_else(|| DEFAULT_REMEDY_LABEL.to_string()),
            url: url.clone(),
        }),
        (None, Some(action)) => Some(Remedy::Callback {
            label: action.clone(),
        }),
        (None, None) => None,
    };

    RequirementPanel {
        message: requirement.message.clone(),
        help_text: requirement.help_text.clone(),
        remedy,
    }
}

fn tooltip(requirement: &Requirement) -> String {
    match requirement.help_text.as_deref() {
        Some(help) if !help.trim().is_empty() => format!("{}\n{}", requirement.message, help),
        _ => requirement.message.clone(),
    }
}
