//! Requirement value objects.

use serde::{Deserialize, Serialize};

/// Closed set of precondition kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementType {
    ProjectHasTasks,
    AllTasksCompleted,
    TaskHasAssignee,
    TaskHasDueDate,
    FileHasDescription,
    UserHasProfile,
    ProjectHasDescription,
    /// Emitted when a task is created without a selected project.
    ProjectHasOrganization,
    RoleHasPermission,
}

impl RequirementType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProjectHasTasks => "project_has_tasks",
            Self::AllTasksCompleted => "all_tasks_completed",
            Self::TaskHasAssignee => "task_has_assignee",
            Self::TaskHasDueDate => "task_has_due_date",
            Self::FileHasDescription => "file_has_description",
            Self::UserHasProfile => "user_has_profile",
            Self::ProjectHasDescription => "project_has_description",
            Self::ProjectHasOrganization => "project_has_organization",
            Self::RoleHasPermission => "role_has_permission",
        }
    }
}

/// Description of an unmet precondition and how to remedy it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    #[serde(rename = "type")]
    pub kind: RequirementType,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    /// Label of the suggested remedial action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
}

impl Requirement {
    pub fn new(kind: RequirementType, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            help_text: None,
            action: None,
            action_url: None,
        }
    }

    pub fn with_help(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_action_url(mut self, action_url: impl Into<String>) -> Self {
        self.action_url = Some(action_url.into());
        self
    }
}

/// Outcome of evaluating one requirement against one entity.
///
/// Built only through `pass` and `fail`, so `requirement` is present iff
/// the check failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementCheck {
    passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    requirement: Option<Requirement>,
}

impl RequirementCheck {
    pub fn pass() -> Self {
        Self {
            passed: true,
            requirement: None,
        }
    }

    pub fn fail(requirement: Requirement) -> Self {
        Self {
            passed: false,
            requirement: Some(requirement),
        }
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Returns the unmet requirement, if any.
    pub fn failure(&self) -> Option<&Requirement> {
        self.requirement.as_ref()
    }

    pub fn into_failure(self) -> Option<Requirement> {
        self.requirement
    }
}
