//! Static role to action permission table.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::model::user::Role;

/// Role-gated action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    CreateProject,
    DeleteTask,
    EditOrganization,
    ViewAllFiles,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::CreateProject,
        Action::DeleteTask,
        Action::EditOrganization,
        Action::ViewAllFiles,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreateProject => "create_project",
            Self::DeleteTask => "delete_task",
            Self::EditOrganization => "edit_organization",
            Self::ViewAllFiles => "view_all_files",
        }
    }

    /// Message shown when a role is denied this action.
    pub fn denial_message(self) -> &'static str {
        match self {
            Self::CreateProject => "You don't have permission to create projects",
            Self::DeleteTask => "You don't have permission to delete tasks",
            Self::EditOrganization => "You don't have permission to edit organization settings",
            Self::ViewAllFiles => "You don't have permission to view all files",
        }
    }
}

/// Parses one action name.
pub fn parse_action(value: &str) -> Result<Action, ActionParseError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(ActionParseError::Empty);
    }
    Action::ALL
        .into_iter()
        .find(|action| action.as_str() == normalized)
        .ok_or_else(|| ActionParseError::Unsupported(normalized.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionParseError {
    Empty,
    Unsupported(String),
}

impl Display for ActionParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "action name must not be empty"),
            Self::Unsupported(value) => write!(f, "action is unsupported: {value}"),
        }
    }
}

impl Error for ActionParseError {}

const ADMIN_ACTIONS: &[Action] = &Action::ALL;
const TEAM_MEMBER_ACTIONS: &[Action] = &[Action::CreateProject, Action::DeleteTask];
const NO_ACTIONS: &[Action] = &[];

/// Actions a role may perform. The table is fixed at compile time.
pub fn allowed_actions(role: Role) -> &'static [Action] {
    match role {
        Role::Admin => ADMIN_ACTIONS,
        Role::TeamMember => TEAM_MEMBER_ACTIONS,
        Role::Client | Role::User => NO_ACTIONS,
    }
}

pub fn role_allows(role: Role, action: Action) -> bool {
    allowed_actions(role).contains(&action)
}
