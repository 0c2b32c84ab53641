//! Current-user record supplied by the external auth collaborator.

use serde::{Deserialize, Serialize};

/// Access-level classification of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    TeamMember,
    Client,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::TeamMember => "team_member",
            Self::Client => "client",
            Self::User => "user",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "admin" => Some(Self::Admin),
            "team_member" => Some(Self::TeamMember),
            "client" => Some(Self::Client),
            "user" => Some(Self::User),
            _ => None,
        }
    }
}

/// Authenticated user as consumed by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Opaque id from the auth provider.
    pub id: String,
    /// Display name; `None` until the profile is completed.
    pub name: Option<String>,
    pub role: Role,
}

impl User {
    pub fn new(id: impl Into<String>, name: Option<&str>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: name.map(str::to_string),
            role,
        }
    }
}
