//! Project domain model.
//!
//! # Invariants
//! - `ProjectStatus` is a lifecycle distinct from `TaskStatus`.
//! - A project may move to `Completed` only through the completion gate.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::progress::ProjectProgress;
use crate::model::ValidationError;

/// Stable identifier for a project.
pub type ProjectId = Uuid;

/// Project lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planning,
    Active,
    OnHold,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Active => "active",
            Self::OnHold => "on_hold",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "planning" => Some(Self::Planning),
            "active" => Some(Self::Active),
            "on_hold" => Some(Self::OnHold),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// Persisted project record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    /// Opaque id of the creating user.
    pub owner_id: Option<String>,
    pub is_deleted: bool,
}

impl Project {
    /// Creates a `planning` project with a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            status: ProjectStatus::Planning,
            owner_id: None,
            is_deleted: false,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyProjectName);
        }
        Ok(())
    }
}

/// Project with its derived task statistics ("project with stats").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub project: Project,
    pub task_count: u32,
    pub progress: ProjectProgress,
}

impl ProjectSummary {
    /// Bundles a project with a freshly computed progress aggregate.
    ///
    /// `task_count` always mirrors `progress.total_tasks`.
    pub fn new(project: Project, progress: ProjectProgress) -> Self {
        Self {
            project,
            task_count: progress.total_tasks,
            progress,
        }
    }
}
