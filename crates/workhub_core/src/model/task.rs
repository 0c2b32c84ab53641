//! Task domain model.
//!
//! # Responsibility
//! - Define the task record and its four-state workflow status.
//! - Provide adjacent-transition helpers used by status controls.
//!
//! # Invariants
//! - `TaskStatus` has exactly four members, ordered by workflow progression.
//! - Any status may be set directly; adjacency is a UI affordance only.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::project::ProjectId;
use crate::model::ValidationError;

/// Stable identifier for a task.
pub type TaskId = Uuid;

/// Workflow state of a task, ordered `NotStarted < InProgress < NeedsReview < Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    NeedsReview,
    Done,
}

impl TaskStatus {
    /// All statuses in workflow order.
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::NotStarted,
        TaskStatus::InProgress,
        TaskStatus::NeedsReview,
        TaskStatus::Done,
    ];

    /// Stable storage/wire string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::NeedsReview => "needs_review",
            Self::Done => "done",
        }
    }

    /// Parses the stable string form. Unknown values return `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "not_started" => Some(Self::NotStarted),
            "in_progress" => Some(Self::InProgress),
            "needs_review" => Some(Self::NeedsReview),
            "done" => Some(Self::Done),
            _ => None,
        }
    }

    /// Forward adjacent status, or `None` from `Done`.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::NotStarted => Some(Self::InProgress),
            Self::InProgress => Some(Self::NeedsReview),
            Self::NeedsReview => Some(Self::Done),
            Self::Done => None,
        }
    }

    /// Backward adjacent status, or `None` from `NotStarted`.
    pub fn previous(self) -> Option<Self> {
        match self {
            Self::NotStarted => None,
            Self::InProgress => Some(Self::NotStarted),
            Self::NeedsReview => Some(Self::InProgress),
            Self::Done => Some(Self::NeedsReview),
        }
    }

    pub fn is_done(self) -> bool {
        self == Self::Done
    }
}

/// Task record as seen by the progress and gating core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub title: String,
    pub status: TaskStatus,
    /// Opaque user id supplied by the external auth provider.
    pub assigned_to_id: Option<String>,
    /// Unix epoch milliseconds.
    pub due_date: Option<i64>,
    pub is_deleted: bool,
}

impl Task {
    /// Creates an unassigned `not_started` task with a generated id.
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            title: title.into(),
            status: TaskStatus::NotStarted,
            assigned_to_id: None,
            due_date: None,
            is_deleted: false,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTaskTitle);
        }
        Ok(())
    }

    /// Whether an assignee is present and non-blank.
    pub fn has_assignee(&self) -> bool {
        self.assigned_to_id
            .as_deref()
            .is_some_and(|value| !value.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::TaskStatus;

    #[test]
    fn statuses_are_ordered_by_workflow() {
        let mut shuffled = vec![
            TaskStatus::Done,
            TaskStatus::NotStarted,
            TaskStatus::NeedsReview,
            TaskStatus::InProgress,
        ];
        shuffled.sort();
        assert_eq!(shuffled, TaskStatus::ALL.to_vec());
    }

    #[test]
    fn string_form_parses_back() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TaskStatus::parse("todo"), None);
        assert_eq!(TaskStatus::parse("Done"), None);
    }

    #[test]
    fn adjacent_transitions_stop_at_the_ends() {
        assert_eq!(TaskStatus::NotStarted.previous(), None);
        assert_eq!(TaskStatus::Done.next(), None);
        assert_eq!(
            TaskStatus::InProgress.next(),
            Some(TaskStatus::NeedsReview)
        );
        assert_eq!(TaskStatus::Done.previous(), Some(TaskStatus::NeedsReview));
    }
}
