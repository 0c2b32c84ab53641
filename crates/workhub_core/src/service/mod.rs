//! Use-case services composing persistence, progress and gates.
//!
//! # Responsibility
//! - Compute progress aggregates from current task data.
//! - Run the relevant gates immediately before each state-changing action.
//!
//! # Invariants
//! - Progress is recomputed on every call; nothing is cached.
//! - A failed gate is reported as `ActionOutcome::Blocked`, never as an error.
//! - Persistence failures propagate unchanged inside `ServiceError::Repo`.

use crate::gate::requirement::Requirement;
use crate::model::project::ProjectId;
use crate::model::task::TaskId;
use crate::repo::{RepoError, RepoResult};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod progress_service;
pub mod project_service;
pub mod task_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// Target project does not exist or is deleted.
    ProjectNotFound(ProjectId),
    /// Target task does not exist or is deleted.
    TaskNotFound(TaskId),
    /// A project reference could not be parsed as an id.
    InvalidProjectId(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::InvalidProjectId(value) => write!(f, "invalid project id: `{value}`"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Result of a gated action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome<T> {
    /// Every gate passed and the mutation was persisted.
    Applied(T),
    /// A gate failed; nothing was written.
    Blocked(Requirement),
}

impl<T> ActionOutcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::Blocked(_) => None,
        }
    }

    pub fn blocked(&self) -> Option<&Requirement> {
        match self {
            Self::Applied(_) => None,
            Self::Blocked(requirement) => Some(requirement),
        }
    }
}

/// Logs a repository failure with its operation context and passes it on.
pub(crate) fn log_repo_failure<T>(result: RepoResult<T>, event: &str) -> RepoResult<T> {
    if let Err(err) = &result {
        log::error!("event={event} module=service status=error error={err}");
    }
    result
}
