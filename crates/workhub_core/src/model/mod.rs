//! Domain model for projects, tasks and the records gates inspect.
//!
//! # Responsibility
//! - Define canonical data structures used by progress and gating logic.
//! - Keep status vocabularies closed so every match stays exhaustive.
//!
//! # Invariants
//! - Projects and tasks are identified by stable UUIDs.
//! - Deletion is a soft-delete flag, never a physical row removal.
//! - `ProjectProgress` is derived on demand and never persisted.

pub mod file;
pub mod progress;
pub mod project;
pub mod task;
pub mod user;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Record-level validation failures checked before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyTaskTitle,
    EmptyProjectName,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTaskTitle => write!(f, "task title must not be empty"),
            Self::EmptyProjectName => write!(f, "project name must not be empty"),
        }
    }
}

impl Error for ValidationError {}
