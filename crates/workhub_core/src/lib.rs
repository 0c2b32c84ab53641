//! Project progress and action-gating core for workhub.
//! This crate is the single source of truth for completion and gating invariants.

pub mod db;
pub mod gate;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use gate::binding::{
    present, present_requirement, present_scene, GatePresentation, GateStyle, Remedy,
    RequirementPanel, SceneMode,
};
pub use gate::checks::{
    check_file_can_be_shared, check_project_can_be_completed, check_project_has_description,
    check_role_can_perform_action, check_task_can_be_completed, check_task_can_be_created,
    check_task_has_due_date, check_user_can_create_project,
};
pub use gate::compose::{
    check_multiple_requirements, failed_requirements, get_first_failed_requirement,
    DeferredCheck, GateChain,
};
pub use gate::permission::{allowed_actions, parse_action, role_allows, Action, ActionParseError};
pub use gate::requirement::{Requirement, RequirementCheck, RequirementType};
pub use logging::{init_logging, logging_status, LogLevel, LoggingConfig, LoggingError};
pub use model::file::FileRecord;
pub use model::progress::ProjectProgress;
pub use model::project::{Project, ProjectId, ProjectStatus, ProjectSummary};
pub use model::task::{Task, TaskId, TaskStatus};
pub use model::user::{Role, User};
pub use model::ValidationError;
pub use repo::project_repo::{ProjectListQuery, ProjectRepository, SqliteProjectRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskListQuery, TaskRepository};
pub use repo::{RepoError, RepoResult};
pub use service::progress_service::ProgressService;
pub use service::project_service::ProjectService;
pub use service::task_service::TaskService;
pub use service::{ActionOutcome, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
