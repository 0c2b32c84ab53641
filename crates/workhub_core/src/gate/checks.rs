//! Precondition predicates.
//!
//! Each function inspects one entity and returns a `RequirementCheck`.
//! Inputs are assumed well-shaped; only the inspected field is examined.

use crate::gate::permission::{role_allows, Action};
use crate::gate::requirement::{Requirement, RequirementCheck, RequirementType};
use crate::model::file::FileRecord;
use crate::model::project::{Project, ProjectSummary};
use crate::model::task::Task;
use crate::model::user::{Role, User};

/// Settings page offered when a profile is incomplete.
pub const PROFILE_SETTINGS_URL: &str = "/settings/profile";

/// A project may be completed once it has tasks and all of them are done.
///
/// Task existence is checked first, so an empty project always reports
/// `ProjectHasTasks` and never `AllTasksCompleted`.
pub fn check_project_can_be_completed(project: &ProjectSummary) -> RequirementCheck {
    let project_id = project.project.id;

    if project.task_count == 0 {
        return RequirementCheck::fail(
            Requirement::new(
                RequirementType::ProjectHasTasks,
                "Project must have at least one task",
            )
            .with_help("Add tasks to this project before marking it complete.")
            .with_action("Add a task")
            .with_action_url(format!("/projects/{project_id}/tasks/new")),
        );
    }

    let remaining = project
        .task_count
        .saturating_sub(project.progress.completed_tasks);
    // Rounding can show 100% with one task left on very large projects.
    if project.progress.progress_percentage < 100 || remaining > 0 {
        return RequirementCheck::fail(
            Requirement::new(
                RequirementType::AllTasksCompleted,
                "All tasks must be completed",
            )
            .with_help(format!(
                "{remaining} {} still not done.",
                if remaining == 1 { "task is" } else { "tasks are" }
            ))
            .with_action("View tasks")
            .with_action_url(format!("/projects/{project_id}/tasks")),
        );
    }

    RequirementCheck::pass()
}

/// A task can only be created inside a selected project.
pub fn check_task_can_be_created(project_id: Option<&str>) -> RequirementCheck {
    if is_blank(project_id) {
        return RequirementCheck::fail(
            Requirement::new(
                RequirementType::ProjectHasOrganization,
                "Please select a project first",
            )
            .with_help("Tasks always belong to a project."),
        );
    }
    RequirementCheck::pass()
}

/// A task can only be marked done once someone is assigned.
pub fn check_task_can_be_completed(task: &Task) -> RequirementCheck {
    if !task.has_assignee() {
        return RequirementCheck::fail(
            Requirement::new(
                RequirementType::TaskHasAssignee,
                "Task must be assigned to someone",
            )
            .with_help("Assign the task before marking it done.")
            .with_action("Assign task")
            .with_action_url(format!("/tasks/{}", task.id)),
        );
    }
    RequirementCheck::pass()
}

pub fn check_task_has_due_date(task: &Task) -> RequirementCheck {
    if task.due_date.is_none() {
        return RequirementCheck::fail(
            Requirement::new(RequirementType::TaskHasDueDate, "Task must have a due date")
                .with_help("Set a due date so the task can be scheduled.")
                .with_action("Set due date")
                .with_action_url(format!("/tasks/{}", task.id)),
        );
    }
    RequirementCheck::pass()
}

/// Files are shared only with a non-blank description.
pub fn check_file_can_be_shared(file: &FileRecord) -> RequirementCheck {
    if is_blank(file.description.as_deref()) {
        return RequirementCheck::fail(
            Requirement::new(
                RequirementType::FileHasDescription,
                "File must have a description",
            )
            .with_help("Describe the file so others know what it contains.")
            .with_action("Add description"),
        );
    }
    RequirementCheck::pass()
}

pub fn check_project_has_description(project: &Project) -> RequirementCheck {
    if is_blank(project.description.as_deref()) {
        return RequirementCheck::fail(
            Requirement::new(
                RequirementType::ProjectHasDescription,
                "Project must have a description",
            )
            .with_help("Summarize the goal of the project for the team.")
            .with_action("Edit project")
            .with_action_url(format!("/projects/{}/edit", project.id)),
        );
    }
    RequirementCheck::pass()
}

/// Creating a project requires a completed profile (a non-blank name).
pub fn check_user_can_create_project(user: &User) -> RequirementCheck {
    if is_blank(user.name.as_deref()) {
        return RequirementCheck::fail(
            Requirement::new(
                RequirementType::UserHasProfile,
                "Please complete your profile first",
            )
            .with_help("Add your name before creating projects.")
            .with_action("Complete profile")
            .with_action_url(PROFILE_SETTINGS_URL),
        );
    }
    RequirementCheck::pass()
}

pub fn check_role_can_perform_action(role: Role, action: Action) -> RequirementCheck {
    if role_allows(role, action) {
        return RequirementCheck::pass();
    }
    RequirementCheck::fail(
        Requirement::new(RequirementType::RoleHasPermission, action.denial_message()).with_help(
            format!(
                "The `{}` role cannot perform `{}`. Ask an administrator for access.",
                role.as_str(),
                action.as_str()
            ),
        ),
    )
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |text| text.trim().is_empty())
}
