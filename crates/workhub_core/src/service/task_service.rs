//! Task use-cases: gated creation, completion and deletion plus edits.
//!
//! Status may be set directly; `advance_status` and `revert_status` offer
//! the adjacent transitions status controls expose. Every path into `done`
//! runs the assignee gate.

use crate::gate::checks::{
    check_role_can_perform_action, check_task_can_be_completed, check_task_can_be_created,
};
use crate::gate::permission::Action;
use crate::model::project::ProjectId;
use crate::model::task::{Task, TaskId, TaskStatus};
use crate::model::user::User;
use crate::repo::project_repo::ProjectRepository;
use crate::repo::task_repo::{TaskListQuery, TaskRepository};
use crate::service::{log_repo_failure, ActionOutcome, ServiceError, ServiceResult};
use log::{debug, info};
use uuid::Uuid;

pub struct TaskService<T: TaskRepository, P: ProjectRepository> {
    tasks: T,
    projects: P,
}

impl<T: TaskRepository, P: ProjectRepository> TaskService<T, P> {
    pub fn new(tasks: T, projects: P) -> Self {
        Self { tasks, projects }
    }

    /// Creates a `not_started` task in the selected project.
    ///
    /// `project_id` is the raw selection from the caller; a missing or blank
    /// selection is a gate failure, an unparsable one is an error.
    pub fn create_task(
        &self,
        project_id: Option<&str>,
        title: &str,
    ) -> ServiceResult<ActionOutcome<TaskId>> {
        if let Some(requirement) = check_task_can_be_created(project_id).into_failure() {
            info!(
                "event=task_create module=service status=blocked requirement={}",
                requirement.kind.as_str()
            );
            return Ok(ActionOutcome::Blocked(requirement));
        }

        let raw = project_id.unwrap_or_default().trim();
        let project_id: ProjectId =
            Uuid::parse_str(raw).map_err(|_| ServiceError::InvalidProjectId(raw.to_string()))?;
        if self.projects.get_project(project_id, false)?.is_none() {
            return Err(ServiceError::ProjectNotFound(project_id));
        }

        let task = Task::new(project_id, title.trim());
        let id = log_repo_failure(self.tasks.create_task(&task), "task_create")?;
        info!("event=task_create module=service status=ok task_id={id} project_id={project_id}");
        Ok(ActionOutcome::Applied(id))
    }

    pub fn get_task(&self, id: TaskId) -> ServiceResult<Task> {
        self.tasks
            .get_task(id, false)?
            .ok_or(ServiceError::TaskNotFound(id))
    }

    pub fn list_project_tasks(&self, project_id: ProjectId) -> ServiceResult<Vec<Task>> {
        let query = TaskListQuery {
            project_id: Some(project_id),
            ..TaskListQuery::default()
        };
        log_repo_failure(self.tasks.list_tasks(&query), "task_list").map_err(ServiceError::from)
    }

    /// Marks a task `done` once it has an assignee.
    pub fn complete_task(&self, id: TaskId) -> ServiceResult<ActionOutcome<Task>> {
        self.set_status(id, TaskStatus::Done)
    }

    /// Sets any status directly. Moving into `done` is gated like
    /// `complete_task`; other moves are not restricted.
    pub fn set_status(
        &self,
        id: TaskId,
        status: TaskStatus,
    ) -> ServiceResult<ActionOutcome<Task>> {
        let task = self.get_task(id)?;
        self.apply_status(task, status)
    }

    /// Moves one step forward; a `done` task is returned unchanged.
    pub fn advance_status(&self, id: TaskId) -> ServiceResult<ActionOutcome<Task>> {
        self.step_status(id, TaskStatus::next)
    }

    /// Moves one step back; a `not_started` task is returned unchanged.
    pub fn revert_status(&self, id: TaskId) -> ServiceResult<ActionOutcome<Task>> {
        self.step_status(id, TaskStatus::previous)
    }

    /// Sets or clears the assignee. Blank ids clear it.
    pub fn assign_task(&self, id: TaskId, assignee: Option<&str>) -> ServiceResult<Task> {
        let mut task = self.get_task(id)?;
        task.assigned_to_id = assignee
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        self.save(&task, "task_assign")?;
        Ok(task)
    }

    /// Sets or clears the due date (epoch milliseconds).
    pub fn set_due_date(&self, id: TaskId, due_date: Option<i64>) -> ServiceResult<Task> {
        let mut task = self.get_task(id)?;
        task.due_date = due_date;
        self.save(&task, "task_set_due_date")?;
        Ok(task)
    }

    /// Soft-deletes a task when the actor's role permits it.
    pub fn delete_task(&self, actor: &User, id: TaskId) -> ServiceResult<ActionOutcome<()>> {
        let check = check_role_can_perform_action(actor.role, Action::DeleteTask);
        if let Some(requirement) = check.into_failure() {
            info!(
                "event=task_delete module=service status=blocked task_id={id} role={}",
                actor.role.as_str()
            );
            return Ok(ActionOutcome::Blocked(requirement));
        }

        self.get_task(id)?;
        log_repo_failure(self.tasks.soft_delete_task(id), "task_delete")?;
        info!("event=task_delete module=service status=ok task_id={id}");
        Ok(ActionOutcome::Applied(()))
    }

    fn apply_status(
        &self,
        mut task: Task,
        status: TaskStatus,
    ) -> ServiceResult<ActionOutcome<Task>> {
        if task.status == status {
            return Ok(ActionOutcome::Applied(task));
        }

        if status.is_done() {
            if let Some(requirement) = check_task_can_be_completed(&task).into_failure() {
                info!(
                    "event=task_complete module=service status=blocked task_id={} requirement={}",
                    task.id,
                    requirement.kind.as_str()
                );
                return Ok(ActionOutcome::Blocked(requirement));
            }
        }

        task.status = status;
        let event = if status.is_done() {
            "task_complete"
        } else {
            "task_set_status"
        };
        self.save(&task, event)?;
        Ok(ActionOutcome::Applied(task))
    }

    fn step_status(
        &self,
        id: TaskId,
        step: fn(TaskStatus) -> Option<TaskStatus>,
    ) -> ServiceResult<ActionOutcome<Task>> {
        let task = self.get_task(id)?;
        match step(task.status) {
            Some(status) => self.apply_status(task, status),
            None => {
                debug!(
                    "event=task_step_status module=service status=noop task_id={id} task_status={}",
                    task.status.as_str()
                );
                Ok(ActionOutcome::Applied(task))
            }
        }
    }

    fn save(&self, task: &Task, event: &str) -> ServiceResult<()> {
        log_repo_failure(self.tasks.update_task(task), event)?;
        debug!(
            "event={event} module=service status=ok task_id={} task_status={}",
            task.id,
            task.status.as_str()
        );
        Ok(())
    }
}
