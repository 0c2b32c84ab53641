//! Project use-cases: creation, stats listing and gated completion.

use crate::gate::checks::{
    check_project_can_be_completed, check_role_can_perform_action, check_user_can_create_project,
};
use crate::gate::compose::GateChain;
use crate::gate::permission::Action;
use crate::gate::requirement::RequirementCheck;
use crate::model::project::{Project, ProjectId, ProjectStatus, ProjectSummary};
use crate::model::user::User;
use crate::repo::project_repo::{ProjectListQuery, ProjectRepository};
use crate::repo::task_repo::TaskRepository;
use crate::repo::RepoError;
use crate::service::progress_service::ProgressService;
use crate::service::{log_repo_failure, ActionOutcome, ServiceError, ServiceResult};
use log::{error, info};

pub struct ProjectService<P: ProjectRepository, T: TaskRepository> {
    projects: P,
    progress: ProgressService<T>,
}

impl<P: ProjectRepository, T: TaskRepository> ProjectService<P, T> {
    pub fn new(projects: P, tasks: T) -> Self {
        Self {
            projects,
            progress: ProgressService::new(tasks),
        }
    }

    pub fn progress(&self) -> &ProgressService<T> {
        &self.progress
    }

    /// Creates a `planning` project owned by `actor`.
    ///
    /// Gates, in priority order: completed profile, then role permission.
    pub fn create_project(
        &self,
        actor: &User,
        name: &str,
        description: Option<&str>,
    ) -> ServiceResult<ActionOutcome<ProjectId>> {
        let gate = GateChain::new()
            .check(|| check_user_can_create_project(actor))
            .check(|| check_role_can_perform_action(actor.role, Action::CreateProject));
        if let Some(requirement) = gate.first_failure() {
            info!(
                "event=project_create module=service status=blocked requirement={}",
                requirement.kind.as_str()
            );
            return Ok(ActionOutcome::Blocked(requirement));
        }

        let mut project = Project::new(name.trim());
        project.description = description
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string);
        project.owner_id = Some(actor.id.clone());

        let id = log_repo_failure(self.projects.create_project(&project), "project_create")?;
        info!("event=project_create module=service status=ok project_id={id}");
        Ok(ActionOutcome::Applied(id))
    }

    /// Loads a project and computes its current stats.
    pub fn get_project_summary(&self, id: ProjectId) -> ServiceResult<ProjectSummary> {
        let project = self
            .projects
            .get_project(id, false)?
            .ok_or(ServiceError::ProjectNotFound(id))?;
        let progress = self.progress.calculate_project_progress(id)?;
        Ok(ProjectSummary::new(project, progress))
    }

    /// All visible projects with stats, using one batched progress read.
    pub fn list_projects_with_stats(
        &self,
        query: &ProjectListQuery,
    ) -> ServiceResult<Vec<ProjectSummary>> {
        let projects = log_repo_failure(self.projects.list_projects(query), "project_list")?;
        let ids: Vec<ProjectId> = projects.iter().map(|project| project.id).collect();
        let mut progress = self.progress.calculate_multiple_projects_progress(&ids)?;

        Ok(projects
            .into_iter()
            .map(|project| {
                let stats = progress.remove(&project.id).unwrap_or_default();
                ProjectSummary::new(project, stats)
            })
            .collect())
    }

    /// Evaluates the completion gate without mutating anything.
    pub fn check_completion(&self, id: ProjectId) -> ServiceResult<RequirementCheck> {
        let summary = self.get_project_summary(id)?;
        Ok(check_project_can_be_completed(&summary))
    }

    /// Marks a project `completed` once it has tasks and all are done.
    pub fn complete_project(&self, id: ProjectId) -> ServiceResult<ActionOutcome<ProjectSummary>> {
        let mut summary = self.get_project_summary(id)?;

        if let Some(requirement) = check_project_can_be_completed(&summary).into_failure() {
            info!(
                "event=project_complete module=service status=blocked project_id={id} requirement={} total={} completed={}",
                requirement.kind.as_str(),
                summary.progress.total_tasks,
                summary.progress.completed_tasks
            );
            return Ok(ActionOutcome::Blocked(requirement));
        }

        self.write_status(id, ProjectStatus::Completed)?;
        summary.project.status = ProjectStatus::Completed;
        info!("event=project_complete module=service status=ok project_id={id}");
        Ok(ActionOutcome::Applied(summary))
    }

    /// Moves a project to `status`.
    ///
    /// `Completed` is routed through the completion gate.
    pub fn set_status(
        &self,
        id: ProjectId,
        status: ProjectStatus,
    ) -> ServiceResult<ActionOutcome<()>> {
        if status == ProjectStatus::Completed {
            return Ok(match self.complete_project(id)? {
                ActionOutcome::Applied(_) => ActionOutcome::Applied(()),
                ActionOutcome::Blocked(requirement) => ActionOutcome::Blocked(requirement),
            });
        }
        self.write_status(id, status)?;
        info!(
            "event=project_set_status module=service status=ok project_id={id} project_status={}",
            status.as_str()
        );
        Ok(ActionOutcome::Applied(()))
    }

    fn write_status(&self, id: ProjectId, status: ProjectStatus) -> ServiceResult<()> {
        match self.projects.set_project_status(id, status) {
            Ok(()) => Ok(()),
            Err(RepoError::NotFound(_)) => Err(ServiceError::ProjectNotFound(id)),
            Err(err) => {
                error!(
                    "event=project_set_status module=service status=error project_id={id} error={err}"
                );
                Err(err.into())
            }
        }
    }
}
