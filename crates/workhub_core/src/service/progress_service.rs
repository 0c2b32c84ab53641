//! Progress calculator over the task store.
//!
//! # Responsibility
//! - Fetch task statuses for one or many projects and tally them.
//!
//! # Invariants
//! - A project with no tasks yields the zero aggregate, not an error.
//! - The bulk call performs one read and returns a key for every input id.
//! - Read failures propagate to the caller without retry.

use crate::model::progress::ProjectProgress;
use crate::model::project::ProjectId;
use crate::model::task::TaskStatus;
use crate::repo::task_repo::TaskRepository;
use crate::repo::RepoResult;
use crate::service::log_repo_failure;
use log::debug;
use std::collections::HashMap;

pub struct ProgressService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> ProgressService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Underlying task repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Computes the progress aggregate for one project from current data.
    pub fn calculate_project_progress(&self, project_id: ProjectId) -> RepoResult<ProjectProgress> {
        let statuses = log_repo_failure(
            self.repo.list_task_statuses(project_id),
            "progress_calculate",
        )?;
        let progress = ProjectProgress::from_statuses(statuses);
        debug!(
            "event=progress_calculate module=service status=ok project_id={project_id} total={} percentage={}",
            progress.total_tasks, progress.progress_percentage
        );
        Ok(progress)
    }

    /// Computes progress for many projects with a single read.
    ///
    /// Every input id is present in the result; ids without tasks map to the
    /// zero aggregate. Duplicate ids collapse into one entry.
    pub fn calculate_multiple_projects_progress(
        &self,
        project_ids: &[ProjectId],
    ) -> RepoResult<HashMap<ProjectId, ProjectProgress>> {
        let mut grouped: HashMap<ProjectId, Vec<TaskStatus>> = project_ids
            .iter()
            .map(|id| (*id, Vec::new()))
            .collect();

        if !project_ids.is_empty() {
            let rows = log_repo_failure(
                self.repo.list_task_statuses_for_projects(project_ids),
                "progress_calculate_batch",
            )?;
            for (project_id, status) in rows {
                if let Some(statuses) = grouped.get_mut(&project_id) {
                    statuses.push(status);
                }
            }
        }

        let progress: HashMap<ProjectId, ProjectProgress> = grouped
            .into_iter()
            .map(|(id, statuses)| (id, ProjectProgress::from_statuses(statuses)))
            .collect();
        debug!(
            "event=progress_calculate_batch module=service status=ok projects={}",
            progress.len()
        );
        Ok(progress)
    }
}
