use rusqlite::Connection;
use uuid::Uuid;
use workhub_core::db::open_db_in_memory;
use workhub_core::{
    ActionOutcome, ProjectListQuery, ProjectService, ProjectStatus, RequirementType, Role,
    ServiceError, SqliteProjectRepository, SqliteTaskRepository, TaskService, TaskStatus, User,
};

type Projects<'c> = ProjectService<SqliteProjectRepository<'c>, SqliteTaskRepository<'c>>;
type Tasks<'c> = TaskService<SqliteTaskRepository<'c>, SqliteProjectRepository<'c>>;

fn services(conn: &Connection) -> (Projects<'_>, Tasks<'_>) {
    (
        ProjectService::new(
            SqliteProjectRepository::new(conn),
            SqliteTaskRepository::new(conn),
        ),
        TaskService::new(
            SqliteTaskRepository::new(conn),
            SqliteProjectRepository::new(conn),
        ),
    )
}

fn admin() -> User {
    User::new("u-admin", Some("Grace"), Role::Admin)
}

fn blocked_kind<T>(outcome: &ActionOutcome<T>) -> Option<RequirementType> {
    outcome.blocked().map(|requirement| requirement.kind)
}

#[test]
fn four_task_project_cannot_be_completed_until_all_done() {
    let conn = open_db_in_memory().unwrap();
    let (projects, tasks) = services(&conn);
    let project_id = projects
        .create_project(&admin(), "Launch", None)
        .unwrap()
        .applied()
        .unwrap();

    let mut task_ids = Vec::new();
    for title in ["a", "b", "c", "d"] {
        let outcome = tasks
            .create_task(Some(&project_id.to_string()), title)
            .unwrap();
        let task_id = outcome.applied().unwrap();
        tasks.assign_task(task_id, Some("u-dev")).unwrap();
        task_ids.push(task_id);
    }
    assert!(tasks
        .set_status(task_ids[0], TaskStatus::Done)
        .unwrap()
        .is_applied());
    tasks.set_status(task_ids[1], TaskStatus::InProgress).unwrap();
    tasks.set_status(task_ids[2], TaskStatus::NeedsReview).unwrap();

    let summary = projects.get_project_summary(project_id).unwrap();
    assert_eq!(summary.task_count, 4);
    assert_eq!(summary.progress.completed_tasks, 1);
    assert_eq!(summary.progress.in_progress_tasks, 1);
    assert_eq!(summary.progress.needs_review_tasks, 1);
    assert_eq!(summary.progress.not_started_tasks, 1);
    assert_eq!(summary.progress.progress_percentage, 25);
    assert!(!summary.progress.is_complete);

    let outcome = projects.complete_project(project_id).unwrap();
    assert_eq!(blocked_kind(&outcome), Some(RequirementType::AllTasksCompleted));
    assert_eq!(
        outcome.blocked().and_then(|r| r.help_text.as_deref()),
        Some("3 tasks are still not done.")
    );

    for id in &task_ids {
        assert!(tasks.set_status(*id, TaskStatus::Done).unwrap().is_applied());
    }
    let completed = projects
        .complete_project(project_id)
        .unwrap()
        .applied()
        .expect("all tasks done");
    assert_eq!(completed.project.status, ProjectStatus::Completed);
    assert!(completed.progress.is_complete);

    let stored = projects.get_project_summary(project_id).unwrap();
    assert_eq!(stored.project.status, ProjectStatus::Completed);
}

#[test]
fn empty_project_reports_missing_tasks_before_completion() {
    let conn = open_db_in_memory().unwrap();
    let (projects, _) = services(&conn);
    let project_id = projects
        .create_project(&admin(), "Empty", Some("nothing yet"))
        .unwrap()
        .applied()
        .unwrap();

    let check = projects.check_completion(project_id).unwrap();
    assert_eq!(
        check.failure().map(|r| r.kind),
        Some(RequirementType::ProjectHasTasks)
    );
    let outcome = projects.complete_project(project_id).unwrap();
    assert_eq!(blocked_kind(&outcome), Some(RequirementType::ProjectHasTasks));

    let stored = projects.get_project_summary(project_id).unwrap();
    assert_eq!(stored.project.status, ProjectStatus::Planning);
}

#[test]
fn setting_completed_status_goes_through_the_gate() {
    let conn = open_db_in_memory().unwrap();
    let (projects, _) = services(&conn);
    let project_id = projects
        .create_project(&admin(), "Gated", None)
        .unwrap()
        .applied()
        .unwrap();

    projects
        .set_status(project_id, ProjectStatus::Active)
        .unwrap()
        .applied()
        .unwrap();
    let outcome = projects
        .set_status(project_id, ProjectStatus::Completed)
        .unwrap();
    assert_eq!(blocked_kind(&outcome), Some(RequirementType::ProjectHasTasks));
    assert_eq!(
        projects.get_project_summary(project_id).unwrap().project.status,
        ProjectStatus::Active
    );
}

#[test]
fn project_creation_checks_profile_before_role() {
    let conn = open_db_in_memory().unwrap();
    let (projects, _) = services(&conn);

    let nameless_client = User::new("u1", None, Role::Client);
    let outcome = projects
        .create_project(&nameless_client, "Nope", None)
        .unwrap();
    assert_eq!(blocked_kind(&outcome), Some(RequirementType::UserHasProfile));

    let named_client = User::new("u1", Some("Cli"), Role::Client);
    let outcome = projects.create_project(&named_client, "Nope", None).unwrap();
    assert_eq!(blocked_kind(&outcome), Some(RequirementType::RoleHasPermission));

    let member = User::new("u2", Some("Tem"), Role::TeamMember);
    assert!(projects
        .create_project(&member, "Yes", None)
        .unwrap()
        .is_applied());

    let listed = projects
        .list_projects_with_stats(&ProjectListQuery::default())
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].project.owner_id.as_deref(), Some("u2"));
}

#[test]
fn list_with_stats_covers_projects_without_tasks() {
    let conn = open_db_in_memory().unwrap();
    let (projects, tasks) = services(&conn);
    let busy = projects
        .create_project(&admin(), "Busy", None)
        .unwrap()
        .applied()
        .unwrap();
    let idle = projects
        .create_project(&admin(), "Idle", None)
        .unwrap()
        .applied()
        .unwrap();
    let task_id = tasks
        .create_task(Some(&busy.to_string()), "only")
        .unwrap()
        .applied()
        .unwrap();
    tasks.assign_task(task_id, Some("u-dev")).unwrap();
    assert!(tasks.complete_task(task_id).unwrap().is_applied());

    let listed = projects
        .list_projects_with_stats(&ProjectListQuery::default())
        .unwrap();
    assert_eq!(listed.len(), 2);
    let busy_stats = listed.iter().find(|s| s.project.id == busy).unwrap();
    let idle_stats = listed.iter().find(|s| s.project.id == idle).unwrap();
    assert!(busy_stats.progress.is_complete);
    assert_eq!(idle_stats.task_count, 0);
    assert_eq!(idle_stats.progress.progress_percentage, 0);
}

#[test]
fn task_creation_requires_a_selected_existing_project() {
    let conn = open_db_in_memory().unwrap();
    let (_, tasks) = services(&conn);

    let outcome = tasks.create_task(None, "floating").unwrap();
    assert_eq!(
        blocked_kind(&outcome),
        Some(RequirementType::ProjectHasOrganization)
    );
    let outcome = tasks.create_task(Some(""), "floating").unwrap();
    assert_eq!(
        outcome.blocked().map(|r| r.message.as_str()),
        Some("Please select a project first")
    );

    assert!(matches!(
        tasks.create_task(Some("not-a-uuid"), "bad"),
        Err(ServiceError::InvalidProjectId(_))
    ));
    let missing = Uuid::new_v4();
    assert!(matches!(
        tasks.create_task(Some(&missing.to_string()), "orphan"),
        Err(ServiceError::ProjectNotFound(id)) if id == missing
    ));
}

#[test]
fn task_completion_requires_an_assignee() {
    let conn = open_db_in_memory().unwrap();
    let (projects, tasks) = services(&conn);
    let project_id = projects
        .create_project(&admin(), "Work", None)
        .unwrap()
        .applied()
        .unwrap();
    let task_id = tasks
        .create_task(Some(&project_id.to_string()), "write")
        .unwrap()
        .applied()
        .unwrap();

    let outcome = tasks.complete_task(task_id).unwrap();
    assert_eq!(blocked_kind(&outcome), Some(RequirementType::TaskHasAssignee));
    assert_eq!(tasks.get_task(task_id).unwrap().status, TaskStatus::NotStarted);

    tasks.assign_task(task_id, Some("   ")).unwrap();
    assert!(!tasks.complete_task(task_id).unwrap().is_applied());

    tasks.assign_task(task_id, Some("u1")).unwrap();
    let done = tasks.complete_task(task_id).unwrap().applied().unwrap();
    assert_eq!(done.status, TaskStatus::Done);
    assert_eq!(done.assigned_to_id.as_deref(), Some("u1"));
}

#[test]
fn adjacent_transitions_walk_the_workflow() {
    let conn = open_db_in_memory().unwrap();
    let (projects, tasks) = services(&conn);
    let project_id = projects
        .create_project(&admin(), "Flow", None)
        .unwrap()
        .applied()
        .unwrap();
    let task_id = tasks
        .create_task(Some(&project_id.to_string()), "step")
        .unwrap()
        .applied()
        .unwrap();
    tasks.assign_task(task_id, Some("u-dev")).unwrap();

    assert_eq!(
        tasks.revert_status(task_id).unwrap().applied().unwrap().status,
        TaskStatus::NotStarted
    );
    let mut seen = Vec::new();
    for _ in 0..4 {
        let task = tasks.advance_status(task_id).unwrap().applied().unwrap();
        seen.push(task.status);
    }
    assert_eq!(
        seen,
        vec![
            TaskStatus::InProgress,
            TaskStatus::NeedsReview,
            TaskStatus::Done,
            TaskStatus::Done,
        ]
    );
    assert_eq!(
        tasks.revert_status(task_id).unwrap().applied().unwrap().status,
        TaskStatus::NeedsReview
    );
    tasks.set_status(task_id, TaskStatus::NotStarted).unwrap();
    assert_eq!(tasks.get_task(task_id).unwrap().status, TaskStatus::NotStarted);
}

#[test]
fn unassigned_task_cannot_reach_done_by_any_path() {
    let conn = open_db_in_memory().unwrap();
    let (projects, tasks) = services(&conn);
    let project_id = projects
        .create_project(&admin(), "Shortcut", None)
        .unwrap()
        .applied()
        .unwrap();
    let task_id = tasks
        .create_task(Some(&project_id.to_string()), "unowned")
        .unwrap()
        .applied()
        .unwrap();

    let outcome = tasks.complete_task(task_id).unwrap();
    assert_eq!(blocked_kind(&outcome), Some(RequirementType::TaskHasAssignee));

    for _ in 0..2 {
        assert!(tasks.advance_status(task_id).unwrap().is_applied());
    }
    assert_eq!(tasks.get_task(task_id).unwrap().status, TaskStatus::NeedsReview);
    let outcome = tasks.advance_status(task_id).unwrap();
    assert_eq!(blocked_kind(&outcome), Some(RequirementType::TaskHasAssignee));
    assert_eq!(tasks.get_task(task_id).unwrap().status, TaskStatus::NeedsReview);

    let outcome = tasks.set_status(task_id, TaskStatus::Done).unwrap();
    assert_eq!(blocked_kind(&outcome), Some(RequirementType::TaskHasAssignee));
    let stored = tasks.get_task(task_id).unwrap();
    assert_eq!(stored.status, TaskStatus::NeedsReview);
    assert_eq!(stored.assigned_to_id, None);

    let outcome = projects.complete_project(project_id).unwrap();
    assert_eq!(blocked_kind(&outcome), Some(RequirementType::AllTasksCompleted));
    assert_eq!(
        projects.get_project_summary(project_id).unwrap().project.status,
        ProjectStatus::Planning
    );

    tasks.assign_task(task_id, Some("u1")).unwrap();
    let done = tasks.advance_status(task_id).unwrap().applied().unwrap();
    assert_eq!(done.status, TaskStatus::Done);
}

#[test]
fn task_deletion_is_role_gated_and_soft() {
    let conn = open_db_in_memory().unwrap();
    let (projects, tasks) = services(&conn);
    let project_id = projects
        .create_project(&admin(), "Cleanup", None)
        .unwrap()
        .applied()
        .unwrap();
    let task_id = tasks
        .create_task(Some(&project_id.to_string()), "obsolete")
        .unwrap()
        .applied()
        .unwrap();

    let client = User::new("c1", Some("Client"), Role::Client);
    let outcome = tasks.delete_task(&client, task_id).unwrap();
    assert_eq!(blocked_kind(&outcome), Some(RequirementType::RoleHasPermission));
    assert_eq!(tasks.list_project_tasks(project_id).unwrap().len(), 1);

    let member = User::new("m1", Some("Member"), Role::TeamMember);
    assert!(tasks.delete_task(&member, task_id).unwrap().is_applied());
    assert!(tasks.list_project_tasks(project_id).unwrap().is_empty());
    assert!(matches!(
        tasks.get_task(task_id),
        Err(ServiceError::TaskNotFound(id)) if id == task_id
    ));
    assert_eq!(
        projects
            .get_project_summary(project_id)
            .unwrap()
            .progress
            .total_tasks,
        0
    );
}

#[test]
fn due_dates_can_be_set_and_cleared() {
    let conn = open_db_in_memory().unwrap();
    let (projects, tasks) = services(&conn);
    let project_id = projects
        .create_project(&admin(), "Dates", None)
        .unwrap()
        .applied()
        .unwrap();
    let task_id = tasks
        .create_task(Some(&project_id.to_string()), "deadline")
        .unwrap()
        .applied()
        .unwrap();

    let task = tasks.set_due_date(task_id, Some(1_767_225_600_000)).unwrap();
    assert_eq!(task.due_date, Some(1_767_225_600_000));
    assert!(workhub_core::check_task_has_due_date(&task).passed());

    let task = tasks.set_due_date(task_id, None).unwrap();
    assert!(!workhub_core::check_task_has_due_date(&task).passed());
}

#[test]
fn missing_project_summary_is_an_error() {
    let conn = open_db_in_memory().unwrap();
    let (projects, _) = services(&conn);
    let missing = Uuid::new_v4();
    assert!(matches!(
        projects.get_project_summary(missing),
        Err(ServiceError::ProjectNotFound(id)) if id == missing
    ));
    assert!(matches!(
        projects.set_status(missing, ProjectStatus::OnHold),
        Err(ServiceError::ProjectNotFound(_))
    ));
}
