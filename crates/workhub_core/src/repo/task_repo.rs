//! Task repository contract and SQLite implementation.

use crate::model::project::ProjectId;
use crate::model::task::{Task, TaskId, TaskStatus};
use crate::repo::{bool_to_int, parse_deleted_flag, parse_uuid, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const TASK_SELECT_SQL: &str = "SELECT
    uuid,
    project_uuid,
    title,
    status,
    assigned_to_id,
    due_date,
    is_deleted
FROM tasks";

/// Upper bound on ids bound into one `IN (...)` list; SQLite caps host parameters per statement.
const STATUS_QUERY_CHUNK: usize = 500;

/// Filter and pagination options for listing tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskListQuery {
    pub project_id: Option<ProjectId>,
    pub status: Option<TaskStatus>,
    pub include_deleted: bool,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Persistence operations over task rows.
pub trait TaskRepository {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId>;
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    fn get_task(&self, id: TaskId, include_deleted: bool) -> RepoResult<Option<Task>>;
    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<Task>>;
    fn soft_delete_task(&self, id: TaskId) -> RepoResult<()>;
    /// Statuses of all active tasks in one project.
    fn list_task_statuses(&self, project_id: ProjectId) -> RepoResult<Vec<TaskStatus>>;
    /// `(project, status)` rows for all active tasks across many projects, in one call.
    ///
    /// Id lists of any length are accepted.
    fn list_task_statuses_for_projects(
        &self,
        project_ids: &[ProjectId],
    ) -> RepoResult<Vec<(ProjectId, TaskStatus)>>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (
                uuid,
                project_uuid,
                title,
                status,
                assigned_to_id,
                due_date,
                is_deleted
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                task.id.to_string(),
                task.project_id.to_string(),
                task.title.as_str(),
                task.status.as_str(),
                task.assigned_to_id.as_deref(),
                task.due_date,
                bool_to_int(task.is_deleted),
            ],
        )?;

        Ok(task.id)
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                project_uuid = ?1,
                title = ?2,
                status = ?3,
                assigned_to_id = ?4,
                due_date = ?5,
                is_deleted = ?6,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?7;",
            params![
                task.project_id.to_string(),
                task.title.as_str(),
                task.status.as_str(),
                task.assigned_to_id.as_deref(),
                task.due_date,
                bool_to_int(task.is_deleted),
                task.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(task.id));
        }
        Ok(())
    }

    fn get_task(&self, id: TaskId, include_deleted: bool) -> RepoResult<Option<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE uuid = ?1
               AND (?2 = 1 OR is_deleted = 0);"
        ))?;

        let mut rows = stmt.query(params![id.to_string(), bool_to_int(include_deleted)])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_task_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<Task>> {
        let mut sql = format!("{TASK_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if !query.include_deleted {
            sql.push_str(" AND is_deleted = 0");
        }
        if let Some(project_id) = query.project_id {
            sql.push_str(" AND project_uuid = ?");
            bind_values.push(Value::Text(project_id.to_string()));
        }
        if let Some(status) = query.status {
            sql.push_str(" AND status = ?");
            bind_values.push(Value::Text(status.as_str().to_string()));
        }

        sql.push_str(" ORDER BY created_at ASC, uuid ASC");

        match (query.limit, query.offset) {
            (Some(limit), offset) => {
                sql.push_str(" LIMIT ? OFFSET ?");
                bind_values.push(Value::Integer(i64::from(limit)));
                bind_values.push(Value::Integer(i64::from(offset)));
            }
            (None, 0) => {}
            (None, offset) => {
                sql.push_str(" LIMIT -1 OFFSET ?");
                bind_values.push(Value::Integer(i64::from(offset)));
            }
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }

    fn soft_delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                is_deleted = 1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn list_task_statuses(&self, project_id: ProjectId) -> RepoResult<Vec<TaskStatus>> {
        let mut stmt = self.conn.prepare(
            "SELECT status FROM tasks
             WHERE project_uuid = ?1 AND is_deleted = 0;",
        )?;

        let mut rows = stmt.query([project_id.to_string()])?;
        let mut statuses = Vec::new();
        while let Some(row) = rows.next()? {
            let value: String = row.get("status")?;
            statuses.push(parse_status(&value)?);
        }
        Ok(statuses)
    }

    fn list_task_statuses_for_projects(
        &self,
        project_ids: &[ProjectId],
    ) -> RepoResult<Vec<(ProjectId, TaskStatus)>> {
        let mut grouped = Vec::new();
        for chunk in project_ids.chunks(STATUS_QUERY_CHUNK) {
            let placeholders = vec!["?"; chunk.len()].join(", ");
            let mut stmt = self.conn.prepare(&format!(
                "SELECT project_uuid, status FROM tasks
                 WHERE is_deleted = 0 AND project_uuid IN ({placeholders});"
            ))?;

            let mut rows = stmt.query(params_from_iter(chunk.iter().map(|id| id.to_string())))?;
            while let Some(row) = rows.next()? {
                let project_text: String = row.get("project_uuid")?;
                let status_text: String = row.get("status")?;
                grouped.push((
                    parse_uuid(&project_text, "tasks.project_uuid")?,
                    parse_status(&status_text)?,
                ));
            }
        }
        Ok(grouped)
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let id_text: String = row.get("uuid")?;
    let project_text: String = row.get("project_uuid")?;
    let status_text: String = row.get("status")?;

    let task = Task {
        id: parse_uuid(&id_text, "tasks.uuid")?,
        project_id: parse_uuid(&project_text, "tasks.project_uuid")?,
        title: row.get("title")?,
        status: parse_status(&status_text)?,
        assigned_to_id: row.get("assigned_to_id")?,
        due_date: row.get("due_date")?,
        is_deleted: parse_deleted_flag(row.get("is_deleted")?, "tasks.is_deleted")?,
    };
    task.validate()?;
    Ok(task)
}

fn parse_status(value: &str) -> RepoResult<TaskStatus> {
    TaskStatus::parse(value).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid task status `{value}` in tasks.status"))
    })
}
