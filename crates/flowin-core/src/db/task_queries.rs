//! Task CRUD operations and queries.

use jiff::Timestamp;
use log::debug;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, ToSql};

use super::{
    user_queries::record_first_tasks,
    utils::{
        id, minutes, optional_minutes, optional_timestamp, parsed, sql_id, sql_timestamp,
        timestamp,
    },
};
use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{
        should_set_completed_at, validate_transition, Priority, SortOrder, Task, TaskChanges,
        TaskFilter, TaskSort, TaskStatus, TaskSummary,
    },
    params::{CreateTask, FirstTask, DEFAULT_ESTIMATE_MINUTES},
};

const TASK_COLUMNS: &str = "id, user_id, title, description, estimated_duration_minutes, \
     actual_duration_minutes, priority, status, completed_at, created_at, updated_at";

const INSERT_TASK_SQL: &str = "INSERT INTO tasks \
     (user_id, title, description, estimated_duration_minutes, priority, status, created_at, updated_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)";

const UPDATE_TASK_SQL: &str = "UPDATE tasks SET \
     title = COALESCE(?1, title), \
     description = CASE WHEN ?2 IS NULL THEN description ELSE NULLIF(?2, '') END, \
     estimated_duration_minutes = COALESCE(?3, estimated_duration_minutes), \
     priority = COALESCE(?4, priority), \
     status = COALESCE(?5, status), \
     actual_duration_minutes = COALESCE(?6, actual_duration_minutes), \
     completed_at = COALESCE(?7, completed_at), \
     updated_at = ?8 \
     WHERE id = ?9 AND user_id = ?10";

const CANCEL_TASK_SQL: &str =
    "UPDATE tasks SET status = ?1, updated_at = ?2 WHERE id = ?3 AND user_id = ?4";

pub(super) fn build_task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: id(row, 0)?,
        user_id: id(row, 1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        estimated_duration_minutes: minutes(row, 4)?,
        actual_duration_minutes: optional_minutes(row, 5)?,
        priority: parsed(row, 6)?,
        status: parsed(row, 7)?,
        completed_at: optional_timestamp(row, 8)?,
        created_at: timestamp(row, 9)?,
        updated_at: timestamp(row, 10)?,
    })
}

/// Loads a task owned by `user_id`. Tasks of other users are reported as
/// missing.
pub(super) fn select_task(conn: &Connection, user_id: u64, task_id: u64) -> Result<Task> {
    conn.query_row(
        &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1 AND user_id = ?2"),
        params![sql_id(task_id), sql_id(user_id)],
        build_task_from_row,
    )
    .optional()
    .db_context("Failed to query task")?
    .ok_or_else(|| PlannerError::not_found("Task", task_id))
}

/// Ranks priorities so that ascending order runs from low to high.
const PRIORITY_RANK_SQL: &str =
    "CASE priority WHEN 'high' THEN 3 WHEN 'medium' THEN 2 ELSE 1 END";

/// Builds the ORDER BY clause of a listing. Ties are broken by ID so that
/// paging is stable.
fn order_clause(sort_by: TaskSort, sort_order: SortOrder) -> String {
    let column = match sort_by {
        TaskSort::CreatedAt => "created_at",
        TaskSort::UpdatedAt => "updated_at",
        TaskSort::Priority => PRIORITY_RANK_SQL,
        TaskSort::Title => "lower(title)",
    };
    let direction = match sort_order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };
    format!(" ORDER BY {column} {direction}, id {direction}")
}

/// Escapes LIKE wildcards so the search text matches literally.
fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn insert_task(
    conn: &Connection,
    user_id: u64,
    title: &str,
    description: Option<&str>,
    estimated_duration_minutes: u32,
    priority: Priority,
    now: Timestamp,
) -> Result<Task> {
    conn.execute(
        INSERT_TASK_SQL,
        params![
            sql_id(user_id),
            title,
            description,
            estimated_duration_minutes,
            priority.as_str(),
            TaskStatus::Pending.as_str(),
            sql_timestamp(now)
        ],
    )
    .db_context("Failed to insert task")?;

    Ok(Task {
        id: conn.last_insert_rowid() as u64,
        user_id,
        title: title.to_string(),
        description: description.map(String::from),
        estimated_duration_minutes,
        actual_duration_minutes: None,
        priority,
        status: TaskStatus::Pending,
        completed_at: None,
        created_at: now,
        updated_at: now,
    })
}

impl super::Database {
    /// Creates a pending task for the user.
    pub fn create_task(&mut self, user_id: u64, params: &CreateTask) -> Result<Task> {
        insert_task(
            &self.connection,
            user_id,
            &params.title,
            params.description.as_deref(),
            params
                .estimated_duration_minutes
                .unwrap_or(DEFAULT_ESTIMATE_MINUTES),
            params.priority.unwrap_or_default(),
            Timestamp::now(),
        )
    }

    /// Creates the user's first tasks and completes onboarding in one
    /// transaction. Either every task and the onboarding state are saved, or
    /// nothing is.
    pub fn batch_create_tasks(&mut self, user_id: u64, tasks: &[FirstTask]) -> Result<Vec<Task>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let created = tasks
            .iter()
            .map(|task| {
                insert_task(
                    &tx,
                    user_id,
                    &task.title,
                    None,
                    task.estimated_minutes,
                    task.priority,
                    now,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        record_first_tasks(&tx, user_id, now)?;

        tx.commit().db_context("Failed to commit transaction")?;
        debug!("Created {} first tasks for user {user_id}", created.len());
        Ok(created)
    }

    /// Retrieves a task by its ID.
    pub fn get_task(&self, user_id: u64, task_id: u64) -> Result<Task> {
        select_task(&self.connection, user_id, task_id)
    }

    /// Lists the user's tasks matching the filter, ordered and paged.
    pub fn list_tasks(&self, user_id: u64, filter: &TaskFilter) -> Result<Vec<Task>> {
        let mut query = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = ?");
        let mut values: Vec<Box<dyn ToSql>> = vec![Box::new(sql_id(user_id))];

        if let Some(status) = filter.status {
            query.push_str(" AND status = ?");
            values.push(Box::new(status.as_str()));
        }
        if let Some(priority) = filter.priority {
            query.push_str(" AND priority = ?");
            values.push(Box::new(priority.as_str()));
        }
        if let Some(search) = &filter.search {
            query.push_str(" AND (title LIKE ? ESCAPE '\\' OR description LIKE ? ESCAPE '\\')");
            let pattern = like_pattern(search);
            values.push(Box::new(pattern.clone()));
            values.push(Box::new(pattern));
        }

        query.push_str(&order_clause(filter.sort_by, filter.sort_order));
        query.push_str(" LIMIT ? OFFSET ?");
        values.push(Box::new(filter.limit));
        values.push(Box::new(filter.offset));

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;
        let tasks = stmt
            .query_map(
                params_from_iter(values.iter().map(|v| v.as_ref())),
                build_task_from_row,
            )
            .db_context("Failed to query tasks")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read task row")?;
        Ok(tasks)
    }

    /// Every task of the user in creation order, optionally restricted to one
    /// status.
    pub fn all_tasks(&self, user_id: u64, status: Option<TaskStatus>) -> Result<Vec<Task>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {TASK_COLUMNS} FROM tasks \
                 WHERE user_id = ?1 AND (?2 IS NULL OR status = ?2) ORDER BY id ASC"
            ))
            .db_context("Failed to prepare query")?;
        let tasks = stmt
            .query_map(
                params![sql_id(user_id), status.map(|s| s.as_str())],
                build_task_from_row,
            )
            .db_context("Failed to query tasks")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read task row")?;
        Ok(tasks)
    }

    /// Counts the user's tasks per status.
    pub fn task_summary(&self, user_id: u64) -> Result<TaskSummary> {
        let mut stmt = self
            .connection
            .prepare("SELECT status, COUNT(*) FROM tasks WHERE user_id = ?1 GROUP BY status")
            .db_context("Failed to prepare query")?;
        let counts = stmt
            .query_map(params![sql_id(user_id)], |row| {
                Ok((parsed::<TaskStatus>(row, 0)?, minutes(row, 1)?))
            })
            .db_context("Failed to count tasks")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read task count")?;

        Ok(counts
            .into_iter()
            .fold(TaskSummary::default(), |mut summary, (status, count)| {
                summary.add(status, count);
                summary
            }))
    }

    /// Applies a partial update to a task.
    ///
    /// A status change must follow the task lifecycle. Entering `completed`
    /// stamps `completed_at`. An empty description clears it. An empty change
    /// set leaves the row untouched.
    pub fn update_task(&mut self, user_id: u64, task_id: u64, changes: &TaskChanges) -> Result<Task> {
        if changes.is_empty() {
            return select_task(&self.connection, user_id, task_id);
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let current = select_task(&tx, user_id, task_id)?;
        let now = Timestamp::now();

        let completed_at = match changes.status {
            Some(requested) => {
                validate_transition(current.status, requested)?;
                should_set_completed_at(current.status, requested).then(|| sql_timestamp(now))
            }
            None => None,
        };

        tx.execute(
            UPDATE_TASK_SQL,
            params![
                changes.title.as_deref(),
                changes.description.as_deref(),
                changes.estimated_duration_minutes,
                changes.priority.map(|p| p.as_str()),
                changes.status.map(|s| s.as_str()),
                changes.actual_duration_minutes,
                completed_at,
                sql_timestamp(now),
                sql_id(task_id),
                sql_id(user_id)
            ],
        )
        .db_context("Failed to update task")?;

        let task = select_task(&tx, user_id, task_id)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(task)
    }

    /// Soft-deletes a task by moving it to `cancelled`, whatever its current
    /// status.
    pub fn cancel_task(&mut self, user_id: u64, task_id: u64) -> Result<Task> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let rows = tx
            .execute(
                CANCEL_TASK_SQL,
                params![
                    TaskStatus::Cancelled.as_str(),
                    sql_timestamp(Timestamp::now()),
                    sql_id(task_id),
                    sql_id(user_id)
                ],
            )
            .db_context("Failed to cancel task")?;
        if rows == 0 {
            return Err(PlannerError::not_found("Task", task_id));
        }

        let task = select_task(&tx, user_id, task_id)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::{like_pattern, order_clause};
    use crate::models::{SortOrder, TaskSort};

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("report"), "%report%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("snake_case"), "%snake\\_case%");
    }

    #[test]
    fn test_order_clause_breaks_ties_by_id() {
        assert_eq!(
            order_clause(TaskSort::CreatedAt, SortOrder::Desc),
            " ORDER BY created_at DESC, id DESC"
        );
        assert_eq!(
            order_clause(TaskSort::Title, SortOrder::Asc),
            " ORDER BY lower(title) ASC, id ASC"
        );
    }
}
