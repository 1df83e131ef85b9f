//! Reflection operations and queries.

use jiff::Timestamp;
use rusqlite::{ffi, params, Connection, OptionalExtension, Params, Row};

use super::{
    plan_queries::select_plan_header,
    utils::{id, minutes, sql_id, sql_timestamp, timestamp},
};
use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::Reflection,
    params::{CreateReflection, UpdateReflection},
};

const REFLECTION_COLUMNS: &str = "id, user_id, daily_plan_id, completed_tasks_count, \
     total_tasks_count, satisfaction_rating, energy_level, achievements, challenges, learnings, \
     tomorrow_priorities, created_at, updated_at";

const INSERT_REFLECTION_SQL: &str = "INSERT INTO reflections \
     (user_id, daily_plan_id, completed_tasks_count, total_tasks_count, satisfaction_rating, \
     energy_level, achievements, challenges, learnings, tomorrow_priorities, created_at, updated_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)";

const UPDATE_REFLECTION_SQL: &str = "UPDATE reflections SET \
     satisfaction_rating = COALESCE(?1, satisfaction_rating), \
     energy_level = COALESCE(?2, energy_level), \
     achievements = COALESCE(?3, achievements), \
     challenges = COALESCE(?4, challenges), \
     learnings = COALESCE(?5, learnings), \
     tomorrow_priorities = COALESCE(?6, tomorrow_priorities), \
     updated_at = ?7 \
     WHERE id = ?8 AND user_id = ?9";

fn build_reflection_from_row(row: &Row<'_>) -> rusqlite::Result<Reflection> {
    Ok(Reflection {
        id: id(row, 0)?,
        user_id: id(row, 1)?,
        daily_plan_id: id(row, 2)?,
        completed_tasks_count: minutes(row, 3)?,
        total_tasks_count: minutes(row, 4)?,
        satisfaction_rating: row.get(5)?,
        energy_level: row.get(6)?,
        achievements: row.get(7)?,
        challenges: row.get(8)?,
        learnings: row.get(9)?,
        tomorrow_priorities: row.get(10)?,
        created_at: timestamp(row, 11)?,
        updated_at: timestamp(row, 12)?,
    })
}

fn select_reflection(conn: &Connection, user_id: u64, reflection_id: u64) -> Result<Reflection> {
    conn.query_row(
        &format!("SELECT {REFLECTION_COLUMNS} FROM reflections WHERE id = ?1 AND user_id = ?2"),
        params![sql_id(reflection_id), sql_id(user_id)],
        build_reflection_from_row,
    )
    .optional()
    .db_context("Failed to query reflection")?
    .ok_or_else(|| PlannerError::not_found("Reflection", reflection_id))
}

fn select_reflection_by_plan(
    conn: &Connection,
    user_id: u64,
    plan_id: u64,
) -> Result<Option<Reflection>> {
    conn.query_row(
        &format!(
            "SELECT {REFLECTION_COLUMNS} FROM reflections WHERE daily_plan_id = ?1 AND user_id = ?2"
        ),
        params![sql_id(plan_id), sql_id(user_id)],
        build_reflection_from_row,
    )
    .optional()
    .db_context("Failed to query reflection")
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

impl super::Database {
    /// Records the reflection of one of the user's plans. A plan has at most
    /// one reflection.
    pub fn create_reflection(&mut self, user_id: u64, params: &CreateReflection) -> Result<Reflection> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let plan = select_plan_header(&tx, user_id, params.daily_plan_id)?;
        if select_reflection_by_plan(&tx, user_id, plan.id)?.is_some() {
            return Err(PlannerError::DuplicateReflection { plan_id: plan.id });
        }

        tx.execute(
            INSERT_REFLECTION_SQL,
            params![
                sql_id(user_id),
                sql_id(plan.id),
                params.completed_tasks_count,
                params.total_tasks_count,
                params.satisfaction_rating,
                params.energy_level,
                params.achievements.as_deref(),
                params.challenges.as_deref(),
                params.learnings.as_deref(),
                params.tomorrow_priorities.as_deref(),
                sql_timestamp(Timestamp::now())
            ],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                PlannerError::DuplicateReflection { plan_id: plan.id }
            } else {
                PlannerError::database("Failed to insert reflection").with_source(e)
            }
        })?;

        let reflection = select_reflection(&tx, user_id, tx.last_insert_rowid() as u64)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(reflection)
    }

    /// Retrieves the reflection of one of the user's plans, if recorded.
    pub fn get_reflection_by_plan(&self, user_id: u64, plan_id: u64) -> Result<Option<Reflection>> {
        select_plan_header(&self.connection, user_id, plan_id)?;
        select_reflection_by_plan(&self.connection, user_id, plan_id)
    }

    /// Applies a partial update to a reflection.
    pub fn update_reflection(&mut self, user_id: u64, params: &UpdateReflection) -> Result<Reflection> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let rows = tx
            .execute(
                UPDATE_REFLECTION_SQL,
                params![
                    params.satisfaction_rating,
                    params.energy_level,
                    params.achievements.as_deref(),
                    params.challenges.as_deref(),
                    params.learnings.as_deref(),
                    params.tomorrow_priorities.as_deref(),
                    sql_timestamp(Timestamp::now()),
                    sql_id(params.id),
                    sql_id(user_id)
                ],
            )
            .db_context("Failed to update reflection")?;
        if rows == 0 {
            return Err(PlannerError::not_found("Reflection", params.id));
        }

        let reflection = select_reflection(&tx, user_id, params.id)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(reflection)
    }

    /// Every reflection of the user in creation order.
    pub fn all_reflections(&self, user_id: u64) -> Result<Vec<Reflection>> {
        self.query_reflections(
            &format!(
                "SELECT {REFLECTION_COLUMNS} FROM reflections WHERE user_id = ?1 ORDER BY id ASC"
            ),
            params![sql_id(user_id)],
        )
    }

    /// The user's latest `limit` reflections, newest first.
    pub fn recent_reflections(&self, user_id: u64, limit: u32) -> Result<Vec<Reflection>> {
        self.query_reflections(
            &format!(
                "SELECT {REFLECTION_COLUMNS} FROM reflections WHERE user_id = ?1 \
                 ORDER BY created_at DESC, id DESC LIMIT ?2"
            ),
            params![sql_id(user_id), limit],
        )
    }

    fn query_reflections<P: Params>(&self, query: &str, values: P) -> Result<Vec<Reflection>> {
        let mut stmt = self
            .connection
            .prepare(query)
            .db_context("Failed to prepare query")?;
        let reflections = stmt
            .query_map(values, build_reflection_from_row)
            .db_context("Failed to query reflections")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read reflection row")?;
        Ok(reflections)
    }
}
