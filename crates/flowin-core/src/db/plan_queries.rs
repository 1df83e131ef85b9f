//! Daily plan operations and queries.

use jiff::{civil::Date, Timestamp};
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Row, ToSql};

use super::{
    block_queries::select_blocks,
    utils::{date, id, minutes, optional_timestamp, sql_id, sql_timestamp, timestamp},
};
use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{DailyPlan, DateWindow},
    schedule::calculate_available_minutes,
};

const PLAN_COLUMNS: &str = "id, user_id, plan_date, total_planned_minutes, work_start_time, \
     work_end_time, is_finalized, finalized_at, created_at, updated_at";

const INSERT_PLAN_SQL: &str = "INSERT INTO daily_plans \
     (user_id, plan_date, work_start_time, work_end_time, created_at, updated_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?5) \
     ON CONFLICT(user_id, plan_date) DO NOTHING";

const UPDATE_PLAN_HOURS_SQL: &str = "UPDATE daily_plans \
     SET work_start_time = ?1, work_end_time = ?2, updated_at = ?3 \
     WHERE id = ?4 AND user_id = ?5";

const FINALIZE_PLAN_SQL: &str = "UPDATE daily_plans \
     SET is_finalized = 1, finalized_at = ?1, updated_at = ?1 \
     WHERE id = ?2 AND user_id = ?3 AND is_finalized = 0";

const UPDATE_PLAN_TOTAL_SQL: &str =
    "UPDATE daily_plans SET total_planned_minutes = ?1, updated_at = ?2 WHERE id = ?3";

fn build_plan_from_row(row: &Row<'_>) -> rusqlite::Result<DailyPlan> {
    Ok(DailyPlan {
        id: id(row, 0)?,
        user_id: id(row, 1)?,
        plan_date: date(row, 2)?,
        total_planned_minutes: minutes(row, 3)?,
        work_start_time: row.get(4)?,
        work_end_time: row.get(5)?,
        is_finalized: row.get(6)?,
        finalized_at: optional_timestamp(row, 7)?,
        created_at: timestamp(row, 8)?,
        updated_at: timestamp(row, 9)?,
        time_blocks: Vec::new(),
    })
}

/// Loads a plan owned by `user_id` without its time blocks.
pub(super) fn select_plan_header(conn: &Connection, user_id: u64, plan_id: u64) -> Result<DailyPlan> {
    conn.query_row(
        &format!("SELECT {PLAN_COLUMNS} FROM daily_plans WHERE id = ?1 AND user_id = ?2"),
        params![sql_id(plan_id), sql_id(user_id)],
        build_plan_from_row,
    )
    .optional()
    .db_context("Failed to query daily plan")?
    .ok_or_else(|| PlannerError::not_found("Daily plan", plan_id))
}

/// Loads a plan owned by `user_id` with its time blocks.
pub(super) fn select_plan(conn: &Connection, user_id: u64, plan_id: u64) -> Result<DailyPlan> {
    let mut plan = select_plan_header(conn, user_id, plan_id)?;
    plan.time_blocks = select_blocks(conn, plan.id)?;
    Ok(plan)
}

fn select_plan_by_date(conn: &Connection, user_id: u64, plan_date: Date) -> Result<Option<DailyPlan>> {
    let plan = conn
        .query_row(
            &format!("SELECT {PLAN_COLUMNS} FROM daily_plans WHERE user_id = ?1 AND plan_date = ?2"),
            params![sql_id(user_id), plan_date.to_string()],
            build_plan_from_row,
        )
        .optional()
        .db_context("Failed to query daily plan")?;

    plan.map(|mut plan| {
        plan.time_blocks = select_blocks(conn, plan.id)?;
        Ok(plan)
    })
    .transpose()
}

/// Stores a recomputed block total on the plan.
pub(super) fn store_plan_total(conn: &Connection, plan_id: u64, total: u32, now: Timestamp) -> Result<()> {
    conn.execute(
        UPDATE_PLAN_TOTAL_SQL,
        params![total, sql_timestamp(now), sql_id(plan_id)],
    )
    .db_context("Failed to update plan total")?;
    Ok(())
}

impl super::Database {
    /// Returns the user's plan for `plan_date`, creating it with the given
    /// working hours when none exists. The hours of an existing plan are left
    /// untouched.
    pub fn get_or_create_plan(
        &mut self,
        user_id: u64,
        plan_date: Date,
        work_start_time: &str,
        work_end_time: &str,
    ) -> Result<DailyPlan> {
        calculate_available_minutes(work_start_time, work_end_time)?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let inserted = tx
            .execute(
                INSERT_PLAN_SQL,
                params![
                    sql_id(user_id),
                    plan_date.to_string(),
                    work_start_time,
                    work_end_time,
                    sql_timestamp(Timestamp::now())
                ],
            )
            .db_context("Failed to insert daily plan")?;

        let plan = select_plan_by_date(&tx, user_id, plan_date)?.ok_or_else(|| {
            PlannerError::internal(format!("Daily plan for {plan_date} vanished after insert"))
        })?;

        tx.commit().db_context("Failed to commit transaction")?;
        if inserted > 0 {
            info!("Created daily plan {} for {plan_date}", plan.id);
        }
        Ok(plan)
    }

    /// Retrieves a plan and its time blocks.
    pub fn get_plan(&self, user_id: u64, plan_id: u64) -> Result<DailyPlan> {
        select_plan(&self.connection, user_id, plan_id)
    }

    /// Retrieves the user's plan for a day, if one exists.
    pub fn get_plan_by_date(&self, user_id: u64, plan_date: Date) -> Result<Option<DailyPlan>> {
        select_plan_by_date(&self.connection, user_id, plan_date)
    }

    /// Lists the user's plans within the window, oldest day first.
    pub fn list_plans(&self, user_id: u64, window: &DateWindow) -> Result<Vec<DailyPlan>> {
        let mut query = format!("SELECT {PLAN_COLUMNS} FROM daily_plans WHERE user_id = ?");
        let mut values: Vec<Box<dyn ToSql>> = vec![Box::new(sql_id(user_id))];

        if let Some(start) = window.start {
            query.push_str(" AND plan_date >= ?");
            values.push(Box::new(start.to_string()));
        }
        if let Some(end) = window.end {
            query.push_str(" AND plan_date <= ?");
            values.push(Box::new(end.to_string()));
        }
        query.push_str(" ORDER BY plan_date ASC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;
        let plans = stmt
            .query_map(
                rusqlite::params_from_iter(values.iter().map(|v| v.as_ref())),
                build_plan_from_row,
            )
            .db_context("Failed to query daily plans")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read daily plan row")?;

        plans
            .into_iter()
            .map(|mut plan| {
                plan.time_blocks = select_blocks(&self.connection, plan.id)?;
                Ok(plan)
            })
            .collect()
    }

    /// Changes a plan's working hours. The resulting day must end after it
    /// starts.
    pub fn update_plan_hours(
        &mut self,
        user_id: u64,
        plan_id: u64,
        work_start_time: Option<&str>,
        work_end_time: Option<&str>,
    ) -> Result<DailyPlan> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let current = select_plan_header(&tx, user_id, plan_id)?;
        let start = work_start_time.unwrap_or(&current.work_start_time);
        let end = work_end_time.unwrap_or(&current.work_end_time);
        calculate_available_minutes(start, end)?;

        tx.execute(
            UPDATE_PLAN_HOURS_SQL,
            params![
                start,
                end,
                sql_timestamp(Timestamp::now()),
                sql_id(plan_id),
                sql_id(user_id)
            ],
        )
        .db_context("Failed to update daily plan")?;

        let plan = select_plan(&tx, user_id, plan_id)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(plan)
    }

    /// Locks a plan against further time block changes.
    ///
    /// The plan must have at least one block and must not be finalized yet.
    pub fn finalize_plan(&mut self, user_id: u64, plan_id: u64) -> Result<DailyPlan> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let current = select_plan(&tx, user_id, plan_id)?;
        if current.is_finalized {
            return Err(PlannerError::PlanFinalized { id: plan_id });
        }
        if current.time_blocks.is_empty() {
            return Err(PlannerError::EmptyPlan { id: plan_id });
        }

        let rows = tx
            .execute(
                FINALIZE_PLAN_SQL,
                params![sql_timestamp(Timestamp::now()), sql_id(plan_id), sql_id(user_id)],
            )
            .db_context("Failed to finalize daily plan")?;
        if rows == 0 {
            return Err(PlannerError::PlanFinalized { id: plan_id });
        }

        let plan = select_plan(&tx, user_id, plan_id)?;
        tx.commit().db_context("Failed to commit transaction")?;
        info!("Finalized daily plan {plan_id}");
        Ok(plan)
    }
}
