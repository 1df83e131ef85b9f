//! Time block operations.
//!
//! Every mutation checks that the parent plan belongs to the caller and is not
//! finalized, then recomputes the plan's `total_planned_minutes` from a full
//! scan of its blocks before committing.

use jiff::{tz::TimeZone, Timestamp};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{
    plan_queries::{select_plan_header, store_plan_total},
    task_queries::select_task,
    utils::{id, merged_text, minutes, optional_minutes, parsed, sql_id, sql_timestamp, timestamp},
};
use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{
        BlockStatus, DailyPlan, NewTimeBlock, RemovedBlock, ScheduledBlock, TimeBlock,
        TimeBlockChanges,
    },
    schedule::{calculate_total_planned_minutes, check_overallocation, TimeSpan},
};

const BLOCK_COLUMNS: &str = "b.id, b.daily_plan_id, b.task_id, b.start_time, b.end_time, \
     b.planned_duration_minutes, b.actual_duration_minutes, b.sort_order, b.status, b.notes, \
     b.created_at, b.updated_at";

const INSERT_BLOCK_SQL: &str = "INSERT INTO time_blocks \
     (daily_plan_id, task_id, start_time, end_time, planned_duration_minutes, sort_order, \
     status, notes, created_at, updated_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)";

const UPDATE_BLOCK_SQL: &str = "UPDATE time_blocks SET \
     start_time = ?1, end_time = ?2, planned_duration_minutes = ?3, \
     actual_duration_minutes = ?4, sort_order = ?5, status = ?6, notes = ?7, updated_at = ?8 \
     WHERE id = ?9";

const DELETE_BLOCK_SQL: &str = "DELETE FROM time_blocks WHERE id = ?1";

fn build_block_from_row(row: &Row<'_>) -> rusqlite::Result<TimeBlock> {
    Ok(TimeBlock {
        id: id(row, 0)?,
        daily_plan_id: id(row, 1)?,
        task_id: id(row, 2)?,
        start_time: timestamp(row, 3)?,
        end_time: timestamp(row, 4)?,
        planned_duration_minutes: minutes(row, 5)?,
        actual_duration_minutes: optional_minutes(row, 6)?,
        sort_order: minutes(row, 7)?,
        status: parsed(row, 8)?,
        notes: row.get(9)?,
        created_at: timestamp(row, 10)?,
        updated_at: timestamp(row, 11)?,
    })
}

/// Loads the blocks of a plan ordered by sort order, then start time.
pub(super) fn select_blocks(conn: &Connection, plan_id: u64) -> Result<Vec<TimeBlock>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {BLOCK_COLUMNS} FROM time_blocks b WHERE b.daily_plan_id = ?1"
        ))
        .db_context("Failed to prepare query")?;

    let mut blocks = stmt
        .query_map(params![sql_id(plan_id)], build_block_from_row)
        .db_context("Failed to query time blocks")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .db_context("Failed to read time block row")?;

    blocks.sort_by(|a, b| {
        a.sort_order
            .cmp(&b.sort_order)
            .then(a.start_time.cmp(&b.start_time))
            .then(a.id.cmp(&b.id))
    });
    Ok(blocks)
}

/// Loads a block whose plan belongs to `user_id`.
fn select_block(conn: &Connection, user_id: u64, block_id: u64) -> Result<TimeBlock> {
    conn.query_row(
        &format!(
            "SELECT {BLOCK_COLUMNS} FROM time_blocks b \
             JOIN daily_plans p ON p.id = b.daily_plan_id \
             WHERE b.id = ?1 AND p.user_id = ?2"
        ),
        params![sql_id(block_id), sql_id(user_id)],
        build_block_from_row,
    )
    .optional()
    .db_context("Failed to query time block")?
    .ok_or_else(|| PlannerError::not_found("Time block", block_id))
}

/// Loads the parent plan of a block mutation and rejects finalized plans.
fn editable_plan(conn: &Connection, user_id: u64, plan_id: u64) -> Result<DailyPlan> {
    let plan = select_plan_header(conn, user_id, plan_id)?;
    if plan.is_finalized {
        return Err(PlannerError::PlanFinalized { id: plan_id });
    }
    Ok(plan)
}

/// Recomputes and stores the plan total from all of its blocks.
fn refresh_plan_total(
    conn: &Connection,
    plan_id: u64,
    now: Timestamp,
) -> Result<(u32, Vec<TimeBlock>)> {
    let blocks = select_blocks(conn, plan_id)?;
    let total = calculate_total_planned_minutes(blocks.iter().map(|b| b.planned_duration_minutes));
    store_plan_total(conn, plan_id, total, now)?;
    Ok((total, blocks))
}

/// Builds the mutation result: the block, the new plan total, overlapping
/// siblings and the overallocation verdict.
fn schedule_result(block_id: u64, total: u32, blocks: Vec<TimeBlock>) -> Result<ScheduledBlock> {
    let (mine, others): (Vec<_>, Vec<_>) = blocks.into_iter().partition(|b| b.id == block_id);
    let block = mine.into_iter().next().ok_or_else(|| {
        PlannerError::internal(format!("Time block {block_id} vanished during update"))
    })?;

    let span = block.span();
    let overlaps_with = others
        .iter()
        .filter(|other| other.span().overlaps(&span))
        .map(|other| other.id)
        .collect();

    Ok(ScheduledBlock {
        block,
        total_planned_minutes: total,
        overlaps_with,
        overallocation: check_overallocation(total),
    })
}

impl super::Database {
    /// Schedules a task into one of the user's plans.
    ///
    /// The task must belong to the user and the plan must not be finalized.
    /// Overlapping blocks are allowed and reported in the result.
    pub fn add_time_block(
        &mut self,
        user_id: u64,
        block: &NewTimeBlock,
        tz: &TimeZone,
    ) -> Result<ScheduledBlock> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let plan = editable_plan(&tx, user_id, block.daily_plan_id)?;
        select_task(&tx, user_id, block.task_id)?;

        let start = block.start.resolve(plan.plan_date, tz)?;
        let span = TimeSpan::starting_at(start, block.planned_duration_minutes)?;
        let now = Timestamp::now();

        tx.execute(
            INSERT_BLOCK_SQL,
            params![
                sql_id(plan.id),
                sql_id(block.task_id),
                sql_timestamp(span.start),
                sql_timestamp(span.end),
                block.planned_duration_minutes,
                block.sort_order,
                BlockStatus::Planned.as_str(),
                block.notes.as_deref(),
                sql_timestamp(now)
            ],
        )
        .db_context("Failed to insert time block")?;
        let block_id = tx.last_insert_rowid() as u64;

        let (total, blocks) = refresh_plan_total(&tx, plan.id, now)?;
        let result = schedule_result(block_id, total, blocks)?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(result)
    }

    /// Applies a partial update to a block. Moving the start or changing the
    /// planned duration recomputes the end.
    pub fn update_time_block(
        &mut self,
        user_id: u64,
        block_id: u64,
        changes: &TimeBlockChanges,
        tz: &TimeZone,
    ) -> Result<ScheduledBlock> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let current = select_block(&tx, user_id, block_id)?;
        let plan = editable_plan(&tx, user_id, current.daily_plan_id)?;

        let planned = changes
            .planned_duration_minutes
            .unwrap_or(current.planned_duration_minutes);
        let span = if changes.reschedules() {
            let start = match changes.start {
                Some(start) => start.resolve(plan.plan_date, tz)?,
                None => current.start_time,
            };
            TimeSpan::starting_at(start, planned)?
        } else {
            current.span()
        };
        let now = Timestamp::now();

        tx.execute(
            UPDATE_BLOCK_SQL,
            params![
                sql_timestamp(span.start),
                sql_timestamp(span.end),
                planned,
                changes
                    .actual_duration_minutes
                    .or(current.actual_duration_minutes),
                changes.sort_order.unwrap_or(current.sort_order),
                changes.status.unwrap_or(current.status).as_str(),
                merged_text(changes.notes.as_deref(), current.notes.as_deref()),
                sql_timestamp(now),
                sql_id(block_id)
            ],
        )
        .db_context("Failed to update time block")?;

        let (total, blocks) = refresh_plan_total(&tx, plan.id, now)?;
        let result = schedule_result(block_id, total, blocks)?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(result)
    }

    /// Removes a block from its plan.
    pub fn delete_time_block(&mut self, user_id: u64, block_id: u64) -> Result<RemovedBlock> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let block = select_block(&tx, user_id, block_id)?;
        let plan = editable_plan(&tx, user_id, block.daily_plan_id)?;

        tx.execute(DELETE_BLOCK_SQL, params![sql_id(block_id)])
            .db_context("Failed to delete time block")?;

        let (total, _) = refresh_plan_total(&tx, plan.id, Timestamp::now())?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(RemovedBlock {
            block,
            total_planned_minutes: total,
        })
    }
}
