//! Users and onboarding state.

use jiff::Timestamp;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::utils::{id, optional_timestamp, sql_id, sql_timestamp, timestamp};
use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{OnboardingState, User, ONBOARDING_COMPLETED, ONBOARDING_FIRST_TASKS},
};

const INSERT_USER_SQL: &str =
    "INSERT INTO users (email, created_at) VALUES (?1, ?2) ON CONFLICT(email) DO NOTHING";
const SELECT_USER_BY_EMAIL_SQL: &str = "SELECT id, email, created_at FROM users WHERE email = ?1";

const ONBOARDING_COLUMNS: &str =
    "user_id, current_step, demo_completed, first_tasks_created, completed_at, updated_at";

const UPSERT_DEMO_COMPLETED_SQL: &str = "INSERT INTO onboarding_states \
     (user_id, current_step, demo_completed, first_tasks_created, updated_at) \
     VALUES (?1, ?2, 1, 0, ?3) \
     ON CONFLICT(user_id) DO UPDATE SET \
     demo_completed = 1, \
     current_step = CASE WHEN current_step = ?4 THEN current_step ELSE excluded.current_step END, \
     updated_at = excluded.updated_at";

const UPSERT_FIRST_TASKS_SQL: &str = "INSERT INTO onboarding_states \
     (user_id, current_step, demo_completed, first_tasks_created, completed_at, updated_at) \
     VALUES (?1, ?2, 1, 1, ?3, ?3) \
     ON CONFLICT(user_id) DO UPDATE SET \
     current_step = excluded.current_step, \
     first_tasks_created = 1, \
     completed_at = excluded.completed_at, \
     updated_at = excluded.updated_at";

fn build_user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: id(row, 0)?,
        email: row.get(1)?,
        created_at: timestamp(row, 2)?,
    })
}

fn build_onboarding_from_row(row: &Row<'_>) -> rusqlite::Result<OnboardingState> {
    Ok(OnboardingState {
        user_id: id(row, 0)?,
        current_step: row.get(1)?,
        demo_completed: row.get(2)?,
        first_tasks_created: row.get(3)?,
        completed_at: optional_timestamp(row, 4)?,
        updated_at: optional_timestamp(row, 5)?,
    })
}

/// Marks onboarding finished after the first tasks were created. Runs on the
/// caller's transaction so that it commits or rolls back with the tasks.
pub(super) fn record_first_tasks(conn: &Connection, user_id: u64, now: Timestamp) -> Result<()> {
    conn.execute(
        UPSERT_FIRST_TASKS_SQL,
        params![sql_id(user_id), ONBOARDING_COMPLETED, sql_timestamp(now)],
    )
    .db_context("Failed to update onboarding state")?;
    Ok(())
}

fn select_onboarding(conn: &Connection, user_id: u64) -> Result<Option<OnboardingState>> {
    conn.query_row(
        &format!("SELECT {ONBOARDING_COLUMNS} FROM onboarding_states WHERE user_id = ?1"),
        params![sql_id(user_id)],
        build_onboarding_from_row,
    )
    .optional()
    .db_context("Failed to query onboarding state")
}

impl super::Database {
    /// Returns the user registered under `email`, creating it on first use.
    pub fn upsert_user(&mut self, email: &str) -> Result<User> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(INSERT_USER_SQL, params![email, sql_timestamp(Timestamp::now())])
            .db_context("Failed to insert user")?;

        let user = tx
            .query_row(SELECT_USER_BY_EMAIL_SQL, params![email], build_user_from_row)
            .db_context("Failed to query user")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(user)
    }

    /// Retrieves the onboarding progress of a user, if any was recorded.
    pub fn get_onboarding(&self, user_id: u64) -> Result<Option<OnboardingState>> {
        select_onboarding(&self.connection, user_id)
    }

    /// Records that the user watched the demo.
    ///
    /// Moves the user to the first-tasks step unless onboarding is already
    /// completed.
    pub fn complete_demo(&mut self, user_id: u64) -> Result<OnboardingState> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(
            UPSERT_DEMO_COMPLETED_SQL,
            params![
                sql_id(user_id),
                ONBOARDING_FIRST_TASKS,
                sql_timestamp(Timestamp::now()),
                ONBOARDING_COMPLETED
            ],
        )
        .db_context("Failed to update onboarding state")?;

        let state = select_onboarding(&tx, user_id)?.ok_or_else(|| {
            PlannerError::internal(format!("Onboarding state for user {user_id} vanished"))
        })?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(state)
    }
}
