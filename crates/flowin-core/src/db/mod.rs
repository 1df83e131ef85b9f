//! SQLite storage for users, tasks, daily plans, time blocks and reflections.
//!
//! [`Database`] wraps a single connection. Its queries are split by entity
//! across the `*_queries` modules; every multi-statement mutation runs inside
//! one transaction and every query is scoped to the calling user.

use std::{path::Path, time::Duration};

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod block_queries;
pub mod migrations;
pub mod plan_queries;
pub mod reflection_queries;
pub mod task_queries;
pub mod user_queries;
mod utils;

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .db_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
