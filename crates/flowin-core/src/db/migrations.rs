//! Database schema initialization and versioning.

use log::debug;

use crate::error::{DatabaseResultExt, Result};

/// Version recorded in `PRAGMA user_version` once the schema is applied.
pub const SCHEMA_VERSION: i64 = 1;

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        self.connection
            .execute_batch("PRAGMA foreign_keys = ON")
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.record_schema_version()
    }

    /// Returns the schema version stored in the database file.
    pub fn schema_version(&self) -> Result<i64> {
        self.connection
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .db_context("Failed to read schema version")
    }

    fn record_schema_version(&self) -> Result<()> {
        let current = self.schema_version()?;
        if current < SCHEMA_VERSION {
            debug!("Upgrading schema version from {current} to {SCHEMA_VERSION}");
            self.connection
                .execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))
                .db_context("Failed to record schema version")?;
        }
        Ok(())
    }
}
