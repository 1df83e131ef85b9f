//! High-level planner API for tasks, daily plans and reflections.
//!
//! [`Planner`] is the entry point used by every interface. Each operation
//! validates its parameters, opens a database connection on the blocking
//! thread pool and runs the matching query scoped to the calling
//! [`User`](crate::models::User).
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  CLI / MCP      │    │   Operations    │    │    Database     │
//! │  (params)       │───▶│ (*_ops, async)  │───▶│   (via db/)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!     Interfaces          Validation, scope      Data Persistence
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Planner`] instances with configuration
//! - [`user_ops`]: Identity and onboarding
//! - [`task_ops`]: Task lifecycle and listings
//! - [`plan_ops`]: Daily plans and their capacity
//! - [`block_ops`]: Time blocks within a plan
//! - [`reflection_ops`]: End-of-day reflections
//! - [`insight_ops`]: Exports and statistics
//!
//! # Usage
//!
//! ```rust,no_run
//! use flowin_core::{params::CreateTask, PlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("/tmp/flowin.db"))
//!     .build()
//!     .await?;
//!
//! let user = planner.authenticate(Some("ada@example.com")).await?;
//! let task = planner
//!     .create_task(&user, &CreateTask {
//!         title: "Write weekly report".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{task}");
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use jiff::{civil::Date, tz::TimeZone, Timestamp};
use tokio::task;

use crate::{
    db::Database,
    error::{PlannerError, Result},
};

pub mod block_ops;
pub mod builder;
pub mod insight_ops;
pub mod plan_ops;
pub mod reflection_ops;
pub mod task_ops;
pub mod user_ops;


pub use builder::PlannerBuilder;

/// Main planner interface for managing tasks, plans and reflections.
#[derive(Debug, Clone)]
pub struct Planner {
    pub(crate) db_path: PathBuf,
    pub(crate) time_zone: TimeZone,
}

impl Planner {
    /// Creates a new planner with the specified database path.
    pub(crate) fn new(db_path: PathBuf, time_zone: TimeZone) -> Self {
        Self { db_path, time_zone }
    }

    /// Path of the SQLite database file.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// Time zone in which wall-clock times and days are interpreted.
    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }

    /// Today's date in the planner's time zone.
    pub fn today(&self) -> Date {
        Timestamp::now().to_zoned(self.time_zone.clone()).date()
    }

    /// Runs `op` against a fresh connection on the blocking thread pool.
    pub(crate) async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
