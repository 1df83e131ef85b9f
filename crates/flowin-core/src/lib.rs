//! Core library for the Flowin daily planner.
//!
//! Flowin keeps a per-user backlog of tasks, turns a day into a plan of time
//! blocks with capacity warnings, and closes the day with a reflection. This
//! crate holds the business rules, the SQLite storage and the markdown
//! formatting shared by the CLI and the MCP server.
//!
//! # Display Architecture
//!
//! - **Domain Models** ([`models`]): Implement [`std::fmt::Display`] for direct
//!   formatting
//! - **Display Wrappers** ([`display`]): Collections and operation results
//! - **Terminal Rendering**: Rich markdown output via the CLI's terminal
//!   renderer
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use flowin_core::{
//!     params::{AddTimeBlock, CreateTask},
//!     PlannerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("flowin.db"))
//!     .build()
//!     .await?;
//! let user = planner.authenticate(Some("ada@example.com")).await?;
//!
//! let task = planner
//!     .create_task(&user, &CreateTask {
//!         title: "Write weekly report".to_string(),
//!         estimated_duration_minutes: Some(45),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let plan = planner.open_today(&user).await?;
//! let scheduled = planner
//!     .add_time_block(&user, &AddTimeBlock {
//!         daily_plan_id: plan.id,
//!         task_id: task.id,
//!         start_time: "09:30".to_string(),
//!         planned_duration_minutes: 45,
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{scheduled}");
//! # Ok(())
//! # }
//! ```

pub mod analytics;
pub mod db;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod params;
pub mod planner;
pub mod schedule;
pub(crate) mod validate;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, LocalDateTime, Minutes, OperationStatus, Reflections, Tasks,
    UpdateResult,
};
pub use error::{ErrorKind, PlannerError, Result};
pub use export::{Export, ExportFormat};
pub use models::{
    BlockStatus, DailyPlan, OnboardingState, PlanSummary, Priority, Reflection, Task, TaskStatus,
    TaskSummary, TimeBlock, User,
};
pub use planner::{Planner, PlannerBuilder};
