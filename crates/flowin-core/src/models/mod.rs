//! Data models for tasks, daily plans, time blocks and reflections.
//!
//! Display implementations for these models live in
//! [`crate::display::models`], keeping data structures apart from their
//! markdown presentation.
//!
//! # Examples
//!
//! ```rust
//! use flowin_core::models::{Priority, Task, TaskStatus};
//! use jiff::Timestamp;
//!
//! let task = Task {
//!     id: 1,
//!     user_id: 1,
//!     title: "Write weekly report".to_string(),
//!     description: None,
//!     estimated_duration_minutes: 45,
//!     actual_duration_minutes: None,
//!     priority: Priority::High,
//!     status: TaskStatus::Pending,
//!     completed_at: None,
//!     created_at: Timestamp::now(),
//!     updated_at: Timestamp::now(),
//! };
//! println!("{}", task); // Markdown with the ○ Pending status icon
//! ```

pub mod daily_plan;
pub mod filters;
pub mod reflection;
pub mod requests;
pub mod status;
pub mod summary;
pub mod task;
pub mod time_block;
pub mod user;


pub use daily_plan::{DailyPlan, PlanSummary, DEFAULT_WORK_END, DEFAULT_WORK_START};
pub use filters::{DateWindow, SortOrder, TaskFilter, TaskSort, DEFAULT_TASK_LIMIT};
pub use reflection::Reflection;
pub use requests::{NewTimeBlock, TaskChanges, TimeBlockChanges};
pub use status::{
    should_set_completed_at, validate_transition, BlockStatus, Priority, TaskStatus,
};
pub use summary::TaskSummary;
pub use task::Task;
pub use time_block::{RemovedBlock, ScheduledBlock, TimeBlock};
pub use user::{OnboardingState, User, ONBOARDING_COMPLETED, ONBOARDING_FIRST_TASKS};
