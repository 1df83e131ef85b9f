//! Display formatting for domain models and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]).
//! Collections and operation outcomes get newtype wrappers so the same data
//! can be framed differently: a created task is announced, a listed one is
//! not. Every formatter writes markdown, which the CLI renders for the
//! terminal and the MCP server returns as text.
//!
//! - [`collections`]: collection wrappers (Tasks, Reflections, trends)
//! - [`results`]: operation results (CreateResult, UpdateResult, DeleteResult)
//! - [`status`]: confirmation messages (OperationStatus)
//! - [`datetime`]: timestamp and duration formatting
//! - [`models`]: Display implementations for domain models
//! - [`insights`]: Display implementations for statistics and exports
//!
//! # Examples
//!
//! ```rust
//! use flowin_core::display::{Minutes, OperationStatus};
//!
//! let status = OperationStatus::success(format!("Planned {}", Minutes(150)));
//! assert_eq!(status.to_string(), "Success: Planned 2h 30m\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod insights;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{CompletionTrend, Reflections, SatisfactionTrend, Tasks, TimeAllocation};
pub use datetime::{LocalDateTime, LocalTime, Minutes};
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
