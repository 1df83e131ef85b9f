//! Daily plan model definition and related functionality.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::TimeBlock;
use crate::schedule::Overallocation;

/// Default start of the working day.
pub const DEFAULT_WORK_START: &str = "09:00";

/// Default end of the working day.
pub const DEFAULT_WORK_END: &str = "18:00";

/// One user's plan for one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyPlan {
    /// Unique identifier for the plan
    pub id: u64,

    /// Owning user
    pub user_id: u64,

    /// Calendar day the plan covers
    pub plan_date: Date,

    /// Sum of the planned minutes of all time blocks
    pub total_planned_minutes: u32,

    /// Start of the working day (`HH:MM`)
    pub work_start_time: String,

    /// End of the working day (`HH:MM`)
    pub work_end_time: String,

    /// Once set, time blocks can no longer change
    pub is_finalized: bool,

    pub finalized_at: Option<Timestamp>,

    pub created_at: Timestamp,

    pub updated_at: Timestamp,

    /// Time blocks ordered by sort order then start time (loaded eagerly)
    #[serde(default)]
    pub time_blocks: Vec<TimeBlock>,
}

/// Capacity overview of a daily plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanSummary {
    pub plan_id: u64,
    pub plan_date: Date,
    pub total_planned_minutes: u32,
    pub available_minutes: u32,
    pub time_block_count: usize,
    pub is_finalized: bool,
    #[serde(flatten)]
    pub overallocation: Overallocation,
}
