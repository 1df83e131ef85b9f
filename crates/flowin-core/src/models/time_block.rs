//! Time block model definition and mutation outcomes.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::BlockStatus;
use crate::schedule::{Overallocation, TimeSpan};

/// A slot of a daily plan reserved for one task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeBlock {
    pub id: u64,

    /// Parent plan
    pub daily_plan_id: u64,

    /// Task worked on during the block
    pub task_id: u64,

    pub start_time: Timestamp,

    /// Always `start_time + planned_duration_minutes`
    pub end_time: Timestamp,

    pub planned_duration_minutes: u32,

    pub actual_duration_minutes: Option<u32>,

    /// Position of the block within the plan (0 first)
    pub sort_order: u32,

    pub status: BlockStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub created_at: Timestamp,

    pub updated_at: Timestamp,
}

impl TimeBlock {
    /// The half-open interval covered by this block.
    pub fn span(&self) -> TimeSpan {
        TimeSpan::new(self.start_time, self.end_time)
    }
}

/// Result of adding or updating a time block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledBlock {
    pub block: TimeBlock,

    /// Plan total recomputed after the mutation
    pub total_planned_minutes: u32,

    /// Other blocks of the same plan whose span intersects this one
    pub overlaps_with: Vec<u64>,

    pub overallocation: Overallocation,
}

/// Result of deleting a time block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemovedBlock {
    pub block: TimeBlock,

    /// Plan total recomputed after the deletion
    pub total_planned_minutes: u32,
}
