//! Task model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Priority, TaskStatus};

/// A unit of work owned by a single user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier for the task
    pub id: u64,

    /// Owning user
    pub user_id: u64,

    /// Short title of the task
    pub title: String,

    /// Optional longer description
    pub description: Option<String>,

    /// How long the user expects the task to take
    pub estimated_duration_minutes: u32,

    /// How long it actually took, when recorded
    pub actual_duration_minutes: Option<u32>,

    pub priority: Priority,

    pub status: TaskStatus,

    /// Set when the task enters `completed`
    pub completed_at: Option<Timestamp>,

    /// Timestamp when the task was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the task was last modified (UTC)
    pub updated_at: Timestamp,
}

impl Task {
    /// Minutes this task contributes to time allocation: the recorded actual
    /// duration, or the estimate when nothing was recorded.
    pub fn effective_minutes(&self) -> u32 {
        self.actual_duration_minutes
            .filter(|m| *m > 0)
            .unwrap_or(self.estimated_duration_minutes)
    }
}
