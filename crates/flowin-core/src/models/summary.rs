//! Aggregate counts over a user's tasks.

use serde::{Deserialize, Serialize};

use super::TaskStatus;

/// Number of tasks in each status.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskSummary {
    pub total: u32,
    pub pending: u32,
    pub in_progress: u32,
    pub completed: u32,
    pub cancelled: u32,
}

impl TaskSummary {
    /// Adds `count` tasks in `status` to the summary.
    pub fn add(&mut self, status: TaskStatus, count: u32) {
        self.total += count;
        match status {
            TaskStatus::Pending => self.pending += count,
            TaskStatus::InProgress => self.in_progress += count,
            TaskStatus::Completed => self.completed += count,
            TaskStatus::Cancelled => self.cancelled += count,
        }
    }
}
