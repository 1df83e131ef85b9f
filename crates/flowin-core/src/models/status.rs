//! Status and priority enumerations for tasks and time blocks.
//!
//! [`TaskStatus`] also carries the task lifecycle rules: which transitions are
//! allowed and when the completion timestamp is stamped.

use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Type-safe enumeration of task statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has not been started
    #[default]
    Pending,

    /// Task is being worked on
    InProgress,

    /// Task has been finished
    Completed,

    /// Task was dropped (also the soft-delete state)
    Cancelled,
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" | "inprogress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            "cancelled" => Ok(TaskStatus::Cancelled),
            _ => Err(format!("Invalid task status: {s}")),
        }
    }
}

impl TaskStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Cancelled,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
        }
    }

    /// Statuses reachable from this one in a single step.
    pub fn allowed_transitions(&self) -> &'static [TaskStatus] {
        match self {
            TaskStatus::Pending => &[TaskStatus::InProgress, TaskStatus::Cancelled],
            TaskStatus::InProgress => &[TaskStatus::Completed, TaskStatus::Cancelled],
            TaskStatus::Completed | TaskStatus::Cancelled => &[],
        }
    }

    /// Whether no transition leaves this status.
    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// ```rust
    /// use flowin_core::models::TaskStatus;
    ///
    /// assert_eq!(TaskStatus::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(TaskStatus::InProgress.with_icon(), "➤ In Progress");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "○ Pending",
            TaskStatus::InProgress => "➤ In Progress",
            TaskStatus::Completed => "✓ Completed",
            TaskStatus::Cancelled => "✗ Cancelled",
        }
    }
}

/// Checks that a task may move from `current` to `requested`.
///
/// Requesting the current status is a no-op and always succeeds, including
/// for the terminal statuses.
pub fn validate_transition(current: TaskStatus, requested: TaskStatus) -> Result<()> {
    if current == requested || current.allowed_transitions().contains(&requested) {
        Ok(())
    } else {
        Err(PlannerError::InvalidTransition {
            from: current,
            to: requested,
        })
    }
}

/// Whether moving from `current` to `requested` stamps `completed_at`.
pub fn should_set_completed_at(current: TaskStatus, requested: TaskStatus) -> bool {
    requested == TaskStatus::Completed && current != TaskStatus::Completed
}

/// Task priority levels.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(format!("Invalid priority: {s}")),
        }
    }
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Sort rank, highest priority first.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

/// Execution state of a time block.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum BlockStatus {
    #[default]
    Planned,
    Active,
    Completed,
    Skipped,
    Overrun,
}

impl FromStr for BlockStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "planned" => Ok(BlockStatus::Planned),
            "active" => Ok(BlockStatus::Active),
            "completed" => Ok(BlockStatus::Completed),
            "skipped" => Ok(BlockStatus::Skipped),
            "overrun" => Ok(BlockStatus::Overrun),
            _ => Err(format!("Invalid time block status: {s}")),
        }
    }
}

impl BlockStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockStatus::Planned => "planned",
            BlockStatus::Active => "active",
            BlockStatus::Completed => "completed",
            BlockStatus::Skipped => "skipped",
            BlockStatus::Overrun => "overrun",
        }
    }

    pub fn with_icon(&self) -> &'static str {
        match self {
            BlockStatus::Planned => "○ Planned",
            BlockStatus::Active => "➤ Active",
            BlockStatus::Completed => "✓ Completed",
            BlockStatus::Skipped => "↷ Skipped",
            BlockStatus::Overrun => "⚠ Overrun",
        }
    }
}
