//! Filter and ordering options for task queries.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{Priority, TaskStatus};

/// Default page size for task listings.
pub const DEFAULT_TASK_LIMIT: u32 = 50;

/// Column a task listing is ordered by.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum TaskSort {
    #[default]
    CreatedAt,
    UpdatedAt,
    Priority,
    Title,
}

/// Direction of a listing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Filter options for querying a user's tasks.
#[derive(Debug, Clone)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,

    /// Case-insensitive substring of the title or description
    pub search: Option<String>,

    pub sort_by: TaskSort,
    pub sort_order: SortOrder,
    pub limit: u32,
    pub offset: u32,
}

impl Default for TaskFilter {
    fn default() -> Self {
        Self {
            status: None,
            priority: None,
            search: None,
            sort_by: TaskSort::default(),
            sort_order: SortOrder::default(),
            limit: DEFAULT_TASK_LIMIT,
            offset: 0,
        }
    }
}

impl From<&crate::params::ListTasks> for TaskFilter {
    fn from(params: &crate::params::ListTasks) -> Self {
        Self {
            status: params.status,
            priority: params.priority,
            search: params
                .search
                .as_ref()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            sort_by: params.sort_by.unwrap_or_default(),
            sort_order: params.sort_order.unwrap_or_default(),
            limit: params.limit.unwrap_or(DEFAULT_TASK_LIMIT),
            offset: params.offset.unwrap_or(0),
        }
    }
}

/// Inclusive range of calendar days. A missing bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateWindow {
    pub start: Option<Date>,
    pub end: Option<Date>,
}

impl DateWindow {
    pub fn contains(&self, date: Date) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}
