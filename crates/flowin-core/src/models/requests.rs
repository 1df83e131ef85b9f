//! Validated change sets handed from the planner to the database layer.

use super::{BlockStatus, Priority, TaskStatus};
use crate::{
    params::{AddTimeBlock, CompleteTask, UpdateTask, UpdateTimeBlock},
    schedule::BlockStart,
};

/// Partial update of a task. `None` leaves a field untouched.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub estimated_duration_minutes: Option<u32>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
    pub actual_duration_minutes: Option<u32>,
}

impl TaskChanges {
    /// A change set that only moves the task to `status`.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Whether the change set would modify anything.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl TryFrom<&UpdateTask> for TaskChanges {
    type Error = crate::PlannerError;

    /// Converts validated update parameters into a change set.
    ///
    /// ```rust
    /// use flowin_core::{models::{TaskChanges, TaskStatus}, params::UpdateTask};
    ///
    /// let params = UpdateTask {
    ///     id: 1,
    ///     status: Some(TaskStatus::InProgress),
    ///     ..Default::default()
    /// };
    /// let changes = TaskChanges::try_from(&params)?;
    /// assert_eq!(changes.status, Some(TaskStatus::InProgress));
    /// # flowin_core::Result::<()>::Ok(())
    /// ```
    fn try_from(params: &UpdateTask) -> Result<Self, Self::Error> {
        params.validate()?;

        Ok(Self {
            title: params.title.clone(),
            description: params.description.clone(),
            estimated_duration_minutes: params.estimated_duration_minutes,
            priority: params.priority,
            status: params.status,
            actual_duration_minutes: params.actual_duration_minutes,
        })
    }
}

impl From<&CompleteTask> for TaskChanges {
    fn from(params: &CompleteTask) -> Self {
        Self {
            status: Some(TaskStatus::Completed),
            actual_duration_minutes: params.actual_duration_minutes,
            ..Default::default()
        }
    }
}

/// A time block ready to be inserted, start not yet tied to the plan's day.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTimeBlock {
    pub daily_plan_id: u64,
    pub task_id: u64,
    pub start: BlockStart,
    pub planned_duration_minutes: u32,
    pub sort_order: u32,
    pub notes: Option<String>,
}

impl TryFrom<&AddTimeBlock> for NewTimeBlock {
    type Error = crate::PlannerError;

    fn try_from(params: &AddTimeBlock) -> Result<Self, Self::Error> {
        let start = params.validate()?;

        Ok(Self {
            daily_plan_id: params.daily_plan_id,
            task_id: params.task_id,
            start,
            planned_duration_minutes: params.planned_duration_minutes,
            sort_order: params.sort_order.unwrap_or(0),
            notes: params.notes.clone(),
        })
    }
}

/// Partial update of a time block.
///
/// Changing `start` or `planned_duration_minutes` moves the block's end.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TimeBlockChanges {
    pub start: Option<BlockStart>,
    pub planned_duration_minutes: Option<u32>,
    pub sort_order: Option<u32>,
    pub notes: Option<String>,
    pub status: Option<BlockStatus>,
    pub actual_duration_minutes: Option<u32>,
}

impl TimeBlockChanges {
    /// Whether the change set moves the block in time.
    pub fn reschedules(&self) -> bool {
        self.start.is_some() || self.planned_duration_minutes.is_some()
    }
}

impl TryFrom<&UpdateTimeBlock> for TimeBlockChanges {
    type Error = crate::PlannerError;

    fn try_from(params: &UpdateTimeBlock) -> Result<Self, Self::Error> {
        let start = params.validate()?;

        Ok(Self {
            start,
            planned_duration_minutes: params.planned_duration_minutes,
            sort_order: params.sort_order,
            notes: params.notes.clone(),
            status: params.status,
            actual_duration_minutes: params.actual_duration_minutes,
        })
    }
}
