//! Parameter structures for Flowin operations
//!
//! These structures are shared by every interface (CLI, MCP) and carry only
//! serde derives plus an optional JSON schema. Interface layers wrap or convert
//! into them:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Every structure has a `validate()` method enforcing the input rules of its
//! operation. The planner calls it before touching the database, so callers
//! never need to validate themselves.

use jiff::civil::Date;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    export::ExportFormat,
    models::{BlockStatus, DateWindow, Priority, SortOrder, TaskSort, TaskStatus},
    schedule::{parse_wall_clock, BlockStart, MAX_DURATION_MINUTES, MIN_DURATION_MINUTES},
    validate::{
        check_date_order, check_length, check_optional_length, check_optional_range,
        check_range, parse_date, parse_optional_date,
    },
};

pub const TITLE_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MAX_CHARS: usize = 2000;
pub const NOTES_MAX_CHARS: usize = 500;
pub const REFLECTION_TEXT_MAX_CHARS: usize = 1000;
pub const DEFAULT_ESTIMATE_MINUTES: u32 = 30;
pub const MAX_FIRST_TASKS: usize = 3;
pub const MAX_LIST_LIMIT: u32 = 100;
pub const DEFAULT_RECENT_REFLECTIONS: u32 = 7;
pub const MAX_RECENT_REFLECTIONS: u32 = 30;
pub const DEFAULT_TREND_DAYS: u32 = 30;
pub const MIN_TREND_DAYS: u32 = 7;
pub const MAX_TREND_DAYS: u32 = 90;

fn check_title(value: &str) -> Result<()> {
    check_length("title", value, 1, TITLE_MAX_CHARS)
}

fn check_duration(field: &str, minutes: u32) -> Result<()> {
    check_range(field, minutes, MIN_DURATION_MINUTES, MAX_DURATION_MINUTES)
}

fn check_rating(field: &str, value: u8) -> Result<()> {
    check_range(field, value, 1, 5)
}

fn check_reflection_texts(texts: [(&str, Option<&str>); 4]) -> Result<()> {
    for (field, value) in texts {
        check_optional_length(field, value, REFLECTION_TEXT_MAX_CHARS)?;
    }
    Ok(())
}

fn check_optional_wall_clock(field: &str, value: Option<&str>) -> Result<()> {
    if let Some(value) = value {
        parse_wall_clock(field, value)?;
    }
    Ok(())
}

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateTask {
    /// Title of the task (1-200 characters)
    pub title: String,
    /// Optional longer description (up to 2000 characters)
    pub description: Option<String>,
    /// Estimated duration in minutes (15-480, defaults to 30)
    pub estimated_duration_minutes: Option<u32>,
    /// Priority: 'high', 'medium' or 'low' (defaults to medium)
    pub priority: Option<Priority>,
}

impl CreateTask {
    pub fn validate(&self) -> Result<()> {
        check_title(&self.title)?;
        check_optional_length(
            "description",
            self.description.as_deref(),
            DESCRIPTION_MAX_CHARS,
        )?;
        check_duration(
            "estimated_duration_minutes",
            self.estimated_duration_minutes
                .unwrap_or(DEFAULT_ESTIMATE_MINUTES),
        )
    }
}

/// Parameters for a partial task update.
///
/// Status changes follow the task lifecycle: pending → in_progress or
/// cancelled, in_progress → completed or cancelled. Completed and cancelled
/// tasks cannot change status again.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateTask {
    /// Task ID to update (required)
    pub id: u64,
    pub title: Option<String>,
    /// New description; an empty string clears it
    pub description: Option<String>,
    pub estimated_duration_minutes: Option<u32>,
    pub priority: Option<Priority>,
    /// New status ('pending', 'in_progress', 'completed' or 'cancelled')
    pub status: Option<TaskStatus>,
    /// Minutes the task actually took
    pub actual_duration_minutes: Option<u32>,
}

impl UpdateTask {
    /// Describes the fields this update sets, for confirmation output.
    pub fn changes(&self) -> Vec<String> {
        let mut changes = Vec::new();
        if let Some(title) = &self.title {
            changes.push(format!("title: {title}"));
        }
        if self.description.is_some() {
            changes.push("description".to_string());
        }
        if let Some(minutes) = self.estimated_duration_minutes {
            changes.push(format!("estimate: {minutes}m"));
        }
        if let Some(priority) = self.priority {
            changes.push(format!("priority: {}", priority.as_str()));
        }
        if let Some(status) = self.status {
            changes.push(format!("status: {}", status.as_str()));
        }
        if let Some(minutes) = self.actual_duration_minutes {
            changes.push(format!("actual duration: {minutes}m"));
        }
        changes
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            check_title(title)?;
        }
        check_optional_length(
            "description",
            self.description.as_deref(),
            DESCRIPTION_MAX_CHARS,
        )?;
        if let Some(minutes) = self.estimated_duration_minutes {
            check_duration("estimated_duration_minutes", minutes)?;
        }
        Ok(())
    }
}

/// Parameters for marking a task completed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CompleteTask {
    /// Task ID to complete
    pub id: u64,
    /// Minutes the task actually took
    pub actual_duration_minutes: Option<u32>,
}

/// Parameters for listing the caller's tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListTasks {
    /// Only tasks with this status
    pub status: Option<TaskStatus>,
    /// Only tasks with this priority
    pub priority: Option<Priority>,
    /// Case-insensitive text searched in title and description
    pub search: Option<String>,
    /// Ordering column (defaults to created_at)
    pub sort_by: Option<TaskSort>,
    /// Ordering direction (defaults to desc)
    pub sort_order: Option<SortOrder>,
    /// Page size (1-100, defaults to 50)
    pub limit: Option<u32>,
    /// Number of tasks to skip
    pub offset: Option<u32>,
}

impl ListTasks {
    pub fn validate(&self) -> Result<()> {
        check_optional_range("limit", self.limit, 1, MAX_LIST_LIMIT)
    }
}

/// One task entered during onboarding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct FirstTask {
    pub title: String,
    /// Estimated duration in minutes (15-480)
    pub estimated_minutes: u32,
    pub priority: Priority,
}

impl FirstTask {
    pub fn validate(&self) -> Result<()> {
        check_title(&self.title)?;
        check_duration("estimated_minutes", self.estimated_minutes)
    }
}

/// Parameters for creating the first tasks of a new user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct BatchCreateTasks {
    /// Between one and three tasks
    pub tasks: Vec<FirstTask>,
}

impl BatchCreateTasks {
    pub fn validate(&self) -> Result<()> {
        check_range("tasks", self.tasks.len(), 1, MAX_FIRST_TASKS)?;
        self.tasks.iter().try_for_each(FirstTask::validate)
    }
}

/// Parameters for opening (getting or creating) a daily plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct OpenPlan {
    /// Day of the plan as YYYY-MM-DD (defaults to today)
    pub plan_date: Option<String>,
    /// Start of the working day as HH:MM (defaults to 09:00)
    pub work_start_time: Option<String>,
    /// End of the working day as HH:MM (defaults to 18:00)
    pub work_end_time: Option<String>,
}

impl OpenPlan {
    /// Validates the parameters and returns the requested date, if any.
    pub fn validate(&self) -> Result<Option<Date>> {
        check_optional_wall_clock("work_start_time", self.work_start_time.as_deref())?;
        check_optional_wall_clock("work_end_time", self.work_end_time.as_deref())?;
        parse_optional_date("plan_date", self.plan_date.as_deref())
    }
}

/// Parameters for looking a plan up by its day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct PlanByDate {
    /// Day of the plan as YYYY-MM-DD
    pub plan_date: String,
}

impl PlanByDate {
    pub fn validate(&self) -> Result<Date> {
        parse_date("plan_date", &self.plan_date)
    }
}

/// Parameters for changing a plan's working hours.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdatePlan {
    /// Plan ID to update
    pub id: u64,
    /// New start of the working day as HH:MM
    pub work_start_time: Option<String>,
    /// New end of the working day as HH:MM
    pub work_end_time: Option<String>,
}

impl UpdatePlan {
    pub fn changes(&self) -> Vec<String> {
        let mut changes = Vec::new();
        if let Some(start) = &self.work_start_time {
            changes.push(format!("work start: {start}"));
        }
        if let Some(end) = &self.work_end_time {
            changes.push(format!("work end: {end}"));
        }
        changes
    }

    pub fn validate(&self) -> Result<()> {
        check_optional_wall_clock("work_start_time", self.work_start_time.as_deref())?;
        check_optional_wall_clock("work_end_time", self.work_end_time.as_deref())
    }
}

/// Parameters for scheduling a task into a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddTimeBlock {
    pub daily_plan_id: u64,
    pub task_id: u64,
    /// Start as RFC 3339 timestamp, or HH:MM on the plan's day (local time)
    pub start_time: String,
    /// Planned duration in minutes (15-480)
    pub planned_duration_minutes: u32,
    /// Position within the plan (defaults to 0)
    pub sort_order: Option<u32>,
    /// Free-form notes (up to 500 characters)
    pub notes: Option<String>,
}

impl AddTimeBlock {
    /// Validates the parameters and returns the parsed start.
    pub fn validate(&self) -> Result<BlockStart> {
        check_duration("planned_duration_minutes", self.planned_duration_minutes)?;
        check_optional_length("notes", self.notes.as_deref(), NOTES_MAX_CHARS)?;
        BlockStart::parse("start_time", &self.start_time)
    }
}

/// Parameters for a partial time block update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateTimeBlock {
    /// Time block ID to update
    pub id: u64,
    /// New start as RFC 3339 timestamp, or HH:MM on the plan's day
    pub start_time: Option<String>,
    pub planned_duration_minutes: Option<u32>,
    pub sort_order: Option<u32>,
    /// New notes; an empty string clears them
    pub notes: Option<String>,
    /// 'planned', 'active', 'completed', 'skipped' or 'overrun'
    pub status: Option<BlockStatus>,
    pub actual_duration_minutes: Option<u32>,
}

impl UpdateTimeBlock {
    pub fn changes(&self) -> Vec<String> {
        let mut changes = Vec::new();
        if let Some(start) = &self.start_time {
            changes.push(format!("start: {start}"));
        }
        if let Some(minutes) = self.planned_duration_minutes {
            changes.push(format!("planned duration: {minutes}m"));
        }
        if let Some(order) = self.sort_order {
            changes.push(format!("sort order: {order}"));
        }
        if self.notes.is_some() {
            changes.push("notes".to_string());
        }
        if let Some(status) = self.status {
            changes.push(format!("status: {}", status.as_str()));
        }
        if let Some(minutes) = self.actual_duration_minutes {
            changes.push(format!("actual duration: {minutes}m"));
        }
        changes
    }

    /// Validates the parameters and returns the parsed start, if any.
    pub fn validate(&self) -> Result<Option<BlockStart>> {
        if let Some(minutes) = self.planned_duration_minutes {
            check_duration("planned_duration_minutes", minutes)?;
        }
        check_optional_length("notes", self.notes.as_deref(), NOTES_MAX_CHARS)?;
        self.start_time
            .as_deref()
            .map(|s| BlockStart::parse("start_time", s))
            .transpose()
    }
}

/// Parameters for recording the end-of-day reflection of a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateReflection {
    pub daily_plan_id: u64,
    pub completed_tasks_count: u32,
    pub total_tasks_count: u32,
    /// How satisfying the day was (1-5)
    pub satisfaction_rating: u8,
    /// Energy at the end of the day (1-5)
    pub energy_level: Option<u8>,
    pub achievements: Option<String>,
    pub challenges: Option<String>,
    pub learnings: Option<String>,
    pub tomorrow_priorities: Option<String>,
}

impl CreateReflection {
    pub fn validate(&self) -> Result<()> {
        check_rating("satisfaction_rating", self.satisfaction_rating)?;
        check_optional_range("energy_level", self.energy_level, 1, 5)?;
        check_reflection_texts([
            ("achievements", self.achievements.as_deref()),
            ("challenges", self.challenges.as_deref()),
            ("learnings", self.learnings.as_deref()),
            ("tomorrow_priorities", self.tomorrow_priorities.as_deref()),
        ])
    }
}

/// Parameters naming the plan a reflection belongs to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ReflectionForPlan {
    pub daily_plan_id: u64,
}

/// Parameters for a partial reflection update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateReflection {
    /// Reflection ID to update
    pub id: u64,
    pub satisfaction_rating: Option<u8>,
    pub energy_level: Option<u8>,
    pub achievements: Option<String>,
    pub challenges: Option<String>,
    pub learnings: Option<String>,
    pub tomorrow_priorities: Option<String>,
}

impl UpdateReflection {
    pub fn changes(&self) -> Vec<String> {
        let mut changes = Vec::new();
        if let Some(rating) = self.satisfaction_rating {
            changes.push(format!("satisfaction: {rating}/5"));
        }
        if let Some(energy) = self.energy_level {
            changes.push(format!("energy: {energy}/5"));
        }
        for (field, value) in [
            ("achievements", &self.achievements),
            ("challenges", &self.challenges),
            ("learnings", &self.learnings),
            ("tomorrow priorities", &self.tomorrow_priorities),
        ] {
            if value.is_some() {
                changes.push(field.to_string());
            }
        }
        changes
    }

    pub fn validate(&self) -> Result<()> {
        check_optional_range("satisfaction_rating", self.satisfaction_rating, 1, 5)?;
        check_optional_range("energy_level", self.energy_level, 1, 5)?;
        check_reflection_texts([
            ("achievements", self.achievements.as_deref()),
            ("challenges", self.challenges.as_deref()),
            ("learnings", self.learnings.as_deref()),
            ("tomorrow_priorities", self.tomorrow_priorities.as_deref()),
        ])
    }
}

/// Parameters for listing the latest reflections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct RecentReflections {
    /// Number of reflections (1-30, defaults to 7)
    pub limit: Option<u32>,
}

impl RecentReflections {
    /// Validates the parameters and returns the effective limit.
    pub fn validate(&self) -> Result<u32> {
        let limit = self.limit.unwrap_or(DEFAULT_RECENT_REFLECTIONS);
        check_range("limit", limit, 1, MAX_RECENT_REFLECTIONS)?;
        Ok(limit)
    }
}

/// Parameters for exporting tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ExportTasks {
    /// 'csv' or 'json'
    pub format: ExportFormat,
    /// Only tasks created on or after this day (YYYY-MM-DD, UTC)
    pub start_date: Option<String>,
    /// Only tasks created on or before this day (YYYY-MM-DD, UTC)
    pub end_date: Option<String>,
    /// Only tasks with this status
    pub status: Option<TaskStatus>,
}

impl ExportTasks {
    pub fn validate(&self) -> Result<DateWindow> {
        date_window(self.start_date.as_deref(), self.end_date.as_deref())
    }
}

/// Parameters for exporting reflections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ExportReflections {
    /// 'csv' or 'json'
    pub format: ExportFormat,
    /// Only reflections created on or after this day (YYYY-MM-DD, UTC)
    pub start_date: Option<String>,
    /// Only reflections created on or before this day (YYYY-MM-DD, UTC)
    pub end_date: Option<String>,
}

impl ExportReflections {
    pub fn validate(&self) -> Result<DateWindow> {
        date_window(self.start_date.as_deref(), self.end_date.as_deref())
    }
}

fn date_window(start: Option<&str>, end: Option<&str>) -> Result<DateWindow> {
    let start = parse_optional_date("start_date", start)?;
    let end = parse_optional_date("end_date", end)?;
    check_date_order(start, end)?;
    Ok(DateWindow { start, end })
}

/// Parameters for the seven-day summary starting at a given day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct WeeklySummary {
    /// First day of the week as YYYY-MM-DD
    pub start_date: String,
}

impl WeeklySummary {
    pub fn validate(&self) -> Result<Date> {
        parse_date("start_date", &self.start_date)
    }
}

/// Parameters for the day-by-day trends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TrendWindow {
    /// Number of days (7-90, defaults to 30)
    pub days: Option<u32>,
}

impl TrendWindow {
    /// Validates the parameters and returns the effective number of days.
    pub fn validate(&self) -> Result<u32> {
        let days = self.days.unwrap_or(DEFAULT_TREND_DAYS);
        check_range("days", days, MIN_TREND_DAYS, MAX_TREND_DAYS)?;
        Ok(days)
    }
}

/// Parameters naming an inclusive range of days.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DateRange {
    /// First day as YYYY-MM-DD
    pub start_date: String,
    /// Last day as YYYY-MM-DD
    pub end_date: String,
}

impl DateRange {
    pub fn validate(&self) -> Result<DateWindow> {
        date_window(Some(&self.start_date), Some(&self.end_date))
    }
}
