//! Productivity statistics derived from tasks, plans and reflections.
//!
//! All functions are pure: the planner loads the records and passes them in
//! together with the time zone in which instants are turned into days.

use jiff::{civil::Date, tz::TimeZone, Timestamp, ToSpan};
use serde::{Deserialize, Serialize};

use crate::{
    error::{PlannerError, Result},
    models::{DailyPlan, DateWindow, Priority, Reflection, Task, TaskStatus},
};

/// Days covered by a weekly summary.
pub const WEEK_DAYS: i64 = 7;

/// Activity of one planned day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayBreakdown {
    pub date: Date,
    /// Tasks created that day
    pub tasks: u32,
    /// Of those, how many are completed
    pub completed: u32,
    /// Planned minutes of the day's plan
    pub minutes: u32,
}

/// Totals over the plans of one week.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeekSummary {
    pub start_date: Date,
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub total_minutes: u32,
    /// Percentage of completed tasks, 0 when there are none
    pub completion_rate: u32,
    pub daily_breakdown: Vec<DayBreakdown>,
}

/// Completion of the tasks created on one day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrendPoint {
    pub date: Date,
    pub total: u32,
    pub completed: u32,
    pub completion_rate: u32,
}

/// Time spent on one priority level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriorityAllocation {
    pub priority: Priority,
    pub minutes: u32,
    pub percentage: u32,
}

/// Ratings of one reflection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SatisfactionPoint {
    pub date: Date,
    pub satisfaction: u8,
    /// Energy level, 0 when not recorded
    pub energy: u8,
}

/// Rounded share of `part` in `whole` as a percentage.
pub fn percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (f64::from(part) / f64::from(whole) * 100.0).round() as u32
}

fn local_date(ts: Timestamp, tz: &TimeZone) -> Date {
    ts.to_zoned(tz.clone()).date()
}

fn date_error(e: jiff::Error) -> PlannerError {
    PlannerError::invalid_input("date").with_reason(e.to_string())
}

/// Counts the tasks created on `date` and the completed ones among them.
fn created_on(tasks: &[Task], date: Date, tz: &TimeZone) -> (u32, u32) {
    tasks
        .iter()
        .filter(|task| local_date(task.created_at, tz) == date)
        .fold((0, 0), |(total, completed), task| {
            let done = u32::from(task.status == TaskStatus::Completed);
            (total + 1, completed + done)
        })
}

/// The inclusive window of the week starting at `start`.
pub fn week_window(start: Date) -> Result<DateWindow> {
    let end = start
        .checked_add((WEEK_DAYS - 1).days())
        .map_err(date_error)?;
    Ok(DateWindow {
        start: Some(start),
        end: Some(end),
    })
}

/// Summarizes the plans in `[start, start + 7 days)`, one entry per plan.
pub fn weekly_summary(
    start: Date,
    plans: &[DailyPlan],
    tasks: &[Task],
    tz: &TimeZone,
) -> Result<WeekSummary> {
    let window = week_window(start)?;

    let daily_breakdown: Vec<DayBreakdown> = plans
        .iter()
        .filter(|plan| window.contains(plan.plan_date))
        .map(|plan| {
            let (total, completed) = created_on(tasks, plan.plan_date, tz);
            DayBreakdown {
                date: plan.plan_date,
                tasks: total,
                completed,
                minutes: plan.total_planned_minutes,
            }
        })
        .collect();

    let total_tasks = daily_breakdown.iter().map(|d| d.tasks).sum();
    let completed_tasks = daily_breakdown.iter().map(|d| d.completed).sum();
    let total_minutes = daily_breakdown.iter().map(|d| d.minutes).sum();

    Ok(WeekSummary {
        start_date: start,
        total_tasks,
        completed_tasks,
        total_minutes,
        completion_rate: percentage(completed_tasks, total_tasks),
        daily_breakdown,
    })
}

/// One point per day for the `days` days ending with `today`.
pub fn completion_trend(
    today: Date,
    days: u32,
    tasks: &[Task],
    tz: &TimeZone,
) -> Result<Vec<TrendPoint>> {
    let first = today
        .checked_sub((i64::from(days) - 1).max(0).days())
        .map_err(date_error)?;

    Ok(first
        .series(1.day())
        .take(days as usize)
        .map(|date| {
            let (total, completed) = created_on(tasks, date, tz);
            TrendPoint {
                date,
                total,
                completed,
                completion_rate: percentage(completed, total),
            }
        })
        .collect())
}

/// Minutes per priority of the tasks created within the window.
///
/// A task counts with its actual duration when recorded, otherwise with its
/// estimate.
pub fn time_allocation(
    window: &DateWindow,
    tasks: &[Task],
    tz: &TimeZone,
) -> Vec<PriorityAllocation> {
    let minutes_for = |priority: Priority| -> u32 {
        tasks
            .iter()
            .filter(|task| task.priority == priority)
            .filter(|task| window.contains(local_date(task.created_at, tz)))
            .map(Task::effective_minutes)
            .sum()
    };

    let minutes: Vec<(Priority, u32)> = Priority::ALL
        .iter()
        .map(|&priority| (priority, minutes_for(priority)))
        .collect();
    let total = minutes.iter().map(|(_, m)| m).sum();

    minutes
        .into_iter()
        .map(|(priority, minutes)| PriorityAllocation {
            priority,
            minutes,
            percentage: percentage(minutes, total),
        })
        .collect()
}

/// The latest `days` reflections in chronological order.
///
/// `reflections` must be ordered newest first.
pub fn satisfaction_trend(
    days: u32,
    reflections: &[Reflection],
    tz: &TimeZone,
) -> Vec<SatisfactionPoint> {
    let mut points: Vec<_> = reflections
        .iter()
        .take(days as usize)
        .map(|r| SatisfactionPoint {
            date: local_date(r.created_at, tz),
            satisfaction: r.satisfaction_rating,
            energy: r.energy_level.unwrap_or(0),
        })
        .collect();
    points.reverse();
    points
}
