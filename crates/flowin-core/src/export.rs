//! CSV and JSON export of tasks and reflections.

use std::{fmt::Display, str::FromStr};

use jiff::{civil::Date, tz::TimeZone, Timestamp};
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    models::{DateWindow, Reflection, Task},
};

const TASK_CSV_HEADER: &str = "id,title,description,priority,status,estimated_duration_minutes,\
actual_duration_minutes,created_at,completed_at";

const REFLECTION_CSV_HEADER: &str = "id,completed_tasks_count,total_tasks_count,\
satisfaction_rating,energy_level,achievements,challenges,learnings,tomorrow_priorities,created_at";

/// Output format of an export.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    #[default]
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!("Invalid export format: {s}")),
        }
    }
}

/// A rendered export, ready to be written to `filename`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Export {
    pub format: ExportFormat,
    pub data: String,
    pub filename: String,
}

/// Day of an instant in UTC, the calendar export filters use.
pub fn utc_date(ts: Timestamp) -> Date {
    ts.to_zoned(TimeZone::UTC).date()
}

/// Keeps the records whose creation day (UTC) lies in the window.
pub fn within_window<T>(records: Vec<T>, window: &DateWindow, created_at: impl Fn(&T) -> Timestamp) -> Vec<T> {
    records
        .into_iter()
        .filter(|record| window.contains(utc_date(created_at(record))))
        .collect()
}

fn filename(prefix: &str, format: ExportFormat, today: Date) -> String {
    format!("{prefix}_{today}.{}", format.extension())
}

/// Quotes a text field, doubling embedded quotes. Missing text is `""`.
fn quoted(value: Option<&str>) -> String {
    format!("\"{}\"", value.unwrap_or_default().replace('"', "\"\""))
}

/// Renders an optional plain field, empty when missing.
fn plain<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn task_csv_row(task: &Task) -> String {
    [
        task.id.to_string(),
        quoted(Some(&task.title)),
        quoted(task.description.as_deref()),
        task.priority.as_str().to_string(),
        task.status.as_str().to_string(),
        task.estimated_duration_minutes.to_string(),
        plain(task.actual_duration_minutes),
        task.created_at.to_string(),
        plain(task.completed_at),
    ]
    .join(",")
}

fn reflection_csv_row(reflection: &Reflection) -> String {
    [
        reflection.id.to_string(),
        reflection.completed_tasks_count.to_string(),
        reflection.total_tasks_count.to_string(),
        reflection.satisfaction_rating.to_string(),
        plain(reflection.energy_level),
        quoted(reflection.achievements.as_deref()),
        quoted(reflection.challenges.as_deref()),
        quoted(reflection.learnings.as_deref()),
        quoted(reflection.tomorrow_priorities.as_deref()),
        reflection.created_at.to_string(),
    ]
    .join(",")
}

fn render<T: Serialize>(
    records: &[T],
    format: ExportFormat,
    header: &str,
    row: impl Fn(&T) -> String,
) -> Result<String> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        ExportFormat::Csv => Ok(std::iter::once(header.to_string())
            .chain(records.iter().map(row))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Renders tasks in the given format. `today` names the file.
pub fn export_tasks(tasks: &[Task], format: ExportFormat, today: Date) -> Result<Export> {
    Ok(Export {
        format,
        data: render(tasks, format, TASK_CSV_HEADER, task_csv_row)?,
        filename: filename("tasks", format, today),
    })
}

/// Renders reflections in the given format. `today` names the file.
pub fn export_reflections(
    reflections: &[Reflection],
    format: ExportFormat,
    today: Date,
) -> Result<Export> {
    Ok(Export {
        format,
        data: render(reflections, format, REFLECTION_CSV_HEADER, reflection_csv_row)?,
        filename: filename("reflections", format, today),
    })
}
