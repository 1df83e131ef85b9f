//! Time arithmetic for daily plans.
//!
//! Pure functions over plain values: wall-clock parsing, available working
//! minutes, time block spans and overlap, the planned-minutes aggregate and the
//! overallocation check. Nothing here touches the database.

use jiff::{civil::Date, tz::TimeZone, SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Recommended ceiling of planned work per day (6 hours).
pub const RECOMMENDED_MAX_MINUTES: u32 = 360;

/// Shortest plannable duration for tasks and time blocks.
pub const MIN_DURATION_MINUTES: u32 = 15;

/// Longest plannable duration for tasks and time blocks (8 hours).
pub const MAX_DURATION_MINUTES: u32 = 480;

/// Parses a strict `HH:MM` wall-clock time into minutes since midnight.
///
/// ```rust
/// use flowin_core::schedule::time_string_to_minutes;
///
/// assert_eq!(time_string_to_minutes("09:00").unwrap(), 540);
/// assert!(time_string_to_minutes("9:00").is_err());
/// ```
pub fn time_string_to_minutes(time: &str) -> Result<u32> {
    parse_wall_clock("time", time)
}

pub(crate) fn parse_wall_clock(field: &str, time: &str) -> Result<u32> {
    let invalid = || {
        PlannerError::invalid_input(field)
            .with_reason(format!("'{time}' is not a valid HH:MM time"))
    };

    let bytes = time.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(invalid());
    }
    let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(invalid());
    }
    let [h1, h2, m1, m2] = digits.map(|d| u32::from(d - b'0'));
    let hours = h1 * 10 + h2;
    let minutes = m1 * 10 + m2;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

/// Minutes between the start and end of the working day.
///
/// Fails with a validation error unless `work_end_time` is after
/// `work_start_time`.
pub fn calculate_available_minutes(work_start_time: &str, work_end_time: &str) -> Result<u32> {
    let start = parse_wall_clock("work_start_time", work_start_time)?;
    let end = parse_wall_clock("work_end_time", work_end_time)?;
    if end <= start {
        return Err(PlannerError::invalid_input("work_end_time")
            .with_reason("End of the working day must be after its start"));
    }
    Ok(end - start)
}

/// Sum of planned minutes over a plan's time blocks.
pub fn calculate_total_planned_minutes<I>(durations: I) -> u32
where
    I: IntoIterator<Item = u32>,
{
    durations.into_iter().sum()
}

/// Verdict of comparing a plan total against [`RECOMMENDED_MAX_MINUTES`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Overallocation {
    pub is_overallocated: bool,

    /// Excess in hours, rounded to one decimal place
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_over: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning_message: Option<String>,
}

/// Checks a planned total against the recommended daily ceiling.
pub fn check_overallocation(total_minutes: u32) -> Overallocation {
    if total_minutes <= RECOMMENDED_MAX_MINUTES {
        return Overallocation::default();
    }

    let excess = f64::from(total_minutes - RECOMMENDED_MAX_MINUTES);
    let hours_over = (excess / 60.0 * 10.0).round() / 10.0;
    let unit = if (hours_over - 1.0).abs() < f64::EPSILON {
        "hour"
    } else {
        "hours"
    };

    Overallocation {
        is_overallocated: true,
        hours_over: Some(hours_over),
        warning_message: Some(format!(
            "Planned work exceeds the recommended 6 hours by {hours_over} {unit}. \
             Consider dropping a task or shortening some blocks."
        )),
    }
}

/// A half-open interval `[start, end)` of absolute time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpan {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TimeSpan {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// Builds the span of a block starting at `start` lasting `minutes`.
    pub fn starting_at(start: Timestamp, minutes: u32) -> Result<Self> {
        Ok(Self::new(start, block_end_time(start, minutes)?))
    }

    /// Whether the two spans share any instant. Touching spans do not.
    pub fn overlaps(&self, other: &TimeSpan) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Whether `candidate` overlaps any of the `existing` spans.
pub fn check_time_block_overlap(existing: &[TimeSpan], candidate: &TimeSpan) -> bool {
    existing.iter().any(|span| span.overlaps(candidate))
}

/// End instant of a block: start plus its planned duration.
pub fn block_end_time(start: Timestamp, planned_minutes: u32) -> Result<Timestamp> {
    start
        .checked_add(SignedDuration::from_mins(i64::from(planned_minutes)))
        .map_err(|e| PlannerError::invalid_input("start_time").with_reason(e.to_string()))
}

/// Requested start of a time block, before it is tied to a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStart {
    /// An absolute instant (RFC 3339 with offset)
    At(Timestamp),
    /// Minutes since midnight on the plan's date
    WallClock(u32),
}

impl BlockStart {
    /// Parses either an RFC 3339 instant or an `HH:MM` wall-clock time.
    pub fn parse(field: &str, value: &str) -> Result<Self> {
        if value.len() == 5 {
            return parse_wall_clock(field, value).map(BlockStart::WallClock);
        }
        value.parse::<Timestamp>().map(BlockStart::At).map_err(|e| {
            PlannerError::invalid_input(field).with_reason(format!(
                "'{value}' is neither HH:MM nor an RFC 3339 timestamp: {e}"
            ))
        })
    }

    /// Resolves to an instant. Wall-clock times are placed on `plan_date` in
    /// the given time zone.
    pub fn resolve(&self, plan_date: Date, tz: &TimeZone) -> Result<Timestamp> {
        match *self {
            BlockStart::At(ts) => Ok(ts),
            BlockStart::WallClock(minutes) => {
                let hour = i8::try_from(minutes / 60)
                    .map_err(|e| PlannerError::internal(e.to_string()))?;
                let minute = i8::try_from(minutes % 60)
                    .map_err(|e| PlannerError::internal(e.to_string()))?;
                plan_date
                    .at(hour, minute, 0, 0)
                    .to_zoned(tz.clone())
                    .map(|zoned| zoned.timestamp())
                    .map_err(|e| {
                        PlannerError::invalid_input("start_time").with_reason(e.to_string())
                    })
            }
        }
    }
}
