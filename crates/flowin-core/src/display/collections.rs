//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper owns its items, dereferences to the underlying slice and
//! renders a fixed message when empty.

use std::{fmt, ops::Deref};

use serde::Serialize;

use super::datetime::Minutes;
use crate::{
    analytics::{PriorityAllocation, SatisfactionPoint, TrendPoint},
    models::{Reflection, Task},
};

macro_rules! collection {
    ($(#[$meta:meta])* $name:ident, $item:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub Vec<$item>);

        impl Deref for $name {
            type Target = [$item];

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl IntoIterator for $name {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<Self::Item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }
    };
}

collection!(
    /// Tasks as returned by a listing.
    ///
    /// ```rust
    /// use flowin_core::display::Tasks;
    ///
    /// assert_eq!(Tasks(vec![]).to_string(), "No tasks found.\n");
    /// ```
    Tasks,
    Task
);

collection!(
    /// Reflections, newest first.
    Reflections,
    Reflection
);

collection!(
    /// Per-day completion over a trailing window.
    CompletionTrend,
    TrendPoint
);

collection!(
    /// Minutes per priority level.
    TimeAllocation,
    PriorityAllocation
);

collection!(
    /// Satisfaction and energy per reflection.
    SatisfactionTrend,
    SatisfactionPoint
);

impl fmt::Display for Tasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No tasks found.");
        }
        for task in &self.0 {
            write!(f, "{task}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Reflections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No reflections found.");
        }
        for reflection in &self.0 {
            write!(f, "{reflection}")?;
        }
        Ok(())
    }
}

impl fmt::Display for CompletionTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "| Date | Completed | Total | Rate |")?;
        writeln!(f, "|------|-----------|-------|------|")?;
        for point in &self.0 {
            writeln!(
                f,
                "| {} | {} | {} | {}% |",
                point.date, point.completed, point.total, point.completion_rate
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for TimeAllocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.iter().all(|a| a.minutes == 0) {
            return writeln!(f, "No time recorded.");
        }
        for allocation in &self.0 {
            writeln!(
                f,
                "- **{}**: {} ({}%)",
                allocation.priority,
                Minutes(allocation.minutes),
                allocation.percentage
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for SatisfactionTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No reflections found.");
        }
        writeln!(f, "| Date | Satisfaction | Energy |")?;
        writeln!(f, "|------|--------------|--------|")?;
        for point in &self.0 {
            let energy = match point.energy {
                0 => "-".to_string(),
                e => e.to_string(),
            };
            writeln!(f, "| {} | {} | {energy} |", point.date, point.satisfaction)?;
        }
        Ok(())
    }
}
