//! Display implementations for statistics and exports.

use std::fmt;

use super::datetime::Minutes;
use crate::{analytics::WeekSummary, export::Export};

impl fmt::Display for WeekSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Week of {}", self.start_date)?;
        writeln!(f)?;
        writeln!(
            f,
            "- Tasks: {}/{} completed ({}%)",
            self.completed_tasks, self.total_tasks, self.completion_rate
        )?;
        writeln!(f, "- Planned: {}", Minutes(self.total_minutes))?;

        if !self.daily_breakdown.is_empty() {
            writeln!(f)?;
            writeln!(f, "| Date | Tasks | Completed | Planned |")?;
            writeln!(f, "|------|-------|-----------|---------|")?;
            for day in &self.daily_breakdown {
                writeln!(
                    f,
                    "| {} | {} | {} | {} |",
                    day.date,
                    day.tasks,
                    day.completed,
                    Minutes(day.minutes)
                )?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Export {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::Date;

    use super::*;
    use crate::analytics::DayBreakdown;

    #[test]
    fn test_week_summary_display() {
        let start = Date::new(2025, 1, 13).unwrap();
        let summary = WeekSummary {
            start_date: start,
            total_tasks: 4,
            completed_tasks: 3,
            total_minutes: 150,
            completion_rate: 75,
            daily_breakdown: vec![DayBreakdown {
                date: start,
                tasks: 4,
                completed: 3,
                minutes: 150,
            }],
        };

        let output = summary.to_string();
        assert!(output.starts_with("# Week of 2025-01-13"));
        assert!(output.contains("- Tasks: 3/4 completed (75%)"));
        assert!(output.contains("| 2025-01-13 | 4 | 3 | 2h 30m |"));
    }
}
