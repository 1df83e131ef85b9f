//! Display implementations for domain models.
//!
//! Everything renders as markdown for the terminal renderer and MCP text
//! responses.

use std::fmt;

use super::datetime::{LocalDateTime, LocalTime, Minutes};
use crate::{
    models::{
        BlockStatus, DailyPlan, OnboardingState, PlanSummary, Priority, Reflection, RemovedBlock,
        ScheduledBlock, Task, TaskStatus, TaskSummary, TimeBlock, User,
    },
    schedule::Overallocation,
};

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for BlockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (ID: {})", self.email, self.id)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} ({})",
            self.id,
            self.title,
            self.status.with_icon()
        )?;
        writeln!(f)?;

        writeln!(f, "- Priority: {}", self.priority)?;
        match self.actual_duration_minutes {
            Some(actual) => writeln!(
                f,
                "- Duration: {} (estimated {})",
                Minutes(actual),
                Minutes(self.estimated_duration_minutes)
            )?,
            None => writeln!(
                f,
                "- Estimate: {}",
                Minutes(self.estimated_duration_minutes)
            )?,
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        if let Some(completed_at) = &self.completed_at {
            writeln!(f, "- Completed: {}", LocalDateTime(completed_at))?;
        }

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for TimeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- **{}-{}** block {} for task {} ({}, {})",
            LocalTime(&self.start_time),
            LocalTime(&self.end_time),
            self.id,
            self.task_id,
            Minutes(self.planned_duration_minutes),
            self.status.with_icon()
        )?;
        if let Some(notes) = &self.notes {
            write!(f, ": {notes}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for DailyPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Plan for {} (ID: {})", self.plan_date, self.id)?;
        writeln!(f)?;

        writeln!(
            f,
            "- Working hours: {}-{}",
            self.work_start_time, self.work_end_time
        )?;
        writeln!(f, "- Planned: {}", Minutes(self.total_planned_minutes))?;
        match &self.finalized_at {
            Some(at) if self.is_finalized => writeln!(f, "- Finalized: {}", LocalDateTime(at))?,
            _ => writeln!(f, "- Finalized: no")?,
        }

        if self.time_blocks.is_empty() {
            writeln!(f, "\nNo time blocks in this plan.")?;
        } else {
            writeln!(f, "\n## Time Blocks")?;
            writeln!(f)?;
            for block in &self.time_blocks {
                write!(f, "{block}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Overallocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.warning_message {
            Some(message) if self.is_overallocated => writeln!(f, "> **Warning**: {message}"),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.plan_date, self.plan_id)?;
        writeln!(f)?;
        writeln!(
            f,
            "- **Planned**: {} of {} available",
            Minutes(self.total_planned_minutes),
            Minutes(self.available_minutes)
        )?;
        writeln!(f, "- **Time blocks**: {}", self.time_block_count)?;
        writeln!(
            f,
            "- **Finalized**: {}",
            if self.is_finalized { "yes" } else { "no" }
        )?;
        if self.overallocation.is_overallocated {
            writeln!(f)?;
            write!(f, "{}", self.overallocation)?;
        }
        Ok(())
    }
}

impl fmt::Display for ScheduledBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.block)?;
        writeln!(f)?;
        writeln!(
            f,
            "Plan total: {}",
            Minutes(self.total_planned_minutes)
        )?;
        if !self.overlaps_with.is_empty() {
            let ids: Vec<String> = self.overlaps_with.iter().map(u64::to_string).collect();
            writeln!(f, "Overlaps time blocks: {}", ids.join(", "))?;
        }
        write!(f, "{}", self.overallocation)
    }
}

impl fmt::Display for RemovedBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Removed time block {} from plan {}. Plan total: {}",
            self.block.id,
            self.block.daily_plan_id,
            Minutes(self.total_planned_minutes)
        )
    }
}

impl fmt::Display for TaskSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Tasks ({})", self.total)?;
        writeln!(f)?;
        writeln!(f, "- {}: {}", TaskStatus::Pending.with_icon(), self.pending)?;
        writeln!(
            f,
            "- {}: {}",
            TaskStatus::InProgress.with_icon(),
            self.in_progress
        )?;
        writeln!(
            f,
            "- {}: {}",
            TaskStatus::Completed.with_icon(),
            self.completed
        )?;
        writeln!(
            f,
            "- {}: {}",
            TaskStatus::Cancelled.with_icon(),
            self.cancelled
        )
    }
}

fn section(f: &mut fmt::Formatter<'_>, heading: &str, text: Option<&str>) -> fmt::Result {
    if let Some(text) = text {
        writeln!(f, "#### {heading}")?;
        writeln!(f)?;
        writeln!(f, "{text}")?;
        writeln!(f)?;
    }
    Ok(())
}

impl fmt::Display for Reflection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### Reflection {} (plan {})",
            self.id, self.daily_plan_id
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "- Completed: {}/{} tasks",
            self.completed_tasks_count, self.total_tasks_count
        )?;
        writeln!(f, "- Satisfaction: {}/5", self.satisfaction_rating)?;
        if let Some(energy) = self.energy_level {
            writeln!(f, "- Energy: {energy}/5")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)?;

        section(f, "Achievements", self.achievements.as_deref())?;
        section(f, "Challenges", self.challenges.as_deref())?;
        section(f, "Learnings", self.learnings.as_deref())?;
        section(f, "Tomorrow", self.tomorrow_priorities.as_deref())
    }
}

impl fmt::Display for OnboardingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = |done: bool| if done { "✓" } else { "○" };

        writeln!(f, "## Onboarding: {}", self.current_step)?;
        writeln!(f)?;
        writeln!(f, "- {} Demo watched", check(self.demo_completed))?;
        writeln!(
            f,
            "- {} First tasks created",
            check(self.first_tasks_created)
        )?;
        if let Some(at) = &self.completed_at {
            writeln!(f, "- Completed: {}", LocalDateTime(at))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::schedule::check_overallocation;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    fn block(id: u64, minutes: u32) -> TimeBlock {
        TimeBlock {
            id,
            daily_plan_id: 1,
            task_id: 4,
            start_time: ts("2025-01-15T09:00:00Z"),
            end_time: ts("2025-01-15T09:00:00Z") + jiff::SignedDuration::from_mins(minutes.into()),
            planned_duration_minutes: minutes,
            actual_duration_minutes: None,
            sort_order: 0,
            status: BlockStatus::Planned,
            notes: Some("Deep work".to_string()),
            created_at: ts("2025-01-15T08:00:00Z"),
            updated_at: ts("2025-01-15T08:00:00Z"),
        }
    }

    #[test]
    fn test_task_display_shows_estimate_or_actual() {
        let mut task = Task {
            id: 3,
            user_id: 1,
            title: "Review PR".to_string(),
            description: Some("Check the migration".to_string()),
            estimated_duration_minutes: 90,
            actual_duration_minutes: None,
            priority: Priority::High,
            status: TaskStatus::Pending,
            completed_at: None,
            created_at: ts("2025-01-15T08:00:00Z"),
            updated_at: ts("2025-01-15T08:00:00Z"),
        };

        let output = task.to_string();
        assert!(output.starts_with("### 3. Review PR (○ Pending)"));
        assert!(output.contains("- Priority: high"));
        assert!(output.contains("- Estimate: 1h 30m"));
        assert!(output.contains("Check the migration"));

        task.actual_duration_minutes = Some(100);
        assert!(task
            .to_string()
            .contains("- Duration: 1h 40m (estimated 1h 30m)"));
    }

    #[test]
    fn test_plan_display_lists_blocks() {
        let mut plan = DailyPlan {
            id: 1,
            user_id: 1,
            plan_date: "2025-01-15".parse().unwrap(),
            total_planned_minutes: 0,
            work_start_time: "09:00".to_string(),
            work_end_time: "18:00".to_string(),
            is_finalized: false,
            finalized_at: None,
            created_at: ts("2025-01-15T08:00:00Z"),
            updated_at: ts("2025-01-15T08:00:00Z"),
            time_blocks: vec![],
        };
        assert!(plan.to_string().contains("No time blocks in this plan."));

        plan.time_blocks = vec![block(7, 45)];
        plan.total_planned_minutes = 45;
        let output = plan.to_string();
        assert!(output.starts_with("# Plan for 2025-01-15 (ID: 1)"));
        assert!(output.contains("- Working hours: 09:00-18:00"));
        assert!(output.contains("block 7 for task 4 (45m, ○ Planned): Deep work"));
    }

    #[test]
    fn test_scheduled_block_reports_overlaps_and_warning() {
        let scheduled = ScheduledBlock {
            block: block(2, 420),
            total_planned_minutes: 420,
            overlaps_with: vec![1, 3],
            overallocation: check_overallocation(420),
        };

        let output = scheduled.to_string();
        assert!(output.contains("Plan total: 7h"));
        assert!(output.contains("Overlaps time blocks: 1, 3"));
        assert!(output.contains("> **Warning**: Planned work exceeds"));
    }

    #[test]
    fn test_reflection_display_skips_missing_sections() {
        let reflection = Reflection {
            id: 5,
            user_id: 1,
            daily_plan_id: 2,
            completed_tasks_count: 3,
            total_tasks_count: 4,
            satisfaction_rating: 4,
            energy_level: None,
            achievements: Some("Shipped the release".to_string()),
            challenges: None,
            learnings: None,
            tomorrow_priorities: None,
            created_at: ts("2025-01-15T18:00:00Z"),
            updated_at: ts("2025-01-15T18:00:00Z"),
        };

        let output = reflection.to_string();
        assert!(output.contains("- Completed: 3/4 tasks"));
        assert!(output.contains("- Satisfaction: 4/5"));
        assert!(!output.contains("Energy"));
        assert!(output.contains("#### Achievements"));
        assert!(!output.contains("#### Challenges"));
    }

    #[test]
    fn test_task_summary_display() {
        let summary = TaskSummary {
            total: 3,
            pending: 1,
            in_progress: 1,
            completed: 1,
            cancelled: 0,
        };
        let output = summary.to_string();
        assert!(output.starts_with("## Tasks (3)"));
        assert!(output.contains("✓ Completed: 1"));
        assert!(output.contains("✗ Cancelled: 0"));
    }
}
