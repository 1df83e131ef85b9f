//! Export and statistics operations for the Planner.

use jiff::Timestamp;
use log::debug;

use super::Planner;
use crate::{
    analytics::{self, week_window, WeekSummary},
    display::{CompletionTrend, SatisfactionTrend, TimeAllocation},
    error::Result,
    export::{self, utc_date, within_window, Export},
    models::{DateWindow, User},
    params::{DateRange, ExportReflections, ExportTasks, TrendWindow, WeeklySummary},
};

impl Planner {
    /// Exports the user's tasks, optionally restricted by creation day (UTC)
    /// and status.
    pub async fn export_tasks(&self, user: &User, params: &ExportTasks) -> Result<Export> {
        let window = params.validate()?;

        let (user_id, status) = (user.id, params.status);
        let tasks = self.with_db(move |db| db.all_tasks(user_id, status)).await?;
        let tasks = within_window(tasks, &window, |t| t.created_at);

        debug!("Exporting {} tasks as {:?}", tasks.len(), params.format);
        export::export_tasks(&tasks, params.format, utc_date(Timestamp::now()))
    }

    /// Exports the user's reflections, optionally restricted by creation day
    /// (UTC).
    pub async fn export_reflections(&self, user: &User, params: &ExportReflections) -> Result<Export> {
        let window = params.validate()?;

        let user_id = user.id;
        let reflections = self.with_db(move |db| db.all_reflections(user_id)).await?;
        let reflections = within_window(reflections, &window, |r| r.created_at);

        debug!(
            "Exporting {} reflections as {:?}",
            reflections.len(),
            params.format
        );
        export::export_reflections(&reflections, params.format, utc_date(Timestamp::now()))
    }

    /// Totals over the seven days starting at the given day.
    pub async fn weekly_summary(&self, user: &User, params: &WeeklySummary) -> Result<WeekSummary> {
        let start = params.validate()?;
        let window = week_window(start)?;

        let user_id = user.id;
        let (plans, tasks) = self
            .with_db(move |db| Ok((db.list_plans(user_id, &window)?, db.all_tasks(user_id, None)?)))
            .await?;
        analytics::weekly_summary(start, &plans, &tasks, &self.time_zone)
    }

    /// Daily completion of created tasks over the last `days` days.
    pub async fn completion_trend(&self, user: &User, params: &TrendWindow) -> Result<CompletionTrend> {
        let days = params.validate()?;

        let user_id = user.id;
        let tasks = self.with_db(move |db| db.all_tasks(user_id, None)).await?;
        let trend = analytics::completion_trend(self.today(), days, &tasks, &self.time_zone)?;
        Ok(CompletionTrend(trend))
    }

    /// Minutes per priority of the tasks created within a range of days.
    pub async fn time_allocation(&self, user: &User, params: &DateRange) -> Result<TimeAllocation> {
        let window: DateWindow = params.validate()?;

        let user_id = user.id;
        let tasks = self.with_db(move |db| db.all_tasks(user_id, None)).await?;
        Ok(TimeAllocation(analytics::time_allocation(
            &window,
            &tasks,
            &self.time_zone,
        )))
    }

    /// Satisfaction and energy of the latest `days` reflections.
    pub async fn satisfaction_trend(&self, user: &User, params: &TrendWindow) -> Result<SatisfactionTrend> {
        let days = params.validate()?;

        let user_id = user.id;
        let reflections = self
            .with_db(move |db| db.recent_reflections(user_id, days))
            .await?;
        Ok(SatisfactionTrend(analytics::satisfaction_trend(
            days,
            &reflections,
            &self.time_zone,
        )))
    }
}
