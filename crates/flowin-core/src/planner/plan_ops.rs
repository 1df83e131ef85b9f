//! Daily plan operations for the Planner.

use log::debug;

use super::Planner;
use crate::{
    error::Result,
    models::{DailyPlan, PlanSummary, User, DEFAULT_WORK_END, DEFAULT_WORK_START},
    params::{Id, OpenPlan, PlanByDate, UpdatePlan},
    schedule::{calculate_available_minutes, check_overallocation},
};

impl Planner {
    /// Returns the plan for the requested day (today when omitted), creating
    /// it with the given working hours when none exists yet.
    pub async fn open_plan(&self, user: &User, params: &OpenPlan) -> Result<DailyPlan> {
        let plan_date = params.validate()?.unwrap_or_else(|| self.today());
        let work_start = params
            .work_start_time
            .clone()
            .unwrap_or_else(|| DEFAULT_WORK_START.to_string());
        let work_end = params
            .work_end_time
            .clone()
            .unwrap_or_else(|| DEFAULT_WORK_END.to_string());

        debug!("Opening plan for {plan_date}");
        let user_id = user.id;
        self.with_db(move |db| db.get_or_create_plan(user_id, plan_date, &work_start, &work_end))
            .await
    }

    /// Returns today's plan, creating it with the default working hours.
    pub async fn open_today(&self, user: &User) -> Result<DailyPlan> {
        self.open_plan(user, &OpenPlan::default()).await
    }

    /// Retrieves a plan with its time blocks.
    pub async fn get_plan(&self, user: &User, params: &Id) -> Result<DailyPlan> {
        let (user_id, plan_id) = (user.id, params.id);
        self.with_db(move |db| db.get_plan(user_id, plan_id)).await
    }

    /// Retrieves the plan of a given day, if one exists.
    pub async fn get_plan_by_date(&self, user: &User, params: &PlanByDate) -> Result<Option<DailyPlan>> {
        let plan_date = params.validate()?;
        let user_id = user.id;
        self.with_db(move |db| db.get_plan_by_date(user_id, plan_date))
            .await
    }

    /// Changes the working hours of a plan.
    pub async fn update_plan(&self, user: &User, params: &UpdatePlan) -> Result<DailyPlan> {
        params.validate()?;

        let (user_id, plan_id) = (user.id, params.id);
        let start = params.work_start_time.clone();
        let end = params.work_end_time.clone();
        self.with_db(move |db| {
            db.update_plan_hours(user_id, plan_id, start.as_deref(), end.as_deref())
        })
        .await
    }

    /// Locks a plan's time blocks. Requires at least one block.
    pub async fn finalize_plan(&self, user: &User, params: &Id) -> Result<DailyPlan> {
        let (user_id, plan_id) = (user.id, params.id);
        self.with_db(move |db| db.finalize_plan(user_id, plan_id)).await
    }

    /// Capacity overview of a plan: planned against available minutes and the
    /// overallocation verdict.
    pub async fn plan_summary(&self, user: &User, params: &Id) -> Result<PlanSummary> {
        let plan = self.get_plan(user, params).await?;
        let available_minutes =
            calculate_available_minutes(&plan.work_start_time, &plan.work_end_time)?;

        Ok(PlanSummary {
            plan_id: plan.id,
            plan_date: plan.plan_date,
            total_planned_minutes: plan.total_planned_minutes,
            available_minutes,
            time_block_count: plan.time_blocks.len(),
            is_finalized: plan.is_finalized,
            overallocation: check_overallocation(plan.total_planned_minutes),
        })
    }
}
