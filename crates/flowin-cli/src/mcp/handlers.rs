//! MCP tool handlers implementation
//!
//! Core parameter types derive `JsonSchema` behind the `schema` feature, so
//! they are deserialized straight from tool arguments. Each handler resolves
//! the server's user, calls the planner and returns the markdown rendering of
//! the outcome.

use std::{fmt::Display, sync::Arc};

use flowin_core::{
    display::{CreateResult, DeleteResult, OperationStatus, UpdateResult},
    params::{
        AddTimeBlock, BatchCreateTasks, CompleteTask, CreateReflection, CreateTask, DateRange,
        ExportReflections, ExportTasks, Id, ListTasks, OpenPlan, PlanByDate, RecentReflections,
        ReflectionForPlan, TrendWindow, UpdatePlan, UpdateReflection, UpdateTask,
        UpdateTimeBlock, WeeklySummary,
    },
    Planner, User,
};
use log::debug;
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};

use super::to_mcp_error;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(output: impl Display) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(
        output.to_string(),
    )]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    planner: Arc<Planner>,
    user_email: Option<Arc<str>>,
}

impl McpHandlers {
    pub fn new(planner: Arc<Planner>, user_email: Option<Arc<str>>) -> Self {
        Self {
            planner,
            user_email,
        }
    }

    async fn user(&self) -> Result<User, ErrorData> {
        self.planner
            .authenticate(self.user_email.as_deref())
            .await
            .map_err(|e| to_mcp_error("Failed to authenticate", e))
    }

    // Tasks

    pub async fn create_task(&self, Parameters(params): Parameters<CreateTask>) -> McpResult {
        debug!("create_task: {params:?}");
        let user = self.user().await?;
        let task = self
            .planner
            .create_task(&user, &params)
            .await
            .map_err(|e| to_mcp_error("Failed to create task", e))?;
        text(CreateResult::new(task))
    }

    pub async fn get_task(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("get_task: {params:?}");
        let user = self.user().await?;
        let task = self
            .planner
            .get_task(&user, &params)
            .await
            .map_err(|e| to_mcp_error("Failed to get task", e))?;
        text(task)
    }

    pub async fn update_task(&self, Parameters(params): Parameters<UpdateTask>) -> McpResult {
        debug!("update_task: {params:?}");
        let user = self.user().await?;
        let task = self
            .planner
            .update_task(&user, &params)
            .await
            .map_err(|e| to_mcp_error("Failed to update task", e))?;
        text(UpdateResult::with_changes(task, params.changes()))
    }

    pub async fn start_task(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("start_task: {params:?}");
        let user = self.user().await?;
        let task = self
            .planner
            .start_task(&user, &params)
            .await
            .map_err(|e| to_mcp_error("Failed to start task", e))?;
        text(UpdateResult::with_changes(
            task,
            vec!["status: in_progress".to_string()],
        ))
    }

    pub async fn complete_task(&self, Parameters(params): Parameters<CompleteTask>) -> McpResult {
        debug!("complete_task: {params:?}");
        let user = self.user().await?;
        let task = self
            .planner
            .complete_task(&user, &params)
            .await
            .map_err(|e| to_mcp_error("Failed to complete task", e))?;
        text(UpdateResult::with_changes(
            task,
            vec!["status: completed".to_string()],
        ))
    }

    pub async fn delete_task(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("delete_task: {params:?}");
        let user = self.user().await?;
        let task = self
            .planner
            .delete_task(&user, &params)
            .await
            .map_err(|e| to_mcp_error("Failed to delete task", e))?;
        text(DeleteResult::new(task))
    }

    pub async fn list_tasks(&self, Parameters(params): Parameters<ListTasks>) -> McpResult {
        debug!("list_tasks: {params:?}");
        let user = self.user().await?;
        let tasks = self
            .planner
            .list_tasks(&user, &params)
            .await
            .map_err(|e| to_mcp_error("Failed to list tasks", e))?;
        text(tasks)
    }

    pub async fn task_summary(&self) -> McpResult {
        debug!("task_summary");
        let user = self.user().await?;
        let summary = self
            .planner
            .task_summary(&user)
            .await
            .map_err(|e| to_mcp_error("Failed to summarize tasks", e))?;
        text(summary)
    }

    // Onboarding

    pub async fn onboarding_status(&self) -> McpResult {
        debug!("onboarding_status");
        let user = self.user().await?;
        match self
            .planner
            .onboarding_status(&user)
            .await
            .map_err(|e| to_mcp_error("Failed to get onboarding status", e))?
        {
            Some(state) => text(state),
            None => text(OperationStatus::success(
                "Onboarding not started yet. Call 'complete_demo' to begin.",
            )),
        }
    }

    pub async fn complete_demo(&self) -> McpResult {
        debug!("complete_demo");
        let user = self.user().await?;
        let state = self
            .planner
            .complete_demo(&user)
            .await
            .map_err(|e| to_mcp_error("Failed to complete demo", e))?;
        text(state)
    }

    pub async fn create_first_tasks(
        &self,
        Parameters(params): Parameters<BatchCreateTasks>,
    ) -> McpResult {
        debug!("create_first_tasks: {params:?}");
        let user = self.user().await?;
        let tasks = self
            .planner
            .create_first_tasks(&user, &params)
            .await
            .map_err(|e| to_mcp_error("Failed to create first tasks", e))?;
        text(CreateResult::new(tasks))
    }

    // Daily plans

    pub async fn open_plan(&self, Parameters(params): Parameters<OpenPlan>) -> McpResult {
        debug!("open_plan: {params:?}");
        let user = self.user().await?;
        let plan = self
            .planner
            .open_plan(&user, &params)
            .await
            .map_err(|e| to_mcp_error("Failed to open plan", e))?;
        text(plan)
    }

    pub async fn get_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("get_plan: {params:?}");
        let user = self.user().await?;
        let plan = self
            .planner
            .get_plan(&user, &params)
            .await
            .map_err(|e| to_mcp_error("Failed to get plan", e))?;
        text(plan)
    }

    pub async fn get_plan_by_date(&self, Parameters(params): Parameters<PlanByDate>) -> McpResult {
        debug!("get_plan_by_date: {params:?}");
        let user = self.user().await?;
        match self
            .planner
            .get_plan_by_date(&user, &params)
            .await
            .map_err(|e| to_mcp_error("Failed to get plan", e))?
        {
            Some(plan) => text(plan),
            None => text(OperationStatus::success(format!(
                "No plan for {}. Use 'open_plan' to create one.",
                params.plan_date
            ))),
        }
    }

    pub async fn update_plan(&self, Parameters(params): Parameters<UpdatePlan>) -> McpResult {
        debug!("update_plan: {params:?}");
        let user = self.user().await?;
        let plan = self
            .planner
            .update_plan(&user, &params)
            .await
            .map_err(|e| to_mcp_error("Failed to update plan", e))?;
        text(UpdateResult::with_changes(plan, params.changes()))
    }

    pub async fn finalize_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("finalize_plan: {params:?}");
        let user = self.user().await?;
        let plan = self
            .planner
            .finalize_plan(&user, &params)
            .await
            .map_err(|e| to_mcp_error("Failed to finalize plan", e))?;
        text(UpdateResult::with_changes(plan, vec!["finalized".to_string()]))
    }

    pub async fn plan_summary(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("plan_summary: {params:?}");
        let user = self.user().await?;
        let summary = self
            .planner
            .plan_summary(&user, &params)
            .await
            .map_err(|e| to_mcp_error("Failed to summarize plan", e))?;
        text(summary)
    }

    // Time blocks

    pub async fn add_time_block(&self, Parameters(params): Parameters<AddTimeBlock>) -> McpResult {
        debug!("add_time_block: {params:?}");
        let user = self.user().await?;
        let scheduled = self
            .planner
            .add_time_block(&user, &params)
            .await
            .map_err(|e| to_mcp_error("Failed to add time block", e))?;
        text(CreateResult::new(scheduled))
    }

    pub async fn update_time_block(
        &self,
        Parameters(params): Parameters<UpdateTimeBlock>,
    ) -> McpResult {
        debug!("update_time_block: {params:?}");
        let user = self.user().await?;
        let scheduled = self
            .planner
            .update_time_block(&user, &params)
            .await
            .map_err(|e| to_mcp_error("Failed to update time block", e))?;
        text(UpdateResult::with_changes(scheduled, params.changes()))
    }

    pub async fn delete_time_block(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("delete_time_block: {params:?}");
        let user = self.user().await?;
        let removed = self
            .planner
            .delete_time_block(&user, &params)
            .await
            .map_err(|e| to_mcp_error("Failed to delete time block", e))?;
        text(DeleteResult::new(removed))
    }

    // Reflections

    pub async fn create_reflection(
        &self,
        Parameters(params): Parameters<CreateReflection>,
    ) -> McpResult {
        debug!("create_reflection: {params:?}");
        let user = self.user().await?;
        let reflection = self
            .planner
            .create_reflection(&user, &params)
            .await
            .map_err(|e| to_mcp_error("Failed to create reflection", e))?;
        text(CreateResult::new(reflection))
    }

    pub async fn get_reflection(
        &self,
        Parameters(params): Parameters<ReflectionForPlan>,
    ) -> McpResult {
        debug!("get_reflection: {params:?}");
        let user = self.user().await?;
        match self
            .planner
            .get_reflection_by_plan(&user, &params)
            .await
            .map_err(|e| to_mcp_error("Failed to get reflection", e))?
        {
            Some(reflection) => text(reflection),
            None => text(OperationStatus::success(format!(
                "No reflection recorded for plan {}",
                params.daily_plan_id
            ))),
        }
    }

    pub async fn update_reflection(
        &self,
        Parameters(params): Parameters<UpdateReflection>,
    ) -> McpResult {
        debug!("update_reflection: {params:?}");
        let user = self.user().await?;
        let reflection = self
            .planner
            .update_reflection(&user, &params)
            .await
            .map_err(|e| to_mcp_error("Failed to update reflection", e))?;
        text(UpdateResult::with_changes(reflection, params.changes()))
    }

    pub async fn recent_reflections(
        &self,
        Parameters(params): Parameters<RecentReflections>,
    ) -> McpResult {
        debug!("recent_reflections: {params:?}");
        let user = self.user().await?;
        let reflections = self
            .planner
            .recent_reflections(&user, &params)
            .await
            .map_err(|e| to_mcp_error("Failed to list reflections", e))?;
        text(reflections)
    }

    // Export and statistics

    pub async fn export_tasks(&self, Parameters(params): Parameters<ExportTasks>) -> McpResult {
        debug!("export_tasks: {params:?}");
        let user = self.user().await?;
        let export = self
            .planner
            .export_tasks(&user, &params)
            .await
            .map_err(|e| to_mcp_error("Failed to export tasks", e))?;
        Ok(CallToolResult::success(vec![Content::json(export)?]))
    }

    pub async fn export_reflections(
        &self,
        Parameters(params): Parameters<ExportReflections>,
    ) -> McpResult {
        debug!("export_reflections: {params:?}");
        let user = self.user().await?;
        let export = self
            .planner
            .export_reflections(&user, &params)
            .await
            .map_err(|e| to_mcp_error("Failed to export reflections", e))?;
        Ok(CallToolResult::success(vec![Content::json(export)?]))
    }

    pub async fn weekly_summary(&self, Parameters(params): Parameters<WeeklySummary>) -> McpResult {
        debug!("weekly_summary: {params:?}");
        let user = self.user().await?;
        let summary = self
            .planner
            .weekly_summary(&user, &params)
            .await
            .map_err(|e| to_mcp_error("Failed to summarize week", e))?;
        text(summary)
    }

    pub async fn completion_trend(&self, Parameters(params): Parameters<TrendWindow>) -> McpResult {
        debug!("completion_trend: {params:?}");
        let user = self.user().await?;
        let trend = self
            .planner
            .completion_trend(&user, &params)
            .await
            .map_err(|e| to_mcp_error("Failed to compute completion trend", e))?;
        text(trend)
    }

    pub async fn time_allocation(&self, Parameters(params): Parameters<DateRange>) -> McpResult {
        debug!("time_allocation: {params:?}");
        let user = self.user().await?;
        let allocation = self
            .planner
            .time_allocation(&user, &params)
            .await
            .map_err(|e| to_mcp_error("Failed to compute time allocation", e))?;
        text(allocation)
    }

    pub async fn satisfaction_trend(
        &self,
        Parameters(params): Parameters<TrendWindow>,
    ) -> McpResult {
        debug!("satisfaction_trend: {params:?}");
        let user = self.user().await?;
        let trend = self
            .planner
            .satisfaction_trend(&user, &params)
            .await
            .map_err(|e| to_mcp_error("Failed to compute satisfaction trend", e))?;
        text(trend)
    }
}
