//! MCP server implementation for Flowin
//!
//! This module implements the Model Context Protocol server for Flowin,
//! giving AI assistants the same task, plan, reflection and statistics
//! operations as the CLI. Every call acts as the user the server was started
//! with (`--user` or `FLOWIN_USER`).

use std::{future::Future, sync::Arc};

use anyhow::Result;
use flowin_core::{
    params::{
        AddTimeBlock, BatchCreateTasks, CompleteTask, CreateReflection, CreateTask, DateRange,
        ExportReflections, ExportTasks, Id, ListTasks, OpenPlan, PlanByDate, RecentReflections,
        ReflectionForPlan, TrendWindow, UpdatePlan, UpdateReflection, UpdateTask,
        UpdateTimeBlock, WeeklySummary,
    },
    Planner,
};
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;
pub mod handlers;

pub use errors::to_mcp_error;
use handlers::{McpHandlers, McpResult};

const INSTRUCTIONS: &str = r#"Flowin is a daily planner: a backlog of tasks, one plan per day made of time blocks, and an end-of-day reflection.

## Core Concepts
- **Tasks**: Backlog items with a title, estimate (15-480 minutes), priority (high/medium/low) and status (pending → in_progress → completed, or cancelled)
- **Daily plans**: One per day, with working hours (default 09:00-18:00). Finalizing a plan locks its time blocks
- **Time blocks**: A task scheduled at a start time for a planned duration. Overlaps are allowed and reported. Plans above 6 hours get an overallocation warning
- **Reflections**: One per plan, with a 1-5 satisfaction rating and free-text notes

## Typical Day
1. `open_plan` (no arguments opens today's plan)
2. `list_tasks` with status 'pending' to pick work
3. `add_time_block` for each task, using HH:MM start times
4. `finalize_plan` once the schedule is settled
5. `start_task` / `complete_task` as work happens
6. `create_reflection` at the end of the day

## New Users
Check `onboarding_status`, then `complete_demo` and `create_first_tasks` with one to three tasks.

## Insights
`weekly_summary`, `completion_trend`, `time_allocation`, `satisfaction_trend`, and `export_tasks` / `export_reflections` for CSV or JSON."#;

/// MCP server for Flowin
#[derive(Clone)]
pub struct FlowinMcpServer {
    planner: Arc<Planner>,
    user_email: Option<Arc<str>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl FlowinMcpServer {
    /// Create a new Flowin MCP server acting as `user_email`
    pub fn new(planner: Planner, user_email: Option<String>) -> Self {
        Self {
            planner: Arc::new(planner),
            user_email: user_email.map(Arc::from),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> McpHandlers {
        McpHandlers::new(self.planner.clone(), self.user_email.clone())
    }

    #[tool(
        name = "create_task",
        description = "Add a task to the backlog. Title is required (1-200 characters); estimated_duration_minutes (15-480) defaults to 30 and priority defaults to 'medium'. New tasks start 'pending'."
    )]
    async fn create_task(&self, params: Parameters<CreateTask>) -> McpResult {
        self.handlers().create_task(params).await
    }

    #[tool(
        name = "get_task",
        description = "Show one task with its priority, estimate, status and timestamps."
    )]
    async fn get_task(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().get_task(params).await
    }

    #[tool(
        name = "update_task",
        description = "Change any of a task's title, description, estimate, priority, actual duration or status. Status changes must follow pending → in_progress → completed; pending or in_progress tasks may also be cancelled."
    )]
    async fn update_task(&self, params: Parameters<UpdateTask>) -> McpResult {
        self.handlers().update_task(params).await
    }

    #[tool(
        name = "start_task",
        description = "Move a pending task to in_progress."
    )]
    async fn start_task(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().start_task(params).await
    }

    #[tool(
        name = "complete_task",
        description = "Mark an in_progress task completed, optionally recording the minutes it actually took."
    )]
    async fn complete_task(&self, params: Parameters<CompleteTask>) -> McpResult {
        self.handlers().complete_task(params).await
    }

    #[tool(
        name = "delete_task",
        description = "Cancel a task. The task is kept with status 'cancelled' so history and statistics stay intact."
    )]
    async fn delete_task(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().delete_task(params).await
    }

    #[tool(
        name = "list_tasks",
        description = "List tasks filtered by status, priority or search text, sorted by created_at, updated_at, priority or title. Returns at most 'limit' tasks (1-100, default 50) after skipping 'offset'."
    )]
    async fn list_tasks(&self, params: Parameters<ListTasks>) -> McpResult {
        self.handlers().list_tasks(params).await
    }

    #[tool(
        name = "task_summary",
        description = "Count the user's tasks per status."
    )]
    async fn task_summary(&self) -> McpResult {
        self.handlers().task_summary().await
    }

    #[tool(
        name = "onboarding_status",
        description = "Show where the user is in onboarding: demo watched, first tasks created."
    )]
    async fn onboarding_status(&self) -> McpResult {
        self.handlers().onboarding_status().await
    }

    #[tool(
        name = "complete_demo",
        description = "Record that the user watched the onboarding demo."
    )]
    async fn complete_demo(&self) -> McpResult {
        self.handlers().complete_demo().await
    }

    #[tool(
        name = "create_first_tasks",
        description = "Create one to three first tasks and complete onboarding. Either every task is created and onboarding completes, or nothing is saved."
    )]
    async fn create_first_tasks(&self, params: Parameters<BatchCreateTasks>) -> McpResult {
        self.handlers().create_first_tasks(params).await
    }

    #[tool(
        name = "open_plan",
        description = "Get the plan for a day (YYYY-MM-DD, default today), creating it when missing. Working hours (HH:MM, default 09:00-18:00) only apply to a newly created plan."
    )]
    async fn open_plan(&self, params: Parameters<OpenPlan>) -> McpResult {
        self.handlers().open_plan(params).await
    }

    #[tool(
        name = "get_plan",
        description = "Show a plan with its working hours, planned total and time blocks."
    )]
    async fn get_plan(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().get_plan(params).await
    }

    #[tool(
        name = "get_plan_by_date",
        description = "Show the plan of a given day (YYYY-MM-DD) without creating one."
    )]
    async fn get_plan_by_date(&self, params: Parameters<PlanByDate>) -> McpResult {
        self.handlers().get_plan_by_date(params).await
    }

    #[tool(
        name = "update_plan",
        description = "Change a plan's working hours (HH:MM). The day must end after it starts."
    )]
    async fn update_plan(&self, params: Parameters<UpdatePlan>) -> McpResult {
        self.handlers().update_plan(params).await
    }

    #[tool(
        name = "finalize_plan",
        description = "Lock a plan that has at least one time block. Finalized plans reject further time block changes."
    )]
    async fn finalize_plan(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().finalize_plan(params).await
    }

    #[tool(
        name = "plan_summary",
        description = "Compare a plan's planned minutes with its available working minutes and report overallocation."
    )]
    async fn plan_summary(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().plan_summary(params).await
    }

    #[tool(
        name = "add_time_block",
        description = "Schedule a task into a plan. start_time is HH:MM on the plan's day or an RFC 3339 timestamp; planned_duration_minutes is 15-480. Returns the new plan total, overlapping blocks and any overallocation warning."
    )]
    async fn add_time_block(&self, params: Parameters<AddTimeBlock>) -> McpResult {
        self.handlers().add_time_block(params).await
    }

    #[tool(
        name = "update_time_block",
        description = "Move, resize, reorder or annotate a time block, or set its status (planned, active, completed, skipped, overrun) and actual minutes."
    )]
    async fn update_time_block(&self, params: Parameters<UpdateTimeBlock>) -> McpResult {
        self.handlers().update_time_block(params).await
    }

    #[tool(
        name = "delete_time_block",
        description = "Remove a time block from a plan that is not finalized."
    )]
    async fn delete_time_block(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().delete_time_block(params).await
    }

    #[tool(
        name = "create_reflection",
        description = "Record the end-of-day reflection of a plan: satisfaction (1-5), optional energy (1-5), task counts and free-text achievements, challenges, learnings and tomorrow's priorities. One reflection per plan."
    )]
    async fn create_reflection(&self, params: Parameters<CreateReflection>) -> McpResult {
        self.handlers().create_reflection(params).await
    }

    #[tool(
        name = "get_reflection",
        description = "Show the reflection recorded for a plan, if any."
    )]
    async fn get_reflection(&self, params: Parameters<ReflectionForPlan>) -> McpResult {
        self.handlers().get_reflection(params).await
    }

    #[tool(
        name = "update_reflection",
        description = "Revise the ratings or notes of a reflection."
    )]
    async fn update_reflection(&self, params: Parameters<UpdateReflection>) -> McpResult {
        self.handlers().update_reflection(params).await
    }

    #[tool(
        name = "recent_reflections",
        description = "List the latest reflections, newest first (limit 1-30, default 7)."
    )]
    async fn recent_reflections(&self, params: Parameters<RecentReflections>) -> McpResult {
        self.handlers().recent_reflections(params).await
    }

    #[tool(
        name = "export_tasks",
        description = "Export tasks as 'csv' or 'json', optionally limited to a creation date range (UTC days) and a status. Returns the file name and data."
    )]
    async fn export_tasks(&self, params: Parameters<ExportTasks>) -> McpResult {
        self.handlers().export_tasks(params).await
    }

    #[tool(
        name = "export_reflections",
        description = "Export reflections as 'csv' or 'json', optionally limited to a creation date range (UTC days). Returns the file name and data."
    )]
    async fn export_reflections(&self, params: Parameters<ExportReflections>) -> McpResult {
        self.handlers().export_reflections(params).await
    }

    #[tool(
        name = "weekly_summary",
        description = "Planned minutes, time blocks and completion rate for the seven days starting at start_date (YYYY-MM-DD)."
    )]
    async fn weekly_summary(&self, params: Parameters<WeeklySummary>) -> McpResult {
        self.handlers().weekly_summary(params).await
    }

    #[tool(
        name = "completion_trend",
        description = "Daily completion rate of created tasks over the last 'days' days (7-90, default 30)."
    )]
    async fn completion_trend(&self, params: Parameters<TrendWindow>) -> McpResult {
        self.handlers().completion_trend(params).await
    }

    #[tool(
        name = "time_allocation",
        description = "Estimated and actual minutes per priority for tasks created between start_date and end_date."
    )]
    async fn time_allocation(&self, params: Parameters<DateRange>) -> McpResult {
        self.handlers().time_allocation(params).await
    }

    #[tool(
        name = "satisfaction_trend",
        description = "Satisfaction and energy of reflections over the last 'days' days (7-90, default 30)."
    )]
    async fn satisfaction_trend(&self, params: Parameters<TrendWindow>) -> McpResult {
        self.handlers().satisfaction_trend(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for FlowinMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "flowin".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: FlowinMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Flowin MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );
    if server.user_email.is_none() {
        info!("No user configured; tool calls will be rejected until FLOWIN_USER is set");
    }

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use flowin_core::PlannerBuilder;
    use jiff::tz::TimeZone;
    use tempfile::TempDir;

    use super::*;

    async fn server(user: Option<&str>) -> (FlowinMcpServer, TempDir) {
        let dir = TempDir::new().unwrap();
        let planner = PlannerBuilder::new()
            .with_database_path(Some(dir.path().join("mcp.db")))
            .with_time_zone(TimeZone::UTC)
            .build()
            .await
            .unwrap();
        (FlowinMcpServer::new(planner, user.map(String::from)), dir)
    }

    fn output(result: McpResult) -> String {
        let result = result.unwrap();
        result.content[0]
            .as_text()
            .map(|t| t.text.clone())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_every_operation_is_a_tool() {
        let (server, _dir) = server(Some("ada@example.com")).await;
        let names: Vec<_> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        assert_eq!(names.len(), 30);
        for name in ["create_task", "add_time_block", "finalize_plan", "export_tasks"] {
            assert!(names.iter().any(|n| n == name), "missing tool {name}");
        }
    }

    #[tokio::test]
    async fn test_tool_calls_act_as_configured_user() {
        let (server, _dir) = server(Some("ada@example.com")).await;

        let created = output(
            server
                .create_task(Parameters(CreateTask {
                    title: "Draft agenda".to_string(),
                    ..Default::default()
                }))
                .await,
        );
        assert!(created.contains("Created task with ID: 1"));

        let listed = output(server.list_tasks(Parameters(ListTasks::default())).await);
        assert!(listed.contains("Draft agenda"));
    }

    #[tokio::test]
    async fn test_missing_user_is_rejected() {
        let (server, _dir) = server(None).await;
        let err = server.task_summary().await.unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_plan_is_not_found() {
        let (server, _dir) = server(Some("ada@example.com")).await;
        let err = server
            .get_plan(Parameters(Id { id: 99 }))
            .await
            .unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::RESOURCE_NOT_FOUND);
    }
}
