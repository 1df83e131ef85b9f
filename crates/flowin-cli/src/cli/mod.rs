//! Command-line interface definitions and command handlers
//!
//! Every command group lives in its own module holding the clap argument
//! structures and the `Cli` methods that run them. Argument structures stay
//! separate from the core parameter types and convert into them explicitly:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner → Display → Renderer
//! ```
//!
//! Core types carry no clap derives, so enumerations the user can type
//! (statuses, priorities, sort keys, formats) get small `ValueEnum` mirrors
//! here.

mod block;
mod export;
mod onboarding;
mod plan;
mod reflect;
mod stats;
mod task;

use std::fmt::Display;

use anyhow::{Context, Result};
pub use block::BlockCommands;
use clap::ValueEnum;
pub use export::ExportCommands;
use flowin_core::{
    models::{SortOrder, TaskSort},
    BlockStatus, ExportFormat, Planner, Priority, TaskStatus, User,
};
pub use onboarding::OnboardingCommands;
pub use plan::PlanCommands;
pub use reflect::ReflectCommands;
pub use stats::StatsCommands;
pub use task::TaskCommands;

use crate::renderer::TerminalRenderer;

/// Runs CLI commands against a planner on behalf of the `--user` identity.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
    user_email: Option<String>,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer, user_email: Option<String>) -> Self {
        Self {
            planner,
            renderer,
            user_email,
        }
    }

    /// Resolves the caller, creating the user record on first use.
    async fn user(&self) -> Result<User> {
        self.planner
            .authenticate(self.user_email.as_deref())
            .await
            .context("Pass --user <EMAIL> or set FLOWIN_USER")
    }

    fn render(&self, output: impl Display) -> Result<()> {
        self.renderer.render(&output.to_string())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TaskStatusArg {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl From<TaskStatusArg> for TaskStatus {
    fn from(val: TaskStatusArg) -> Self {
        match val {
            TaskStatusArg::Pending => TaskStatus::Pending,
            TaskStatusArg::InProgress => TaskStatus::InProgress,
            TaskStatusArg::Completed => TaskStatus::Completed,
            TaskStatusArg::Cancelled => TaskStatus::Cancelled,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    High,
    Medium,
    Low,
}

impl From<PriorityArg> for Priority {
    fn from(val: PriorityArg) -> Self {
        match val {
            PriorityArg::High => Priority::High,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::Low => Priority::Low,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum BlockStatusArg {
    Planned,
    Active,
    Completed,
    Skipped,
    Overrun,
}

impl From<BlockStatusArg> for BlockStatus {
    fn from(val: BlockStatusArg) -> Self {
        match val {
            BlockStatusArg::Planned => BlockStatus::Planned,
            BlockStatusArg::Active => BlockStatus::Active,
            BlockStatusArg::Completed => BlockStatus::Completed,
            BlockStatusArg::Skipped => BlockStatus::Skipped,
            BlockStatusArg::Overrun => BlockStatus::Overrun,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TaskSortArg {
    CreatedAt,
    UpdatedAt,
    Priority,
    Title,
}

impl From<TaskSortArg> for TaskSort {
    fn from(val: TaskSortArg) -> Self {
        match val {
            TaskSortArg::CreatedAt => TaskSort::CreatedAt,
            TaskSortArg::UpdatedAt => TaskSort::UpdatedAt,
            TaskSortArg::Priority => TaskSort::Priority,
            TaskSortArg::Title => TaskSort::Title,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum SortOrderArg {
    Asc,
    Desc,
}

impl From<SortOrderArg> for SortOrder {
    fn from(val: SortOrderArg) -> Self {
        match val {
            SortOrderArg::Asc => SortOrder::Asc,
            SortOrderArg::Desc => SortOrder::Desc,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormatArg {
    Csv,
    #[default]
    Json,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(val: ExportFormatArg) -> Self {
        match val {
            ExportFormatArg::Csv => ExportFormat::Csv,
            ExportFormatArg::Json => ExportFormat::Json,
        }
    }
}
