//! `flowin task` commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use flowin_core::{
    params::{CompleteTask, CreateTask, Id, ListTasks, UpdateTask},
    CreateResult, DeleteResult, UpdateResult,
};

use super::{Cli, PriorityArg, SortOrderArg, TaskSortArg, TaskStatusArg};

/// Create a new task in the backlog
#[derive(Args)]
pub struct CreateTaskArgs {
    /// Title of the task
    pub title: String,
    #[arg(short, long, help = "Optional longer description of the task")]
    pub description: Option<String>,
    #[arg(
        short,
        long,
        help = "Estimated duration in minutes (15-480, defaults to 30)"
    )]
    pub estimate: Option<u32>,
    #[arg(short, long, help = "Priority of the task (defaults to medium)")]
    pub priority: Option<PriorityArg>,
}

impl From<CreateTaskArgs> for CreateTask {
    fn from(val: CreateTaskArgs) -> Self {
        CreateTask {
            title: val.title,
            description: val.description,
            estimated_duration_minutes: val.estimate,
            priority: val.priority.map(Into::into),
        }
    }
}

/// List tasks, newest first by default
#[derive(Args)]
pub struct ListTasksArgs {
    #[arg(short, long, help = "Only tasks with this status")]
    pub status: Option<TaskStatusArg>,
    #[arg(short, long, help = "Only tasks with this priority")]
    pub priority: Option<PriorityArg>,
    #[arg(
        short = 'q',
        long,
        help = "Case-insensitive text to find in title or description"
    )]
    pub search: Option<String>,
    #[arg(long, help = "Field to sort by (defaults to created-at)")]
    pub sort_by: Option<TaskSortArg>,
    #[arg(long, help = "Sort direction (defaults to desc)")]
    pub order: Option<SortOrderArg>,
    #[arg(short, long, help = "Maximum number of tasks (1-100, defaults to 50)")]
    pub limit: Option<u32>,
    #[arg(long, help = "Number of tasks to skip")]
    pub offset: Option<u32>,
}

impl From<ListTasksArgs> for ListTasks {
    fn from(val: ListTasksArgs) -> Self {
        ListTasks {
            status: val.status.map(Into::into),
            priority: val.priority.map(Into::into),
            search: val.search,
            sort_by: val.sort_by.map(Into::into),
            sort_order: val.order.map(Into::into),
            limit: val.limit,
            offset: val.offset,
        }
    }
}

#[derive(Args)]
pub struct TaskIdArgs {
    #[arg(help = "Unique identifier of the task")]
    pub id: u64,
}

impl From<TaskIdArgs> for Id {
    fn from(val: TaskIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Update fields of a task
///
/// Status changes follow the task lifecycle: pending → in-progress or
/// cancelled, in-progress → completed or cancelled.
#[derive(Args)]
pub struct UpdateTaskArgs {
    #[arg(help = "Unique identifier of the task to update")]
    pub id: u64,
    #[arg(short, long, help = "New title")]
    pub title: Option<String>,
    #[arg(short, long, help = "New description (empty to clear)")]
    pub description: Option<String>,
    #[arg(short, long, help = "New estimate in minutes (15-480)")]
    pub estimate: Option<u32>,
    #[arg(short, long, help = "New priority")]
    pub priority: Option<PriorityArg>,
    #[arg(short, long, help = "New status")]
    pub status: Option<TaskStatusArg>,
    #[arg(short, long, help = "Minutes the task actually took")]
    pub actual: Option<u32>,
}

impl From<UpdateTaskArgs> for UpdateTask {
    fn from(val: UpdateTaskArgs) -> Self {
        UpdateTask {
            id: val.id,
            title: val.title,
            description: val.description,
            estimated_duration_minutes: val.estimate,
            priority: val.priority.map(Into::into),
            status: val.status.map(Into::into),
            actual_duration_minutes: val.actual,
        }
    }
}

/// Mark an in-progress task completed
#[derive(Args)]
pub struct CompleteTaskArgs {
    #[arg(help = "Unique identifier of the task to complete")]
    pub id: u64,
    #[arg(short, long, help = "Minutes the task actually took")]
    pub actual: Option<u32>,
}

impl From<CompleteTaskArgs> for CompleteTask {
    fn from(val: CompleteTaskArgs) -> Self {
        CompleteTask {
            id: val.id,
            actual_duration_minutes: val.actual,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Create a new task
    #[command(alias = "c")]
    Create(CreateTaskArgs),
    /// List tasks
    #[command(aliases = ["l", "ls"])]
    List(ListTasksArgs),
    /// Show details of a task
    #[command(alias = "s")]
    Show(TaskIdArgs),
    /// Update a task
    #[command(alias = "u")]
    Update(UpdateTaskArgs),
    /// Move a pending task to in-progress
    Start(TaskIdArgs),
    /// Mark a task completed
    #[command(alias = "done")]
    Complete(CompleteTaskArgs),
    /// Cancel a task (it stays in the history)
    #[command(aliases = ["d", "rm"])]
    Delete(TaskIdArgs),
    /// Count tasks by status
    Summary,
}

impl Cli {
    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        let user = self.user().await?;
        match command {
            TaskCommands::Create(args) => {
                let task = self.planner.create_task(&user, &args.into()).await?;
                self.render(CreateResult::new(task))
            }
            TaskCommands::List(args) => {
                let tasks = self.planner.list_tasks(&user, &args.into()).await?;
                self.render(tasks)
            }
            TaskCommands::Show(args) => {
                let task = self.planner.get_task(&user, &args.into()).await?;
                self.render(task)
            }
            TaskCommands::Update(args) => {
                let params = UpdateTask::from(args);
                let task = self.planner.update_task(&user, &params).await?;
                self.render(UpdateResult::with_changes(task, params.changes()))
            }
            TaskCommands::Start(args) => {
                let task = self.planner.start_task(&user, &args.into()).await?;
                self.render(UpdateResult::with_changes(
                    task,
                    vec!["status: in_progress".to_string()],
                ))
            }
            TaskCommands::Complete(args) => {
                let task = self.planner.complete_task(&user, &args.into()).await?;
                self.render(UpdateResult::with_changes(
                    task,
                    vec!["status: completed".to_string()],
                ))
            }
            TaskCommands::Delete(args) => {
                let task = self.planner.delete_task(&user, &args.into()).await?;
                self.render(DeleteResult::new(task))
            }
            TaskCommands::Summary => {
                let summary = self.planner.task_summary(&user).await?;
                self.render(summary)
            }
        }
    }
}
