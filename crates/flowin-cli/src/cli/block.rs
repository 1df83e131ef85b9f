//! `flowin block` commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use flowin_core::{
    params::{AddTimeBlock, Id, UpdateTimeBlock},
    CreateResult, DeleteResult, UpdateResult,
};

use super::{BlockStatusArg, Cli};

/// Schedule a task into a plan
///
/// Overlapping blocks are allowed and reported. A warning is shown when the
/// plan total exceeds six hours.
#[derive(Args)]
pub struct AddBlockArgs {
    #[arg(help = "Unique identifier of the plan")]
    pub plan_id: u64,
    #[arg(help = "Unique identifier of the task to schedule")]
    pub task_id: u64,
    #[arg(help = "Start as HH:MM on the plan's day, or an RFC 3339 timestamp")]
    pub start: String,
    #[arg(help = "Planned duration in minutes (15-480)")]
    pub minutes: u32,
    #[arg(short, long, help = "Position within the plan (defaults to 0)")]
    pub order: Option<u32>,
    #[arg(short, long, help = "Free-form notes")]
    pub notes: Option<String>,
}

impl From<AddBlockArgs> for AddTimeBlock {
    fn from(val: AddBlockArgs) -> Self {
        AddTimeBlock {
            daily_plan_id: val.plan_id,
            task_id: val.task_id,
            start_time: val.start,
            planned_duration_minutes: val.minutes,
            sort_order: val.order,
            notes: val.notes,
        }
    }
}

/// Move, resize or annotate a time block
#[derive(Args)]
pub struct UpdateBlockArgs {
    #[arg(help = "Unique identifier of the time block to update")]
    pub id: u64,
    #[arg(short, long, help = "New start as HH:MM or RFC 3339 timestamp")]
    pub start: Option<String>,
    #[arg(short, long, help = "New planned duration in minutes (15-480)")]
    pub minutes: Option<u32>,
    #[arg(short, long, help = "New position within the plan")]
    pub order: Option<u32>,
    #[arg(short, long, help = "New notes (empty to clear)")]
    pub notes: Option<String>,
    #[arg(long, help = "New block status")]
    pub status: Option<BlockStatusArg>,
    #[arg(short, long, help = "Minutes actually spent")]
    pub actual: Option<u32>,
}

impl From<UpdateBlockArgs> for UpdateTimeBlock {
    fn from(val: UpdateBlockArgs) -> Self {
        UpdateTimeBlock {
            id: val.id,
            start_time: val.start,
            planned_duration_minutes: val.minutes,
            sort_order: val.order,
            notes: val.notes,
            status: val.status.map(Into::into),
            actual_duration_minutes: val.actual,
        }
    }
}

#[derive(Args)]
pub struct BlockIdArgs {
    #[arg(help = "Unique identifier of the time block")]
    pub id: u64,
}

impl From<BlockIdArgs> for Id {
    fn from(val: BlockIdArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum BlockCommands {
    /// Schedule a task into a plan
    #[command(alias = "a")]
    Add(AddBlockArgs),
    /// Update a time block
    #[command(alias = "u")]
    Update(UpdateBlockArgs),
    /// Remove a time block from its plan
    #[command(aliases = ["d", "rm"])]
    Delete(BlockIdArgs),
}

impl Cli {
    pub async fn handle_block_command(&self, command: BlockCommands) -> Result<()> {
        let user = self.user().await?;
        match command {
            BlockCommands::Add(args) => {
                let scheduled = self.planner.add_time_block(&user, &args.into()).await?;
                self.render(CreateResult::new(scheduled))
            }
            BlockCommands::Update(args) => {
                let params = UpdateTimeBlock::from(args);
                let scheduled = self.planner.update_time_block(&user, &params).await?;
                self.render(UpdateResult::with_changes(scheduled, params.changes()))
            }
            BlockCommands::Delete(args) => {
                let removed = self.planner.delete_time_block(&user, &args.into()).await?;
                self.render(DeleteResult::new(removed))
            }
        }
    }
}
