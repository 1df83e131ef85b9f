//! `flowin plan` commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use flowin_core::{
    params::{Id, OpenPlan, PlanByDate, UpdatePlan},
    OperationStatus, UpdateResult,
};

use super::Cli;

/// Open the plan for a day, creating it if needed
///
/// Working hours only apply when the plan is created; use `plan update` to
/// change the hours of an existing plan.
#[derive(Args)]
pub struct OpenPlanArgs {
    #[arg(help = "Day of the plan as YYYY-MM-DD (defaults to today)")]
    pub date: Option<String>,
    #[arg(short, long, help = "Start of the working day as HH:MM (defaults to 09:00)")]
    pub start: Option<String>,
    #[arg(short, long, help = "End of the working day as HH:MM (defaults to 18:00)")]
    pub end: Option<String>,
}

impl From<OpenPlanArgs> for OpenPlan {
    fn from(val: OpenPlanArgs) -> Self {
        OpenPlan {
            plan_date: val.date,
            work_start_time: val.start,
            work_end_time: val.end,
        }
    }
}

#[derive(Args)]
pub struct PlanIdArgs {
    #[arg(help = "Unique identifier of the plan")]
    pub id: u64,
}

impl From<PlanIdArgs> for Id {
    fn from(val: PlanIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Find the plan of a given day without creating one
#[derive(Args)]
pub struct PlanByDateArgs {
    #[arg(help = "Day of the plan as YYYY-MM-DD")]
    pub date: String,
}

impl From<PlanByDateArgs> for PlanByDate {
    fn from(val: PlanByDateArgs) -> Self {
        PlanByDate {
            plan_date: val.date,
        }
    }
}

/// Change the working hours of a plan
#[derive(Args)]
pub struct UpdatePlanArgs {
    #[arg(help = "Unique identifier of the plan to update")]
    pub id: u64,
    #[arg(short, long, help = "New start of the working day as HH:MM")]
    pub start: Option<String>,
    #[arg(short, long, help = "New end of the working day as HH:MM")]
    pub end: Option<String>,
}

impl From<UpdatePlanArgs> for UpdatePlan {
    fn from(val: UpdatePlanArgs) -> Self {
        UpdatePlan {
            id: val.id,
            work_start_time: val.start,
            work_end_time: val.end,
        }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Open (get or create) the plan for a day
    #[command(alias = "o")]
    Open(OpenPlanArgs),
    /// Show a plan and its time blocks
    #[command(alias = "s")]
    Show(PlanIdArgs),
    /// Show the plan of a given day, if any
    Date(PlanByDateArgs),
    /// Change the working hours of a plan
    #[command(alias = "u")]
    Update(UpdatePlanArgs),
    /// Lock a plan against further time block changes
    #[command(alias = "f")]
    Finalize(PlanIdArgs),
    /// Show planned time against available time
    Summary(PlanIdArgs),
}

impl Cli {
    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        let user = self.user().await?;
        match command {
            PlanCommands::Open(args) => {
                let plan = self.planner.open_plan(&user, &args.into()).await?;
                self.render(plan)
            }
            PlanCommands::Show(args) => {
                let plan = self.planner.get_plan(&user, &args.into()).await?;
                self.render(plan)
            }
            PlanCommands::Date(args) => {
                let params = PlanByDate::from(args);
                match self.planner.get_plan_by_date(&user, &params).await? {
                    Some(plan) => self.render(plan),
                    None => self.render(OperationStatus::success(format!(
                        "No plan for {}. Run 'flowin plan open {}' to create one.",
                        params.plan_date, params.plan_date
                    ))),
                }
            }
            PlanCommands::Update(args) => {
                let params = UpdatePlan::from(args);
                let plan = self.planner.update_plan(&user, &params).await?;
                self.render(UpdateResult::with_changes(plan, params.changes()))
            }
            PlanCommands::Finalize(args) => {
                let plan = self.planner.finalize_plan(&user, &args.into()).await?;
                self.render(UpdateResult::with_changes(
                    plan,
                    vec!["finalized".to_string()],
                ))
            }
            PlanCommands::Summary(args) => {
                let summary = self.planner.plan_summary(&user, &args.into()).await?;
                self.render(summary)
            }
        }
    }

    /// Shows today's plan, creating it with default hours if needed.
    pub async fn show_today(&self) -> Result<()> {
        let user = self.user().await?;
        let plan = self.planner.open_today(&user).await?;
        self.render(plan)
    }
}
