//! `flowin reflect` commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use flowin_core::{
    params::{CreateReflection, RecentReflections, ReflectionForPlan, UpdateReflection},
    CreateResult, OperationStatus, UpdateResult,
};

use super::Cli;

/// Record the end-of-day reflection of a plan
#[derive(Args)]
pub struct CreateReflectionArgs {
    #[arg(help = "Unique identifier of the plan being reflected on")]
    pub plan_id: u64,
    #[arg(short, long, help = "How satisfying the day was (1-5)")]
    pub satisfaction: u8,
    #[arg(short, long, help = "Number of tasks completed")]
    pub completed: u32,
    #[arg(short, long, help = "Number of tasks planned")]
    pub total: u32,
    #[arg(short, long, help = "Energy at the end of the day (1-5)")]
    pub energy: Option<u8>,
    #[arg(long, help = "What went well")]
    pub achievements: Option<String>,
    #[arg(long, help = "What got in the way")]
    pub challenges: Option<String>,
    #[arg(long, help = "What to do differently")]
    pub learnings: Option<String>,
    #[arg(long, help = "Priorities for tomorrow")]
    pub tomorrow: Option<String>,
}

impl From<CreateReflectionArgs> for CreateReflection {
    fn from(val: CreateReflectionArgs) -> Self {
        CreateReflection {
            daily_plan_id: val.plan_id,
            completed_tasks_count: val.completed,
            total_tasks_count: val.total,
            satisfaction_rating: val.satisfaction,
            energy_level: val.energy,
            achievements: val.achievements,
            challenges: val.challenges,
            learnings: val.learnings,
            tomorrow_priorities: val.tomorrow,
        }
    }
}

#[derive(Args)]
pub struct ShowReflectionArgs {
    #[arg(help = "Unique identifier of the plan")]
    pub plan_id: u64,
}

impl From<ShowReflectionArgs> for ReflectionForPlan {
    fn from(val: ShowReflectionArgs) -> Self {
        ReflectionForPlan {
            daily_plan_id: val.plan_id,
        }
    }
}

/// Revise a recorded reflection
#[derive(Args)]
pub struct UpdateReflectionArgs {
    #[arg(help = "Unique identifier of the reflection to update")]
    pub id: u64,
    #[arg(short, long, help = "How satisfying the day was (1-5)")]
    pub satisfaction: Option<u8>,
    #[arg(short, long, help = "Energy at the end of the day (1-5)")]
    pub energy: Option<u8>,
    #[arg(long, help = "What went well")]
    pub achievements: Option<String>,
    #[arg(long, help = "What got in the way")]
    pub challenges: Option<String>,
    #[arg(long, help = "What to do differently")]
    pub learnings: Option<String>,
    #[arg(long, help = "Priorities for tomorrow")]
    pub tomorrow: Option<String>,
}

impl From<UpdateReflectionArgs> for UpdateReflection {
    fn from(val: UpdateReflectionArgs) -> Self {
        UpdateReflection {
            id: val.id,
            satisfaction_rating: val.satisfaction,
            energy_level: val.energy,
            achievements: val.achievements,
            challenges: val.challenges,
            learnings: val.learnings,
            tomorrow_priorities: val.tomorrow,
        }
    }
}

#[derive(Args)]
pub struct RecentReflectionsArgs {
    #[arg(short, long, help = "Number of reflections (1-30, defaults to 7)")]
    pub limit: Option<u32>,
}

impl From<RecentReflectionsArgs> for RecentReflections {
    fn from(val: RecentReflectionsArgs) -> Self {
        RecentReflections { limit: val.limit }
    }
}

#[derive(Subcommand)]
pub enum ReflectCommands {
    /// Record the reflection of a plan
    #[command(alias = "c")]
    Create(CreateReflectionArgs),
    /// Show the reflection of a plan
    #[command(alias = "s")]
    Show(ShowReflectionArgs),
    /// Update a reflection
    #[command(alias = "u")]
    Update(UpdateReflectionArgs),
    /// List the latest reflections
    #[command(alias = "l")]
    Recent(RecentReflectionsArgs),
}

impl Cli {
    pub async fn handle_reflect_command(&self, command: ReflectCommands) -> Result<()> {
        let user = self.user().await?;
        match command {
            ReflectCommands::Create(args) => {
                let reflection = self.planner.create_reflection(&user, &args.into()).await?;
                self.render(CreateResult::new(reflection))
            }
            ReflectCommands::Show(args) => {
                let params = ReflectionForPlan::from(args);
                match self.planner.get_reflection_by_plan(&user, &params).await? {
                    Some(reflection) => self.render(reflection),
                    None => self.render(OperationStatus::success(format!(
                        "No reflection recorded for plan {}",
                        params.daily_plan_id
                    ))),
                }
            }
            ReflectCommands::Update(args) => {
                let params = UpdateReflection::from(args);
                let reflection = self.planner.update_reflection(&user, &params).await?;
                self.render(UpdateResult::with_changes(reflection, params.changes()))
            }
            ReflectCommands::Recent(args) => {
                let reflections = self.planner.recent_reflections(&user, &args.into()).await?;
                self.render(reflections)
            }
        }
    }
}
