//! `flowin stats` commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use flowin_core::params::{DateRange, TrendWindow, WeeklySummary};

use super::Cli;

#[derive(Args)]
pub struct WeekArgs {
    #[arg(help = "First day of the week as YYYY-MM-DD")]
    pub start: String,
}

impl From<WeekArgs> for WeeklySummary {
    fn from(val: WeekArgs) -> Self {
        WeeklySummary {
            start_date: val.start,
        }
    }
}

#[derive(Args)]
pub struct TrendArgs {
    #[arg(short, long, help = "Number of days to cover (7-90, defaults to 30)")]
    pub days: Option<u32>,
}

impl From<TrendArgs> for TrendWindow {
    fn from(val: TrendArgs) -> Self {
        TrendWindow { days: val.days }
    }
}

#[derive(Args)]
pub struct AllocationArgs {
    #[arg(help = "First day of the range as YYYY-MM-DD")]
    pub start: String,
    #[arg(help = "Last day of the range as YYYY-MM-DD")]
    pub end: String,
}

impl From<AllocationArgs> for DateRange {
    fn from(val: AllocationArgs) -> Self {
        DateRange {
            start_date: val.start,
            end_date: val.end,
        }
    }
}

#[derive(Subcommand)]
pub enum StatsCommands {
    /// Planned and completed work over a week
    #[command(alias = "w")]
    Week(WeekArgs),
    /// Daily completion rate of created tasks
    #[command(alias = "t")]
    Trend(TrendArgs),
    /// Minutes per priority within a range of days
    #[command(alias = "a")]
    Allocation(AllocationArgs),
    /// Satisfaction and energy of the latest reflections
    #[command(alias = "s")]
    Satisfaction(TrendArgs),
}

impl Cli {
    pub async fn handle_stats_command(&self, command: StatsCommands) -> Result<()> {
        let user = self.user().await?;
        match command {
            StatsCommands::Week(args) => {
                let summary = self.planner.weekly_summary(&user, &args.into()).await?;
                self.render(summary)
            }
            StatsCommands::Trend(args) => {
                let trend = self.planner.completion_trend(&user, &args.into()).await?;
                self.render(trend)
            }
            StatsCommands::Allocation(args) => {
                let allocation = self.planner.time_allocation(&user, &args.into()).await?;
                self.render(allocation)
            }
            StatsCommands::Satisfaction(args) => {
                let trend = self.planner.satisfaction_trend(&user, &args.into()).await?;
                self.render(trend)
            }
        }
    }
}
