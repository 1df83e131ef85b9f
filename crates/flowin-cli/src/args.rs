use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{
    BlockCommands, ExportCommands, OnboardingCommands, PlanCommands, ReflectCommands,
    StatsCommands, TaskCommands,
};

/// Main command-line interface for the Flowin daily planner
///
/// Flowin keeps a backlog of tasks, turns each day into a plan of time blocks
/// with capacity warnings, and closes the day with a short reflection. It can
/// be driven from the terminal or served over MCP (Model Context Protocol) for
/// AI assistants.
#[derive(Parser)]
#[command(version, about, name = "flowin")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/flowin/flowin.db
    #[arg(long, global = true, env = "FLOWIN_DATABASE")]
    pub database_file: Option<PathBuf>,

    /// Email address of the user to act as
    #[arg(long, global = true, env = "FLOWIN_USER")]
    pub user: Option<String>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Flowin CLI
///
/// Running `flowin` without a command shows today's plan.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage tasks in the backlog
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// First-run onboarding
    #[command(alias = "o")]
    Onboarding {
        #[command(subcommand)]
        command: OnboardingCommands,
    },
    /// Manage daily plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Manage time blocks within a plan
    #[command(alias = "b")]
    Block {
        #[command(subcommand)]
        command: BlockCommands,
    },
    /// Record and review end-of-day reflections
    #[command(alias = "r")]
    Reflect {
        #[command(subcommand)]
        command: ReflectCommands,
    },
    /// Export tasks or reflections as CSV or JSON
    #[command(alias = "x")]
    Export {
        #[command(subcommand)]
        command: ExportCommands,
    },
    /// Productivity statistics
    #[command(alias = "s")]
    Stats {
        #[command(subcommand)]
        command: StatsCommands,
    },
    /// Start the MCP server
    Serve,
}
