//! Flowin CLI Application
//!
//! Command-line interface and MCP server for the Flowin daily planner.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use flowin_core::PlannerBuilder;
use log::info;
use mcp::{run_stdio_server, FlowinMcpServer};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        user,
        no_color,
        command,
    } = Args::parse();

    let planner = PlannerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize planner")?;

    info!("Flowin started");

    if let Some(Serve) = command {
        info!("Starting Flowin MCP server");
        return run_stdio_server(FlowinMcpServer::new(planner, user))
            .await
            .context("MCP server failed");
    }

    let cli = Cli::new(planner, TerminalRenderer::new(!no_color), user);
    match command {
        Some(Task { command }) => cli.handle_task_command(command).await,
        Some(Onboarding { command }) => cli.handle_onboarding_command(command).await,
        Some(Plan { command }) => cli.handle_plan_command(command).await,
        Some(Block { command }) => cli.handle_block_command(command).await,
        Some(Reflect { command }) => cli.handle_reflect_command(command).await,
        Some(Export { command }) => cli.handle_export_command(command).await,
        Some(Stats { command }) => cli.handle_stats_command(command).await,
        Some(Serve) | None => cli.show_today().await,
    }
}
