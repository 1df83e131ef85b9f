//! Integration tests comparing CLI and direct Display implementations
//!
//! The CLI and the MCP server both print the core Display output, so what
//! the binary prints in plain mode must match formatting the same records
//! through the library.

use std::process::Command;

use flowin_core::{
    params::{Id, ListTasks},
    Planner, PlannerBuilder,
};
use tempfile::TempDir;

const USER: &str = "ada@example.com";

/// Helper function to create a test planner with temporary database
async fn create_test_planner() -> (Planner, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");

    let planner = PlannerBuilder::new()
        .with_database_path(Some(db_path))
        .build()
        .await
        .expect("Failed to create planner");

    (planner, temp_dir)
}

/// Run a CLI command and capture its output
fn run_cli_command(temp_dir: &TempDir, args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_flowin"))
        .env_remove("FLOWIN_USER")
        .arg("--no-color")
        .arg("--database-file")
        .arg(temp_dir.path().join("test.db"))
        .args(["--user", USER])
        .args(args)
        .output()
        .expect("Failed to run CLI command");

    assert!(
        output.status.success(),
        "flowin {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in CLI output")
}

#[tokio::test]
async fn test_task_display_consistency() {
    let (planner, temp_dir) = create_test_planner().await;

    run_cli_command(
        &temp_dir,
        &["task", "create", "Integration task", "-d", "Described here"],
    );

    let user = planner.authenticate(Some(USER)).await.unwrap();
    let task = planner.get_task(&user, &Id { id: 1 }).await.unwrap();

    let cli_output = run_cli_command(&temp_dir, &["task", "show", "1"]);
    assert_eq!(cli_output, task.to_string());
}

#[tokio::test]
async fn test_task_list_display_consistency() {
    let (planner, temp_dir) = create_test_planner().await;

    run_cli_command(&temp_dir, &["task", "create", "First"]);
    run_cli_command(&temp_dir, &["task", "create", "Second", "-p", "high"]);

    let user = planner.authenticate(Some(USER)).await.unwrap();
    let tasks = planner
        .list_tasks(&user, &ListTasks::default())
        .await
        .unwrap();

    let cli_output = run_cli_command(&temp_dir, &["task", "list"]);
    assert_eq!(cli_output, tasks.to_string());
}

#[tokio::test]
async fn test_plan_display_consistency() {
    let (planner, temp_dir) = create_test_planner().await;

    run_cli_command(&temp_dir, &["task", "create", "Focus"]);
    run_cli_command(&temp_dir, &["plan", "open", "2025-03-10"]);
    run_cli_command(&temp_dir, &["block", "add", "1", "1", "09:30", "45"]);

    let user = planner.authenticate(Some(USER)).await.unwrap();
    let plan = planner.get_plan(&user, &Id { id: 1 }).await.unwrap();
    assert_eq!(plan.total_planned_minutes, 45);

    let cli_output = run_cli_command(&temp_dir, &["plan", "show", "1"]);
    assert_eq!(cli_output, plan.to_string());
}

#[tokio::test]
async fn test_cli_and_library_share_state() {
    let (planner, temp_dir) = create_test_planner().await;

    let user = planner.authenticate(Some(USER)).await.unwrap();
    planner
        .create_task(
            &user,
            &flowin_core::params::CreateTask {
                title: "Made by the library".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let cli_output = run_cli_command(&temp_dir, &["task", "summary"]);
    assert!(cli_output.contains("## Tasks (1)"));
}
