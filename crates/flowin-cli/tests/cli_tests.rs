use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color flag, a scratch
/// database and no inherited identity
fn flowin_cmd(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("flowin").expect("Failed to find flowin binary");
    cmd.env_remove("FLOWIN_USER")
        .env_remove("FLOWIN_DATABASE")
        .arg("--no-color")
        .arg("--database-file")
        .arg(temp_dir.path().join("cli_test.db"));
    cmd
}

/// Same as [`flowin_cmd`], acting as ada@example.com
fn ada(temp_dir: &TempDir) -> Command {
    let mut cmd = flowin_cmd(temp_dir);
    cmd.args(["--user", "ada@example.com"]);
    cmd
}

#[test]
fn test_cli_create_task_success() {
    let temp_dir = create_cli_test_environment();

    ada(&temp_dir)
        .args(["task", "create", "Write report", "--estimate", "45", "--priority", "high"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created task with ID: 1"))
        .stdout(predicate::str::contains("### 1. Write report"))
        .stdout(predicate::str::contains("45m"));
}

#[test]
fn test_cli_requires_user() {
    let temp_dir = create_cli_test_environment();

    flowin_cmd(&temp_dir)
        .args(["task", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("FLOWIN_USER"))
        .stderr(predicate::str::contains("Unauthorized"));
}

#[test]
fn test_cli_user_from_environment() {
    let temp_dir = create_cli_test_environment();

    flowin_cmd(&temp_dir)
        .env("FLOWIN_USER", "ada@example.com")
        .args(["task", "create", "From env"])
        .assert()
        .success();

    ada(&temp_dir)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("From env"));
}

#[test]
fn test_cli_rejects_malformed_email() {
    let temp_dir = create_cli_test_environment();

    flowin_cmd(&temp_dir)
        .args(["--user", "not-an-email", "task", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("email"));
}

#[test]
fn test_cli_list_empty_tasks() {
    let temp_dir = create_cli_test_environment();

    ada(&temp_dir)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));
}

#[test]
fn test_cli_tasks_are_per_user() {
    let temp_dir = create_cli_test_environment();

    ada(&temp_dir)
        .args(["task", "create", "Private task"])
        .assert()
        .success();

    flowin_cmd(&temp_dir)
        .args(["--user", "bob@example.com", "task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));

    flowin_cmd(&temp_dir)
        .args(["--user", "bob@example.com", "task", "show", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task with ID 1 not found"));
}

#[test]
fn test_cli_task_lifecycle() {
    let temp_dir = create_cli_test_environment();

    ada(&temp_dir)
        .args(["task", "create", "Review PR"])
        .assert()
        .success();

    ada(&temp_dir)
        .args(["task", "start", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("status: in_progress"));

    ada(&temp_dir)
        .args(["task", "complete", "1", "--actual", "40"])
        .assert()
        .success()
        .stdout(predicate::str::contains("status: completed"))
        .stdout(predicate::str::contains("Duration: 40m"));

    ada(&temp_dir)
        .args(["task", "update", "1", "--status", "pending"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot change task status"));
}

#[test]
fn test_cli_delete_cancels_task() {
    let temp_dir = create_cli_test_environment();

    ada(&temp_dir)
        .args(["task", "create", "Old idea"])
        .assert()
        .success();

    ada(&temp_dir)
        .args(["task", "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled task 'Old idea' (ID: 1)"));

    ada(&temp_dir)
        .args(["task", "list", "--status", "cancelled"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Old idea"));
}

#[test]
fn test_cli_list_filters_and_sorting() {
    let temp_dir = create_cli_test_environment();

    for (title, priority) in [("Alpha", "low"), ("Bravo", "high"), ("Charlie", "medium")] {
        ada(&temp_dir)
            .args(["task", "create", title, "--priority", priority])
            .assert()
            .success();
    }

    let output = ada(&temp_dir)
        .args(["task", "list", "--sort-by", "priority", "--order", "desc"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let bravo = stdout.find("Bravo").unwrap();
    let charlie = stdout.find("Charlie").unwrap();
    let alpha = stdout.find("Alpha").unwrap();
    assert!(bravo < charlie && charlie < alpha);

    ada(&temp_dir)
        .args(["task", "list", "--search", "rav"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bravo"))
        .stdout(predicate::str::contains("Alpha").not());
}

#[test]
fn test_cli_rejects_unknown_priority() {
    let temp_dir = create_cli_test_environment();

    ada(&temp_dir)
        .args(["task", "create", "Bad", "--priority", "urgent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_cli_onboarding_flow() {
    let temp_dir = create_cli_test_environment();

    ada(&temp_dir)
        .args(["onboarding", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Onboarding not started"));

    ada(&temp_dir)
        .args(["onboarding", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Onboarding: first_tasks"));

    ada(&temp_dir)
        .args([
            "onboarding",
            "first-tasks",
            "Write report:45:high",
            "Inbox zero:20",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 2 tasks"));

    ada(&temp_dir)
        .args(["onboarding", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Onboarding: completed"));
}

#[test]
fn test_cli_plan_and_blocks() {
    let temp_dir = create_cli_test_environment();

    ada(&temp_dir)
        .args(["task", "create", "Deep work", "--estimate", "90"])
        .assert()
        .success();

    ada(&temp_dir)
        .args(["plan", "open", "2025-03-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Plan for 2025-03-10 (ID: 1)"))
        .stdout(predicate::str::contains("No time blocks in this plan."));

    ada(&temp_dir)
        .args(["block", "add", "1", "1", "09:00", "90"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added time block with ID: 1"))
        .stdout(predicate::str::contains("Plan total: 1h 30m"));

    ada(&temp_dir)
        .args(["block", "add", "1", "1", "10:00", "300"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan total: 6h 30m"))
        .stdout(predicate::str::contains("Overlaps time blocks: 1"))
        .stdout(predicate::str::contains("Warning"));

    ada(&temp_dir)
        .args(["block", "delete", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan total: 1h 30m"));

    ada(&temp_dir)
        .args(["plan", "summary", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1h 30m of 9h available"));

    ada(&temp_dir)
        .args(["plan", "finalize", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("finalized"));

    ada(&temp_dir)
        .args(["block", "add", "1", "1", "14:00", "30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("finalized"));
}

#[test]
fn test_cli_plan_by_date_does_not_create() {
    let temp_dir = create_cli_test_environment();

    ada(&temp_dir)
        .args(["plan", "date", "2025-03-11"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plan for 2025-03-11"));

    ada(&temp_dir)
        .args(["plan", "open", "2025-03-11", "--start", "18:00", "--end", "09:00"])
        .assert()
        .failure();
}

#[test]
fn test_cli_default_command_opens_today() {
    let temp_dir = create_cli_test_environment();

    ada(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("# Plan for"))
        .stdout(predicate::str::contains("Working hours: 09:00-18:00"));
}

#[test]
fn test_cli_reflection_flow() {
    let temp_dir = create_cli_test_environment();

    ada(&temp_dir)
        .args(["plan", "open", "2025-03-10"])
        .assert()
        .success();

    ada(&temp_dir)
        .args([
            "reflect",
            "create",
            "1",
            "--satisfaction",
            "4",
            "--completed",
            "2",
            "--total",
            "3",
            "--achievements",
            "Shipped the report",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded reflection with ID: 1"));

    ada(&temp_dir)
        .args(["reflect", "create", "1", "-s", "3", "-c", "0", "-t", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already has a reflection"));

    ada(&temp_dir)
        .args(["reflect", "update", "1", "--energy", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("energy: 2/5"));

    ada(&temp_dir)
        .args(["reflect", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Shipped the report"));

    ada(&temp_dir)
        .args(["reflect", "create", "1", "-s", "6", "-c", "0", "-t", "0"])
        .assert()
        .failure();
}

#[test]
fn test_cli_export_csv_to_directory() {
    let temp_dir = create_cli_test_environment();
    let out_dir = temp_dir.path().join("exports");
    fs::create_dir(&out_dir).unwrap();

    ada(&temp_dir)
        .args(["task", "create", "Call \"Bob\", later"])
        .assert()
        .success();

    ada(&temp_dir)
        .args(["export", "tasks", "--format", "csv", "--output"])
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported to"));

    let files: Vec<_> = fs::read_dir(&out_dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_str().unwrap().to_string();
    assert!(name.starts_with("tasks_") && name.ends_with(".csv"));

    let mut reader = csv::Reader::from_path(&files[0]).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[1], "title");
    let rows: Vec<_> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][1], "Call \"Bob\", later");
    assert_eq!(&rows[0][4], "pending");
}

#[test]
fn test_cli_export_json_to_stdout() {
    let temp_dir = create_cli_test_environment();

    ada(&temp_dir)
        .args(["task", "create", "Plan sprint"])
        .assert()
        .success();

    let output = ada(&temp_dir)
        .args(["export", "tasks", "--status", "pending"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let tasks: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tasks.as_array().unwrap().len(), 1);
    assert_eq!(tasks[0]["title"], "Plan sprint");
}

#[test]
fn test_cli_export_rejects_reversed_window() {
    let temp_dir = create_cli_test_environment();

    ada(&temp_dir)
        .args([
            "export",
            "reflections",
            "--start",
            "2025-03-10",
            "--end",
            "2025-03-01",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("end_date"));
}

#[test]
fn test_cli_stats_commands() {
    let temp_dir = create_cli_test_environment();

    ada(&temp_dir)
        .args(["stats", "week", "2025-03-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-03-10"));

    ada(&temp_dir)
        .args(["stats", "trend", "--days", "7"])
        .assert()
        .success();

    ada(&temp_dir)
        .args(["stats", "trend", "--days", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("days"));

    ada(&temp_dir)
        .args(["stats", "allocation", "2025-03-01", "2025-03-31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No time recorded."));

    ada(&temp_dir)
        .args(["stats", "satisfaction"])
        .assert()
        .success();
}
