use flowin_core::{Planner, PlannerBuilder, User};
use jiff::tz::TimeZone;
use tempfile::TempDir;

/// Helper function to create a test planner on UTC
pub async fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_time_zone(TimeZone::UTC)
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

/// Registers (or reuses) a user for the given email.
pub async fn login(planner: &Planner, email: &str) -> User {
    planner
        .authenticate(Some(email))
        .await
        .expect("Failed to authenticate")
}
