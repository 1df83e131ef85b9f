use flowin_core::{
    db::migrations::SCHEMA_VERSION,
    models::{SortOrder, TaskChanges, TaskFilter, TaskSort},
    params::{CreateReflection, CreateTask, FirstTask},
    Database, PlannerError, Priority, TaskStatus,
};
use jiff::civil::Date;
use tempfile::NamedTempFile;

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn plan_date() -> Date {
    Date::new(2025, 1, 15).unwrap()
}

fn create_task(db: &mut Database, user_id: u64, title: &str, priority: Priority) -> u64 {
    db.create_task(
        user_id,
        &CreateTask {
            title: title.to_string(),
            priority: Some(priority),
            ..Default::default()
        },
    )
    .unwrap()
    .id
}

fn first_task(title: &str) -> FirstTask {
    FirstTask {
        title: title.to_string(),
        estimated_minutes: 30,
        priority: Priority::Medium,
    }
}

#[test]
fn test_database_initialization() {
    let (temp_file, db) = create_test_db();
    assert!(temp_file.path().exists());
    assert_eq!(db.schema_version().unwrap(), SCHEMA_VERSION);

    // Reopening an initialized file is a no-op
    let reopened = Database::new(temp_file.path()).expect("Failed to reopen database");
    assert_eq!(reopened.schema_version().unwrap(), SCHEMA_VERSION);
}

#[test]
fn test_upsert_user_returns_existing_row() {
    let (_temp_file, mut db) = create_test_db();

    let first = db.upsert_user("ada@example.com").unwrap();
    let second = db.upsert_user("ada@example.com").unwrap();
    assert_eq!(first, second);

    let other = db.upsert_user("bob@example.com").unwrap();
    assert_ne!(first.id, other.id);
}

#[test]
fn test_create_and_get_task() {
    let (_temp_file, mut db) = create_test_db();
    let user = db.upsert_user("ada@example.com").unwrap();

    let task = db
        .create_task(
            user.id,
            &CreateTask {
                title: "Write tests".to_string(),
                description: Some("For the db layer".to_string()),
                estimated_duration_minutes: Some(45),
                priority: Some(Priority::High),
            },
        )
        .unwrap();

    let fetched = db.get_task(user.id, task.id).unwrap();
    assert_eq!(fetched, task);
    assert_eq!(fetched.estimated_duration_minutes, 45);
    assert_eq!(fetched.priority, Priority::High);
}

#[test]
fn test_update_task_stamps_completion_once() {
    let (_temp_file, mut db) = create_test_db();
    let user = db.upsert_user("ada@example.com").unwrap();
    let task = db
        .create_task(
            user.id,
            &CreateTask {
                title: "Finish".to_string(),
                ..Default::default()
            },
        )
        .unwrap();

    db.update_task(user.id, task.id, &TaskChanges::status(TaskStatus::InProgress))
        .unwrap();
    let done = db
        .update_task(user.id, task.id, &TaskChanges::status(TaskStatus::Completed))
        .unwrap();
    let stamped = done.completed_at.expect("completed_at should be set");

    // Re-requesting the same status is a no-op and keeps the stamp
    let again = db
        .update_task(user.id, task.id, &TaskChanges::status(TaskStatus::Completed))
        .unwrap();
    assert_eq!(again.completed_at, Some(stamped));

    let err = db
        .update_task(user.id, task.id, &TaskChanges::status(TaskStatus::Pending))
        .unwrap_err();
    assert!(matches!(err, PlannerError::InvalidTransition { .. }));
}

#[test]
fn test_cancel_task_from_any_status() {
    let (_temp_file, mut db) = create_test_db();
    let user = db.upsert_user("ada@example.com").unwrap();
    let task = db
        .create_task(
            user.id,
            &CreateTask {
                title: "Cancel me".to_string(),
                ..Default::default()
            },
        )
        .unwrap();

    let cancelled = db.cancel_task(user.id, task.id).unwrap();
    assert_eq!(cancelled.status, TaskStatus::Cancelled);

    let err = db.cancel_task(user.id + 1, task.id).unwrap_err();
    assert!(matches!(err, PlannerError::NotFound { .. }));
}

#[test]
fn test_list_tasks_escapes_like_wildcards() {
    let (_temp_file, mut db) = create_test_db();
    let user = db.upsert_user("ada@example.com").unwrap();

    for title in ["100% done", "1000 items", "snake_case"] {
        db.create_task(
            user.id,
            &CreateTask {
                title: title.to_string(),
                ..Default::default()
            },
        )
        .unwrap();
    }

    let percent = db
        .list_tasks(
            user.id,
            &TaskFilter {
                search: Some("0%".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(percent.len(), 1);
    assert_eq!(percent[0].title, "100% done");

    let underscore = db
        .list_tasks(
            user.id,
            &TaskFilter {
                search: Some("e_c".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(underscore.len(), 1);
    assert_eq!(underscore[0].title, "snake_case");
}

#[test]
fn test_batch_create_is_atomic() {
    let (temp_file, mut db) = create_test_db();
    let user = db.upsert_user("ada@example.com").unwrap();

    // Make the onboarding write fail after the tasks were inserted
    let conn = rusqlite::Connection::open(temp_file.path()).unwrap();
    conn.execute_batch(
        "CREATE TRIGGER fail_onboarding BEFORE INSERT ON onboarding_states \
         BEGIN SELECT RAISE(ABORT, 'onboarding unavailable'); END;",
    )
    .unwrap();
    drop(conn);

    let err = db
        .batch_create_tasks(user.id, &[first_task("One"), first_task("Two")])
        .unwrap_err();
    assert!(matches!(err, PlannerError::Database { .. }));

    assert!(db.all_tasks(user.id, None).unwrap().is_empty());
    assert!(db.get_onboarding(user.id).unwrap().is_none());
}

#[test]
fn test_batch_create_completes_onboarding() {
    let (_temp_file, mut db) = create_test_db();
    let user = db.upsert_user("ada@example.com").unwrap();

    let tasks = db
        .batch_create_tasks(user.id, &[first_task("One"), first_task("Two")])
        .unwrap();
    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().all(|t| t.status == TaskStatus::Pending));

    let state = db.get_onboarding(user.id).unwrap().unwrap();
    assert_eq!(state.current_step, "completed");
    assert!(state.first_tasks_created);

    // Watching the demo afterwards does not move the step back
    let state = db.complete_demo(user.id).unwrap();
    assert_eq!(state.current_step, "completed");
    assert!(state.demo_completed);
}

#[test]
fn test_get_or_create_plan_validates_hours() {
    let (_temp_file, mut db) = create_test_db();
    let user = db.upsert_user("ada@example.com").unwrap();

    let err = db
        .get_or_create_plan(user.id, plan_date(), "18:00", "09:00")
        .unwrap_err();
    assert!(matches!(err, PlannerError::InvalidInput { .. }));

    let plan = db
        .get_or_create_plan(user.id, plan_date(), "08:00", "16:00")
        .unwrap();
    let same = db
        .get_or_create_plan(user.id, plan_date(), "09:00", "18:00")
        .unwrap();
    assert_eq!(plan.id, same.id);
    assert_eq!(same.work_start_time, "08:00");

    // Another user gets their own plan for the same day
    let bob = db.upsert_user("bob@example.com").unwrap();
    let bobs = db
        .get_or_create_plan(bob.id, plan_date(), "09:00", "18:00")
        .unwrap();
    assert_ne!(bobs.id, plan.id);
}

#[test]
fn test_reflection_belongs_to_owned_plan() {
    let (_temp_file, mut db) = create_test_db();
    let ada = db.upsert_user("ada@example.com").unwrap();
    let bob = db.upsert_user("bob@example.com").unwrap();
    let plan = db
        .get_or_create_plan(ada.id, plan_date(), "09:00", "18:00")
        .unwrap();

    let params = CreateReflection {
        daily_plan_id: plan.id,
        satisfaction_rating: 3,
        ..Default::default()
    };

    let err = db.create_reflection(bob.id, &params).unwrap_err();
    assert!(matches!(err, PlannerError::NotFound { .. }));

    db.create_reflection(ada.id, &params).unwrap();
    let err = db.create_reflection(ada.id, &params).unwrap_err();
    assert!(matches!(err, PlannerError::DuplicateReflection { .. }));

    let err = db.get_reflection_by_plan(bob.id, plan.id).unwrap_err();
    assert!(matches!(err, PlannerError::NotFound { .. }));
}

#[test]
fn test_list_tasks_orders_and_pages_in_query() {
    let (_temp_file, mut db) = create_test_db();
    let user = db.upsert_user("ada@example.com").unwrap();
    let low = create_task(&mut db, user.id, "low", Priority::Low);
    let high = create_task(&mut db, user.id, "High", Priority::High);
    let medium = create_task(&mut db, user.id, "medium", Priority::Medium);

    let ids = |filter: &TaskFilter| -> Vec<u64> {
        db.list_tasks(user.id, filter)
            .unwrap()
            .iter()
            .map(|t| t.id)
            .collect()
    };

    // Newest first, ties broken by ID
    assert_eq!(ids(&TaskFilter::default()), vec![medium, high, low]);

    let by_priority = TaskFilter {
        sort_by: TaskSort::Priority,
        sort_order: SortOrder::Desc,
        limit: 2,
        ..Default::default()
    };
    assert_eq!(ids(&by_priority), vec![high, medium]);

    let by_title = TaskFilter {
        sort_by: TaskSort::Title,
        sort_order: SortOrder::Asc,
        offset: 1,
        ..Default::default()
    };
    assert_eq!(ids(&by_title), vec![low, medium]);

    let past_end = TaskFilter {
        offset: 3,
        ..Default::default()
    };
    assert!(ids(&past_end).is_empty());
}

#[test]
fn test_instants_are_stored_fixed_width() {
    let (temp_file, mut db) = create_test_db();
    let user = db.upsert_user("ada@example.com").unwrap();
    create_task(&mut db, user.id, "Stamped", Priority::Medium);

    let conn = rusqlite::Connection::open(temp_file.path()).unwrap();
    let (created, updated): (String, String) = conn
        .query_row("SELECT created_at, updated_at FROM tasks", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .unwrap();
    for stored in [created, updated] {
        assert_eq!(stored.len(), "2025-01-15T09:00:00.000000000Z".len());
        assert!(stored.ends_with('Z'));
    }
}

#[test]
fn test_task_summary_counts_per_status() {
    let (_temp_file, mut db) = create_test_db();
    let user = db.upsert_user("ada@example.com").unwrap();
    let bob = db.upsert_user("bob@example.com").unwrap();
    let done = create_task(&mut db, user.id, "Done", Priority::High);
    create_task(&mut db, user.id, "Open", Priority::Low);
    let dropped = create_task(&mut db, user.id, "Dropped", Priority::Low);
    create_task(&mut db, bob.id, "Bob's", Priority::Low);

    db.update_task(user.id, done, &TaskChanges::status(TaskStatus::InProgress))
        .unwrap();
    db.update_task(user.id, done, &TaskChanges::status(TaskStatus::Completed))
        .unwrap();
    db.cancel_task(user.id, dropped).unwrap();

    let summary = db.task_summary(user.id).unwrap();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.pending, 1);
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.cancelled, 1);
    assert_eq!(summary.in_progress, 0);

    let empty = db.upsert_user("carol@example.com").unwrap();
    assert_eq!(db.task_summary(empty.id).unwrap().total, 0);
}

#[test]
fn test_recent_reflections_newest_first_with_limit() {
    let (_temp_file, mut db) = create_test_db();
    let user = db.upsert_user("ada@example.com").unwrap();

    let mut ids = Vec::new();
    for day in 1..=3 {
        let plan = db
            .get_or_create_plan(user.id, Date::new(2025, 2, day).unwrap(), "09:00", "18:00")
            .unwrap();
        let reflection = db
            .create_reflection(
                user.id,
                &CreateReflection {
                    daily_plan_id: plan.id,
                    satisfaction_rating: 4,
                    ..Default::default()
                },
            )
            .unwrap();
        ids.push(reflection.id);
    }

    let recent: Vec<u64> = db
        .recent_reflections(user.id, 2)
        .unwrap()
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(recent, vec![ids[2], ids[1]]);

    let all: Vec<u64> = db
        .all_reflections(user.id)
        .unwrap()
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(all, ids);
}

#[test]
fn test_only_unique_violations_are_duplicate_reflections() {
    let (temp_file, mut db) = create_test_db();
    let user = db.upsert_user("ada@example.com").unwrap();
    let plan = db
        .get_or_create_plan(user.id, plan_date(), "09:00", "18:00")
        .unwrap();

    let conn = rusqlite::Connection::open(temp_file.path()).unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_reflection BEFORE INSERT ON reflections \
         BEGIN SELECT RAISE(ABORT, 'reflections unavailable'); END;",
    )
    .unwrap();
    drop(conn);

    let err = db
        .create_reflection(
            user.id,
            &CreateReflection {
                daily_plan_id: plan.id,
                satisfaction_rating: 3,
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, PlannerError::Database { .. }));
}

#[test]
fn test_task_description_can_be_cleared() {
    let (_temp_file, mut db) = create_test_db();
    let user = db.upsert_user("ada@example.com").unwrap();
    let task = db
        .create_task(
            user.id,
            &CreateTask {
                title: "Write report".to_string(),
                description: Some("Quarterly numbers".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    let renamed = db
        .update_task(
            user.id,
            task.id,
            &TaskChanges {
                title: Some("Write summary".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(renamed.description.as_deref(), Some("Quarterly numbers"));

    let cleared = db
        .update_task(
            user.id,
            task.id,
            &TaskChanges {
                description: Some(String::new()),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(cleared.description.is_none());
    assert_eq!(cleared.title, "Write summary");
}

#[test]
fn test_empty_task_update_leaves_row_untouched() {
    let (_temp_file, mut db) = create_test_db();
    let user = db.upsert_user("ada@example.com").unwrap();
    let id = create_task(&mut db, user.id, "Steady", Priority::Medium);
    let before = db.get_task(user.id, id).unwrap();

    let after = db.update_task(user.id, id, &TaskChanges::default()).unwrap();
    assert_eq!(after.updated_at, before.updated_at);
    assert_eq!(after, before);

    let err = db
        .update_task(user.id, 9999, &TaskChanges::default())
        .unwrap_err();
    assert!(matches!(err, PlannerError::NotFound { .. }));
}
