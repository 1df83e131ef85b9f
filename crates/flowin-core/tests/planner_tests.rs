mod common;

use common::{create_test_planner, login};
use flowin_core::{
    params::{
        AddTimeBlock, CompleteTask, CreateReflection, CreateTask, ExportReflections, ExportTasks,
        Id, OpenPlan, RecentReflections, TrendWindow, WeeklySummary,
    },
    ExportFormat, PlannerError, Priority, TaskStatus,
};

fn block(plan_id: u64, task_id: u64, start: &str, minutes: u32) -> AddTimeBlock {
    AddTimeBlock {
        daily_plan_id: plan_id,
        task_id,
        start_time: start.to_string(),
        planned_duration_minutes: minutes,
        ..Default::default()
    }
}

#[tokio::test]
#[allow(clippy::too_many_lines)]
async fn test_complete_day_workflow() {
    let (_temp_dir, planner) = create_test_planner().await;
    let user = login(&planner, "ada@example.com").await;

    // Backlog
    let mut tasks = Vec::new();
    for (title, minutes, priority) in [
        ("Morning standup", 15, Priority::Medium),
        ("Write design doc", 90, Priority::High),
        ("Answer email", 30, Priority::Low),
    ] {
        let task = planner
            .create_task(
                &user,
                &CreateTask {
                    title: title.to_string(),
                    estimated_duration_minutes: Some(minutes),
                    priority: Some(priority),
                    ..Default::default()
                },
            )
            .await
            .expect("Failed to create task");
        tasks.push(task);
    }

    // Plan today
    let plan = planner
        .open_plan(&user, &OpenPlan::default())
        .await
        .expect("Failed to open plan");
    assert_eq!(plan.plan_date, planner.today());

    for (task, start) in tasks.iter().zip(["09:00", "09:15", "10:45"]) {
        planner
            .add_time_block(
                &user,
                &block(plan.id, task.id, start, task.estimated_duration_minutes),
            )
            .await
            .expect("Failed to add time block");
    }

    let summary = planner
        .plan_summary(&user, &Id { id: plan.id })
        .await
        .expect("Failed to summarize plan");
    assert_eq!(summary.total_planned_minutes, 135);
    assert_eq!(summary.available_minutes, 540);
    assert!(!summary.overallocation.is_overallocated);

    let plan = planner
        .finalize_plan(&user, &Id { id: plan.id })
        .await
        .expect("Failed to finalize plan");
    assert!(plan.is_finalized);
    assert_eq!(plan.time_blocks.len(), 3);

    // Work the day
    for task in &tasks[..2] {
        planner
            .start_task(&user, &Id { id: task.id })
            .await
            .expect("Failed to start task");
        planner
            .complete_task(
                &user,
                &CompleteTask {
                    id: task.id,
                    actual_duration_minutes: None,
                },
            )
            .await
            .expect("Failed to complete task");
    }

    // Reflect
    planner
        .create_reflection(
            &user,
            &CreateReflection {
                daily_plan_id: plan.id,
                completed_tasks_count: 2,
                total_tasks_count: 3,
                satisfaction_rating: 4,
                energy_level: Some(3),
                tomorrow_priorities: Some("Email first".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to create reflection");

    let week = planner
        .weekly_summary(
            &user,
            &WeeklySummary {
                start_date: planner.today().to_string(),
            },
        )
        .await
        .expect("Failed to summarize week");
    assert_eq!(week.total_tasks, 3);
    assert_eq!(week.completed_tasks, 2);
    assert_eq!(week.completion_rate, 67);
    assert_eq!(week.total_minutes, 135);
    assert_eq!(week.daily_breakdown.len(), 1);

    let satisfaction = planner
        .satisfaction_trend(&user, &TrendWindow::default())
        .await
        .expect("Failed to load satisfaction trend");
    assert_eq!(satisfaction.len(), 1);
    assert_eq!(satisfaction[0].satisfaction, 4);
    assert_eq!(satisfaction[0].energy, 3);
}

#[tokio::test]
async fn test_plan_total_after_deleting_a_block() {
    let (_temp_dir, planner) = create_test_planner().await;
    let user = login(&planner, "ada@example.com").await;

    let task = planner
        .create_task(
            &user,
            &CreateTask {
                title: "Focus".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let plan = planner
        .open_plan(
            &user,
            &OpenPlan {
                plan_date: Some("2025-03-10".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let mut ids = Vec::new();
    for (start, minutes) in [("09:00", 30), ("10:00", 45), ("11:00", 15)] {
        let scheduled = planner
            .add_time_block(&user, &block(plan.id, task.id, start, minutes))
            .await
            .unwrap();
        ids.push(scheduled.block.id);
    }

    let removed = planner
        .delete_time_block(&user, &Id { id: ids[1] })
        .await
        .unwrap();
    assert_eq!(removed.total_planned_minutes, 45);

    let plan = planner.get_plan(&user, &Id { id: plan.id }).await.unwrap();
    assert_eq!(plan.total_planned_minutes, 45);
    let remaining: Vec<u64> = plan.time_blocks.iter().map(|b| b.id).collect();
    assert_eq!(remaining, vec![ids[0], ids[2]]);
}

#[tokio::test]
async fn test_task_csv_export_round_trip() {
    let (_temp_dir, planner) = create_test_planner().await;
    let user = login(&planner, "ada@example.com").await;

    let titles = [
        "Plain title",
        "Comma, separated",
        "Quote \"inside\"",
        "Line\nbreak",
    ];
    for title in titles {
        planner
            .create_task(
                &user,
                &CreateTask {
                    title: title.to_string(),
                    description: Some(format!("About {title}")),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    let export = planner
        .export_tasks(
            &user,
            &ExportTasks {
                format: ExportFormat::Csv,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(export.filename.starts_with("tasks_"));
    assert!(export.filename.ends_with(".csv"));

    let mut reader = csv::Reader::from_reader(export.data.as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.get(1), Some("title"));
    assert_eq!(headers.len(), 9);

    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), titles.len());
    for (record, title) in records.iter().zip(titles) {
        assert_eq!(record.get(1), Some(title));
        assert_eq!(record.get(2), Some(format!("About {title}").as_str()));
        assert_eq!(record.get(3), Some("medium"));
        assert_eq!(record.get(4), Some("pending"));
        assert_eq!(record.get(6), Some(""));
    }
}

#[tokio::test]
async fn test_reflection_export_and_window_validation() {
    let (_temp_dir, planner) = create_test_planner().await;
    let user = login(&planner, "ada@example.com").await;

    let err = planner
        .export_reflections(
            &user,
            &ExportReflections {
                format: ExportFormat::Csv,
                start_date: Some("2025-02-01".to_string()),
                end_date: Some("2025-01-01".to_string()),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::InvalidInput { ref field, .. } if field == "end_date"));

    let plan = planner.open_today(&user).await.unwrap();
    planner
        .create_reflection(
            &user,
            &CreateReflection {
                daily_plan_id: plan.id,
                satisfaction_rating: 5,
                achievements: Some("Everything, \"really\"".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let today = planner.today().to_string();
    let export = planner
        .export_reflections(
            &user,
            &ExportReflections {
                format: ExportFormat::Csv,
                start_date: Some(today.clone()),
                end_date: Some(today),
            },
        )
        .await
        .unwrap();

    let mut reader = csv::Reader::from_reader(export.data.as_bytes());
    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get(3), Some("5"));
    assert_eq!(records[0].get(4), Some(""));
    assert_eq!(records[0].get(5), Some("Everything, \"really\""));

    let recent = planner
        .recent_reflections(&user, &RecentReflections { limit: Some(31) })
        .await
        .unwrap_err();
    assert!(matches!(recent, PlannerError::InvalidInput { .. }));
}

#[tokio::test]
async fn test_cancelled_tasks_are_excluded_by_status_filter() {
    let (_temp_dir, planner) = create_test_planner().await;
    let user = login(&planner, "ada@example.com").await;

    let keep = planner
        .create_task(
            &user,
            &CreateTask {
                title: "Keep".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let dropped = planner
        .create_task(
            &user,
            &CreateTask {
                title: "Drop".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    planner.delete_task(&user, &Id { id: dropped.id }).await.unwrap();

    let export = planner
        .export_tasks(
            &user,
            &ExportTasks {
                format: ExportFormat::Csv,
                status: Some(TaskStatus::Cancelled),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let mut reader = csv::Reader::from_reader(export.data.as_bytes());
    let ids: Vec<String> = reader
        .records()
        .map(|r| r.unwrap().get(0).unwrap().to_string())
        .collect();
    assert_eq!(ids, vec![dropped.id.to_string()]);
    assert_ne!(keep.id, dropped.id);
}
