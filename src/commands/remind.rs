use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use campo_core::{NotificationScheduler, TaskStore};
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use crate::notifier::DesktopNotifier;

pub async fn run(store: &TaskStore, date: NaiveDate, lead: i64) -> Result<()> {
    let scheduler = NotificationScheduler::new(Arc::new(DesktopNotifier));
    scheduler.request_permission().await;

    let tasks = store.tasks_for(date).await;
    let mut scheduled = 0;

    for task in &tasks {
        if task.completed {
            continue;
        }
        if let Some(id) = scheduler.notify_task(task, date, lead).await {
            if let Some(at) = scheduler.scheduled_for(&id).await {
                println!(
                    "  {} {} at {}",
                    "reminder".green(),
                    task.title.bold(),
                    at.format("%H:%M")
                );
            }
            scheduled += 1;
        }
    }

    if scheduled == 0 {
        println!(
            "{}",
            "No upcoming timed tasks to remind about".dimmed()
        );
        return Ok(());
    }

    println!(
        "Waiting for {} reminder(s), {} min before each task. Ctrl-C to stop.",
        scheduled, lead
    );
    while scheduler.pending_count().await > 0 {
        tokio::time::sleep(Duration::from_millis(250)).await;
    }
    println!("All reminders delivered");
    Ok(())
}
