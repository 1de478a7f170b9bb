use anyhow::Result;
use campo_core::TaskStore;
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use super::resolve_task_id;

pub async fn run(store: &TaskStore, date: NaiveDate, id: &str) -> Result<()> {
    let task_id = resolve_task_id(store, date, id).await?;
    store.toggle_complete(date, &task_id).await?;

    let tasks = store.tasks_for(date).await;
    if let Some(task) = tasks.iter().find(|t| t.id == task_id) {
        if task.completed {
            println!("Completed {}", task.title.bold());
        } else {
            println!("Reopened {}", task.title.bold());
        }
    }
    Ok(())
}
