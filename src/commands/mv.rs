use anyhow::Result;
use campo_core::TaskStore;
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use super::resolve_task_id;

pub async fn run(store: &TaskStore, from: NaiveDate, to: NaiveDate, id: &str) -> Result<()> {
    let task_id = resolve_task_id(store, from, id).await?;

    store.move_task(from, to, &task_id).await?;

    let tasks = store.tasks_for(to).await;
    if let Some(task) = tasks.iter().find(|t| t.id == task_id) {
        println!("Moved {} to {}", task.title.bold(), to);
    }
    Ok(())
}
