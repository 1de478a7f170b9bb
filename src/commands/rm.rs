use anyhow::Result;
use campo_core::TaskStore;
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use super::resolve_task_id;

pub async fn run(store: &TaskStore, date: NaiveDate, id: &str) -> Result<()> {
    let task_id = resolve_task_id(store, date, id).await?;

    let tasks = store.tasks_for(date).await;
    let title = tasks
        .iter()
        .find(|t| t.id == task_id)
        .map(|t| t.title.clone())
        .unwrap_or_default();

    store.delete(date, &task_id).await?;
    println!("Deleted {}", title.bold());
    Ok(())
}
