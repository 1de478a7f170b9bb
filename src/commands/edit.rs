use anyhow::Result;
use campo_core::{TaskPatch, TaskStore};
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use super::resolve_task_id;

pub async fn run(
    store: &TaskStore,
    date: NaiveDate,
    id: &str,
    title: Option<String>,
    time: Option<String>,
    category: Option<String>,
) -> Result<()> {
    if title.is_none() && time.is_none() && category.is_none() {
        anyhow::bail!("Nothing to change. Pass --title, --time or --category");
    }

    let task_id = resolve_task_id(store, date, id).await?;
    let patch = TaskPatch {
        title,
        category,
        time: time.map(|t| if t == "none" { None } else { Some(t) }),
        ..Default::default()
    };
    store.update(date, &task_id, patch).await?;

    let tasks = store.tasks_for(date).await;
    if let Some(task) = tasks.iter().find(|t| t.id == task_id) {
        println!("Updated {}", task.title.bold());
    }
    Ok(())
}
