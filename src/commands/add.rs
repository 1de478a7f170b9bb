use anyhow::Result;
use campo_core::{TaskDraft, TaskStore};
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use super::short_id;

pub async fn run(
    store: &TaskStore,
    date: NaiveDate,
    title: String,
    time: Option<String>,
    category: String,
) -> Result<()> {
    let known = store.categories().await;
    if !known.iter().any(|c| c.key == category) {
        let available: Vec<_> = known.iter().map(|c| c.key.as_str()).collect();
        anyhow::bail!(
            "Unknown category '{}'. Available: {}",
            category,
            available.join(", ")
        );
    }

    let mut draft = TaskDraft::new(title, category);
    draft.time = time;
    let task = store.add(date, draft).await?;

    let when = match &task.time {
        Some(time) => format!("{} {}", date, time),
        None => date.to_string(),
    };
    println!(
        "Added {} {} ({})",
        task.title.bold(),
        format!("[{}]", short_id(&task.id)).dimmed(),
        when
    );
    Ok(())
}
