use std::collections::HashSet;

use anyhow::Result;
use campo_core::{FilterSpec, StatusFilter, TaskStore};
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use super::short_id;

pub async fn run(
    store: &TaskStore,
    date: NaiveDate,
    categories: Vec<String>,
    status: StatusFilter,
    search: Option<String>,
) -> Result<()> {
    let spec = FilterSpec {
        categories: categories.into_iter().collect::<HashSet<_>>(),
        status,
        search: search.unwrap_or_default(),
    };

    let tasks = store.filtered(date, &spec).await;
    if tasks.is_empty() {
        println!("{}", format!("No tasks for {}", date).dimmed());
        return Ok(());
    }

    let known = store.categories().await;
    println!("{}", date.format("%A, %-d %B %Y").to_string().bold());

    for task in &tasks {
        let mark = if task.completed { "✓" } else { " " };
        let time = match task.parsed_time() {
            Some(_) => task.time.clone().unwrap_or_default(),
            None => "--:--".to_string(),
        };
        let label = known
            .iter()
            .find(|c| c.key == task.category)
            .map(|c| c.label.as_str())
            // Dangling category references are tolerated by the store
            .unwrap_or("unknown category");

        let title = if task.completed {
            task.title.dimmed().to_string()
        } else {
            task.title.to_string()
        };
        println!(
            "  [{}] {:>5} {} {} {}",
            mark,
            time,
            title,
            format!("({})", label).dimmed(),
            format!("[{}]", short_id(&task.id)).dimmed()
        );
    }

    Ok(())
}
