use anyhow::Result;
use campo_core::{Category, TaskStore};
use owo_colors::OwoColorize;

pub async fn list(store: &TaskStore) -> Result<()> {
    for category in store.categories().await {
        println!(
            "  {:<16} {:<24} {} {}",
            category.key.bold(),
            category.label,
            category.color.dimmed(),
            category.icon.dimmed()
        );
    }
    Ok(())
}

pub async fn add(
    store: &TaskStore,
    key: String,
    color: String,
    label: Option<String>,
    icon: String,
) -> Result<()> {
    let label = label.unwrap_or_else(|| key.clone());
    store
        .add_category(Category::new(key.clone(), color, label, icon))
        .await?;
    println!("Saved category {}", key.bold());
    Ok(())
}

pub async fn rm(store: &TaskStore, key: &str) -> Result<()> {
    store.remove_category(key).await?;
    println!("Removed category {} (existing tasks keep the key)", key.bold());
    Ok(())
}
