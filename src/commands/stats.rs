use anyhow::Result;
use campo_core::TaskStore;
use owo_colors::OwoColorize;

pub async fn run(store: &TaskStore) -> Result<()> {
    let stats = store.statistics().await;

    println!("{}", "Tasks".bold());
    println!(
        "  total {}   completed {}   pending {}",
        stats.total,
        stats.completed.green(),
        stats.pending.yellow()
    );
    println!(
        "  today: {} total, {} completed, {} pending",
        stats.today.total, stats.today.completed, stats.today.pending
    );

    println!();
    println!("{}", "By category".bold());
    for entry in &stats.per_category {
        println!(
            "  {:<24} {:>3} / {:<3} {}",
            entry.category.label,
            entry.completed,
            entry.total,
            format!("({})", entry.category.key).dimmed()
        );
    }

    Ok(())
}
