pub mod add;
pub mod cal;
pub mod category;
pub mod done;
pub mod edit;
pub mod list;
pub mod mv;
pub mod remind;
pub mod rm;
pub mod stats;

use anyhow::Result;
use campo_core::TaskStore;
use chrono::NaiveDate;

/// Resolve a task id from a full id or a unique prefix within the day's
/// bucket. The store treats unknown ids as no-ops, so ambiguity and
/// not-found are reported here, where the user can act on them.
pub async fn resolve_task_id(store: &TaskStore, date: NaiveDate, prefix: &str) -> Result<String> {
    let tasks = store.tasks_for(date).await;

    let matches: Vec<_> = tasks
        .iter()
        .filter(|t| t.id.starts_with(prefix))
        .collect();

    match matches.as_slice() {
        [task] => Ok(task.id.clone()),
        [] => anyhow::bail!("No task matching '{}' on {}", prefix, date),
        several => {
            let ids: Vec<_> = several
                .iter()
                .map(|t| format!("{} ({})", short_id(&t.id), t.title))
                .collect();
            anyhow::bail!("Ambiguous id '{}': {}", prefix, ids.join(", "))
        }
    }
}

/// The first id segment, enough to address a task within one day.
pub fn short_id(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}
