//! Filtering and ordering of a day's task bucket.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::task::Task;

/// Completion-state filter. Wire keys: `todas`, `concluidas`, `pendentes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl StatusFilter {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "todas" => Some(StatusFilter::All),
            "concluidas" => Some(StatusFilter::Completed),
            "pendentes" => Some(StatusFilter::Pending),
            _ => None,
        }
    }
}

/// A transient filter specification, held by the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    /// Category keys to keep. Empty means no restriction.
    pub categories: HashSet<String>,
    pub status: StatusFilter,
    /// Case-insensitive title substring. Empty means no restriction.
    pub search: String,
}

/// Apply a filter spec to a day's bucket and order the result.
///
/// Ordering: tasks with a valid `HH:MM` time come first, chronologically;
/// untimed tasks (including malformed times) follow in insertion order.
/// The sort is stable, so equal-time and untimed tasks keep their relative
/// order.
pub fn filter_tasks(mut tasks: Vec<Task>, spec: &FilterSpec) -> Vec<Task> {
    if !spec.categories.is_empty() {
        tasks.retain(|t| spec.categories.contains(&t.category));
    }

    match spec.status {
        StatusFilter::All => {}
        StatusFilter::Completed => tasks.retain(|t| t.completed),
        StatusFilter::Pending => tasks.retain(|t| !t.completed),
    }

    if !spec.search.is_empty() {
        let needle = spec.search.to_lowercase();
        tasks.retain(|t| t.title.to_lowercase().contains(&needle));
    }

    tasks.sort_by(|a, b| match (a.parsed_time(), b.parsed_time()) {
        (Some(ta), Some(tb)) => ta.cmp(&tb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    tasks
}
