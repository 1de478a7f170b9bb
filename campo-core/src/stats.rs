//! Derived statistics over the task and category collections.
//!
//! Statistics are re-derived on every read; nothing here is cached or
//! incremental.

use chrono::NaiveDate;

use crate::category::Category;
use crate::date_key::DateKey;
use crate::store::TaskMap;

/// Total/completed/pending counts for one scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl Counts {
    fn add(&mut self, completed: bool) {
        self.total += 1;
        if completed {
            self.completed += 1;
        } else {
            self.pending += 1;
        }
    }
}

/// Per-category totals. One entry exists for every known category, in
/// category order, even when its counts are zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStats {
    pub category: Category,
    pub total: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Counts restricted to the bucket for `today`.
    pub today: Counts,
    pub per_category: Vec<CategoryStats>,
}

/// Compute statistics for the given collections, with `today` supplied by
/// the caller so the derivation stays a pure function.
///
/// Tasks referencing a removed category count toward the overall totals
/// but appear in no per-category entry.
pub fn compute(tasks: &TaskMap, categories: &[Category], today: NaiveDate) -> Statistics {
    let today_key = DateKey::from_date(today);

    let mut overall = Counts::default();
    let mut today_counts = Counts::default();

    for (key, bucket) in tasks {
        for task in bucket {
            overall.add(task.completed);
            if *key == today_key {
                today_counts.add(task.completed);
            }
        }
    }

    let per_category = categories
        .iter()
        .map(|category| {
            let mut total = 0;
            let mut completed = 0;
            for task in tasks.values().flatten() {
                if task.category == category.key {
                    total += 1;
                    if task.completed {
                        completed += 1;
                    }
                }
            }
            CategoryStats {
                category: category.clone(),
                total,
                completed,
            }
        })
        .collect();

    Statistics {
        total: overall.total,
        completed: overall.completed,
        pending: overall.pending,
        today: today_counts,
        per_category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::default_categories;
    use crate::task::{Task, TaskDraft};
    use chrono::Utc;

    fn insert(tasks: &mut TaskMap, date: &str, category: &str, completed: bool) {
        let mut task = Task::create(TaskDraft::new("t", category), Utc::now());
        task.completed = completed;
        tasks
            .entry(DateKey::parse(date).unwrap())
            .or_default()
            .push(task);
    }

    #[test]
    fn test_overall_and_today_counts() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        let mut tasks = TaskMap::new();
        insert(&mut tasks, "2024-03-06", "saude", true);
        insert(&mut tasks, "2024-03-06", "saude", false);
        insert(&mut tasks, "2024-03-07", "geral", false);

        let stats = compute(&tasks, &default_categories(), today);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 2);
        assert_eq!(
            stats.today,
            Counts {
                total: 2,
                completed: 1,
                pending: 1
            }
        );
    }

    #[test]
    fn test_every_category_has_an_entry() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        let categories = default_categories();
        let mut tasks = TaskMap::new();
        insert(&mut tasks, "2024-03-06", "saude", true);

        let stats = compute(&tasks, &categories, today);

        assert_eq!(stats.per_category.len(), categories.len());
        for (entry, category) in stats.per_category.iter().zip(&categories) {
            assert_eq!(entry.category.key, category.key, "category order kept");
        }
        let saude = stats
            .per_category
            .iter()
            .find(|e| e.category.key == "saude")
            .unwrap();
        assert_eq!((saude.total, saude.completed), (1, 1));
        let geral = stats
            .per_category
            .iter()
            .find(|e| e.category.key == "geral")
            .unwrap();
        assert_eq!((geral.total, geral.completed), (0, 0));
    }

    #[test]
    fn test_dangling_category_counts_in_totals_only() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        let mut tasks = TaskMap::new();
        insert(&mut tasks, "2024-03-06", "removida", false);

        let stats = compute(&tasks, &default_categories(), today);

        assert_eq!(stats.total, 1);
        let assigned: usize = stats.per_category.iter().map(|e| e.total).sum();
        assert_eq!(assigned, 0);
    }

    #[test]
    fn test_empty_map() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        let stats = compute(&TaskMap::new(), &default_categories(), today);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.today, Counts::default());
        assert_eq!(stats.per_category.len(), default_categories().len());
    }
}
