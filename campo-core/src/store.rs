//! The task store: a date-indexed task collection with persist-through
//! writes.
//!
//! Every mutation holds one writer lock across the whole
//! read-modify-write-persist span. Persistence is asynchronous, so without
//! that lock two rapid mutations could each snapshot the map, and the
//! second write would silently drop the first. Readers take the same lock
//! briefly and always see the latest applied mutation.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use tokio::sync::Mutex;

use crate::category::{Category, default_categories};
use crate::date_key::DateKey;
use crate::error::CampoResult;
use crate::filter::{FilterSpec, filter_tasks};
use crate::grid::ViewMode;
use crate::stats::{self, Statistics};
use crate::storage::{Storage, slots};
use crate::task::{Task, TaskDraft, TaskPatch};

/// The date-indexed task collection. Invariant: a date with zero tasks is
/// absent from the map, never present with an empty bucket.
pub type TaskMap = BTreeMap<DateKey, Vec<Task>>;

struct State {
    tasks: TaskMap,
    categories: Vec<Category>,
}

/// Owns the task and category collections and persists every mutation
/// through the backing [`Storage`].
pub struct TaskStore {
    state: Mutex<State>,
    storage: Arc<dyn Storage>,
}

impl TaskStore {
    /// Load the store from storage, falling back to an empty task map and
    /// the seeded default categories when the slots are absent.
    pub async fn load(storage: Arc<dyn Storage>) -> CampoResult<Self> {
        let tasks = match storage.get(slots::TASKS).await? {
            Some(value) => serde_json::from_value(value)?,
            None => TaskMap::new(),
        };
        let categories = match storage.get(slots::CATEGORIES).await? {
            Some(value) => serde_json::from_value(value)?,
            None => default_categories(),
        };

        Ok(TaskStore {
            state: Mutex::new(State { tasks, categories }),
            storage,
        })
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Create a task in `date`'s bucket and return it.
    pub async fn add(&self, date: NaiveDate, draft: TaskDraft) -> CampoResult<Task> {
        let mut state = self.state.lock().await;

        let task = Task::create(draft, Utc::now());
        let key = DateKey::from_date(date);
        state.tasks.entry(key.clone()).or_default().push(task.clone());

        self.persist_tasks(&state).await?;
        tracing::debug!(id = %task.id, date = %key, "task added");
        Ok(task)
    }

    /// Merge a patch into the task with `task_id` in `date`'s bucket.
    /// A stale id is a silent no-op.
    pub async fn update(&self, date: NaiveDate, task_id: &str, patch: TaskPatch) -> CampoResult<()> {
        let mut state = self.state.lock().await;

        let key = DateKey::from_date(date);
        let changed = match state
            .tasks
            .get_mut(&key)
            .and_then(|bucket| bucket.iter_mut().find(|t| t.id == task_id))
        {
            Some(task) => {
                task.apply(patch, Utc::now());
                true
            }
            None => false,
        };

        if !changed {
            return Ok(());
        }
        self.persist_tasks(&state).await
    }

    /// Remove the task with `task_id` from `date`'s bucket. A bucket that
    /// becomes empty is removed from the map entirely.
    pub async fn delete(&self, date: NaiveDate, task_id: &str) -> CampoResult<()> {
        let mut state = self.state.lock().await;

        let key = DateKey::from_date(date);
        let Some(bucket) = state.tasks.get_mut(&key) else {
            return Ok(());
        };
        let before = bucket.len();
        bucket.retain(|t| t.id != task_id);
        if bucket.len() == before {
            return Ok(());
        }
        if bucket.is_empty() {
            state.tasks.remove(&key);
        }

        self.persist_tasks(&state).await?;
        tracing::debug!(id = task_id, date = %key, "task deleted");
        Ok(())
    }

    /// Move a task between date buckets, preserving its identity and
    /// fields apart from `updated_at`. Appends to the destination bucket.
    pub async fn move_task(
        &self,
        source: NaiveDate,
        dest: NaiveDate,
        task_id: &str,
    ) -> CampoResult<()> {
        let mut state = self.state.lock().await;

        let source_key = DateKey::from_date(source);
        let Some(bucket) = state.tasks.get_mut(&source_key) else {
            return Ok(());
        };
        let Some(position) = bucket.iter().position(|t| t.id == task_id) else {
            return Ok(());
        };
        let mut task = bucket.remove(position);
        if bucket.is_empty() {
            state.tasks.remove(&source_key);
        }

        task.updated_at = Some(Utc::now());
        let dest_key = DateKey::from_date(dest);
        state.tasks.entry(dest_key.clone()).or_default().push(task);

        self.persist_tasks(&state).await?;
        tracing::debug!(id = task_id, from = %source_key, to = %dest_key, "task moved");
        Ok(())
    }

    /// Flip a task's completion flag. `completed_at` is set when the task
    /// becomes completed and reset to null when it reopens.
    pub async fn toggle_complete(&self, date: NaiveDate, task_id: &str) -> CampoResult<()> {
        let mut state = self.state.lock().await;

        let key = DateKey::from_date(date);
        let changed = match state
            .tasks
            .get_mut(&key)
            .and_then(|bucket| bucket.iter_mut().find(|t| t.id == task_id))
        {
            Some(task) => {
                task.completed = !task.completed;
                task.completed_at = task.completed.then(Utc::now);
                true
            }
            None => false,
        };

        if !changed {
            return Ok(());
        }
        self.persist_tasks(&state).await
    }

    /// Insert a category, replacing any existing one with the same key.
    pub async fn add_category(&self, category: Category) -> CampoResult<()> {
        let mut state = self.state.lock().await;

        match state.categories.iter_mut().find(|c| c.key == category.key) {
            Some(existing) => *existing = category,
            None => state.categories.push(category),
        }

        self.persist_categories(&state).await
    }

    /// Remove a category by key. Tasks referencing it keep the dangling
    /// key and render as "unknown category".
    pub async fn remove_category(&self, key: &str) -> CampoResult<()> {
        let mut state = self.state.lock().await;

        let before = state.categories.len();
        state.categories.retain(|c| c.key != key);
        if state.categories.len() == before {
            return Ok(());
        }

        self.persist_categories(&state).await
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// The tasks in `date`'s bucket, in insertion order.
    pub async fn tasks_for(&self, date: NaiveDate) -> Vec<Task> {
        let state = self.state.lock().await;
        state
            .tasks
            .get(&DateKey::from_date(date))
            .cloned()
            .unwrap_or_default()
    }

    /// The filtered, ordered view of `date`'s bucket.
    pub async fn filtered(&self, date: NaiveDate, spec: &FilterSpec) -> Vec<Task> {
        filter_tasks(self.tasks_for(date).await, spec)
    }

    pub async fn categories(&self) -> Vec<Category> {
        self.state.lock().await.categories.clone()
    }

    /// Statistics over the current collections, with "today" taken from
    /// the local clock.
    pub async fn statistics(&self) -> Statistics {
        let state = self.state.lock().await;
        stats::compute(&state.tasks, &state.categories, Local::now().date_naive())
    }

    /// The last-used calendar view mode, defaulting to month. An absent
    /// or unrecognized stored value falls back rather than failing.
    pub async fn view_mode(&self) -> CampoResult<ViewMode> {
        Ok(match self.storage.get(slots::VIEW_MODE).await? {
            Some(value) => serde_json::from_value(value).unwrap_or_default(),
            None => ViewMode::default(),
        })
    }

    pub async fn set_view_mode(&self, mode: ViewMode) -> CampoResult<()> {
        self.storage
            .set(slots::VIEW_MODE, serde_json::to_value(mode)?)
            .await
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    async fn persist_tasks(&self, state: &State) -> CampoResult<()> {
        self.storage
            .set(slots::TASKS, serde_json::to_value(&state.tasks)?)
            .await
    }

    async fn persist_categories(&self, state: &State) -> CampoResult<()> {
        self.storage
            .set(slots::CATEGORIES, serde_json::to_value(&state.categories)?)
            .await
    }
}
