//! Task records and their creation/update payloads.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A farm task, owned by the date bucket it currently lives in.
///
/// Persisted field names keep the wire format of the original dashboard
/// (`titulo`, `categoria`, ...) so data written by it keeps loading.
/// Fields this core does not reason about ride along in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "categoria")]
    pub category: String,
    /// Optional `HH:MM` wall-clock time. Malformed values are tolerated:
    /// the task is treated as untimed.
    #[serde(rename = "horario", default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(rename = "concluida")]
    pub completed: bool,
    #[serde(rename = "criadaEm")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "atualizadaEm", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Set when the task transitions to completed, reset to an explicit
    /// null when it transitions back.
    #[serde(rename = "concluidaEm", default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    pub(crate) fn create(draft: TaskDraft, now: DateTime<Utc>) -> Self {
        Task {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            category: draft.category,
            time: draft.time,
            completed: false,
            created_at: now,
            updated_at: None,
            completed_at: None,
            extra: draft.extra,
        }
    }

    /// The task's wall-clock time, if present and well-formed.
    pub fn parsed_time(&self) -> Option<NaiveTime> {
        let raw = self.time.as_deref()?;
        NaiveTime::parse_from_str(raw, "%H:%M").ok()
    }

    /// Shallow-merge a patch into this task and refresh `updated_at`.
    pub(crate) fn apply(&mut self, patch: TaskPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(time) = patch.time {
            self.time = time;
        }
        for (key, value) in patch.extra {
            self.extra.insert(key, value);
        }
        self.updated_at = Some(now);
    }
}

/// Input for creating a task. Id, creation timestamp and completion state
/// are assigned by the store.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub category: String,
    pub time: Option<String>,
    pub extra: Map<String, Value>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        TaskDraft {
            title: title.into(),
            category: category.into(),
            time: None,
            extra: Map::new(),
        }
    }

    pub fn at(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }
}

/// A partial update. `None` fields are left untouched; `time` uses a
/// nested option so it can be cleared (`Some(None)`) as well as set.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub time: Option<Option<String>>,
    pub extra: Map<String, Value>,
}
