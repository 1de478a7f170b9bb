//! Core logic for the campo farm task calendar.
//!
//! This crate owns the date-indexed task collection and everything derived
//! from it:
//! - [`store::TaskStore`] for mutations with persist-through writes
//! - [`filter`] for filtered, ordered day views
//! - [`stats`] for aggregate statistics
//! - [`grid`] for month/week calendar cell layouts
//! - [`notify`] for deferred, cancellable task reminders
//!
//! The presentation layer (campo-cli, or any other front end) talks to
//! these modules and provides the platform glue: a [`storage::Storage`]
//! backend and a [`notify::NotifyCapability`].

pub mod category;
pub mod date_key;
pub mod error;
pub mod filter;
pub mod grid;
pub mod notify;
pub mod stats;
pub mod storage;
pub mod store;
pub mod task;

pub use category::{Category, default_categories};
pub use date_key::DateKey;
pub use error::{CampoError, CampoResult};
pub use filter::{FilterSpec, StatusFilter, filter_tasks};
pub use grid::{GridCell, ViewMode, grid_cells, month_cells, week_cells};
pub use notify::{
    Clock, NotificationScheduler, NotifyAction, NotifyCapability, NotifyOptions, Permission,
    SystemClock,
};
pub use stats::{CategoryStats, Counts, Statistics};
pub use storage::{JsonFileStorage, MemoryStorage, Storage};
pub use store::{TaskMap, TaskStore};
pub use task::{Task, TaskDraft, TaskPatch};
