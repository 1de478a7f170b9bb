//! Durable key-value slots backing the task store.
//!
//! The store round-trips whole collections through a small fixed set of
//! logical slots. Callers must tolerate absent slots and fall back to
//! documented defaults; no schema versioning is defined.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::{CampoError, CampoResult};

/// Logical slot keys. These match the original dashboard's storage keys.
pub mod slots {
    pub const TASKS: &str = "tarefas";
    pub const CATEGORIES: &str = "categorias";
    pub const VIEW_MODE: &str = "modo_visualizacao";
}

/// A durable key-value slot store.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read a slot. `Ok(None)` means the slot has never been written.
    async fn get(&self, key: &str) -> CampoResult<Option<Value>>;

    /// Replace a slot's value. Failures propagate to the caller of the
    /// mutating operation; a dropped task edit must never be silent.
    async fn set(&self, key: &str, value: Value) -> CampoResult<()>;
}

/// One JSON file per slot under a data directory.
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonFileStorage { dir: dir.into() }
    }

    /// Storage under the platform data directory (e.g. `~/.local/share/campo`).
    pub fn default_dir() -> CampoResult<Self> {
        let dir = dirs::data_dir()
            .ok_or_else(|| CampoError::Storage("Could not determine data directory".into()))?
            .join("campo");
        Ok(Self::new(dir))
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl Storage for JsonFileStorage {
    async fn get(&self, key: &str) -> CampoResult<Option<Value>> {
        let path = self.slot_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = tokio::fs::read_to_string(&path).await?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    async fn set(&self, key: &str, value: Value) -> CampoResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.slot_path(key);
        let temp = self.dir.join(format!("{key}.json.tmp"));

        // Write-then-rename so a crash mid-write can't corrupt the slot
        tokio::fs::write(&temp, serde_json::to_string_pretty(&value)?).await?;
        tokio::fs::rename(&temp, &path).await?;

        tracing::debug!(slot = key, "persisted slot");
        Ok(())
    }
}

/// In-memory storage for tests and ephemeral use.
#[derive(Default)]
pub struct MemoryStorage {
    slots: RwLock<HashMap<String, Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> CampoResult<Option<Value>> {
        Ok(self.slots.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> CampoResult<()> {
        self.slots.write().await.insert(key.to_string(), value);
        Ok(())
    }
}
