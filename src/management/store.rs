use std::{collections::HashMap, path::PathBuf, sync::RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::{
    config,
    error::{Error, Result},
};

/// Key under which the PKCE code verifier is handed from the redirect to the callback.
pub const VERIFIER_KEY: &str = "verifier";

/// Single-slot-per-key handoff between two page loads.
///
/// The redirect writes a value, the callback takes it back out. Only one
/// writer and one reader exist per key; a new write replaces the old value.
#[async_trait]
pub trait HandoffStore: Send + Sync {
    /// Stores `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Returns the value stored under `key` without removing it.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Removes `key`. Returns whether a value was present.
    async fn remove(&self, key: &str) -> Result<bool>;

    /// Reads and removes the value stored under `key`.
    async fn take(&self, key: &str) -> Result<Option<String>> {
        let value = self.get(key).await?;
        if value.is_some() {
            self.remove(key).await?;
        }
        Ok(value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEntry {
    value: String,
    written_at: DateTime<Utc>,
}

/// Handoff store persisted as JSON in the local data directory.
pub struct FileHandoffStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileHandoffStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    /// Store at `<data_dir>/state/handoff.json`.
    pub fn default_location() -> Self {
        let mut path = config::data_dir();
        path.push("state/handoff.json");
        Self::new(path)
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    async fn load(&self) -> Result<HashMap<String, StoredEntry>> {
        match async_fs::read_to_string(&self.path).await {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(Error::Io(e)),
        }
    }

    async fn persist(&self, entries: &HashMap<String, StoredEntry>) -> Result<()> {
        if entries.is_empty() {
            return match async_fs::remove_file(&self.path).await {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(Error::Io(e)),
                _ => Ok(()),
            };
        }

        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl HandoffStore for FileHandoffStore {
    async fn put(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        entries.insert(
            key.to_string(),
            StoredEntry {
                value: value.to_string(),
                written_at: Utc::now(),
            },
        );
        self.persist(&entries).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        let entries = self.load().await?;
        Ok(entries.get(key).map(|entry| entry.value.clone()))
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        let removed = entries.remove(key).is_some();
        if removed {
            self.persist(&entries).await?;
        }
        Ok(removed)
    }

    async fn take(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        let entry = entries.remove(key);
        if entry.is_some() {
            self.persist(&entries).await?;
        }
        Ok(entry.map(|e| e.value))
    }
}

/// In-memory handoff store, for tests and single-process use.
#[derive(Debug, Default)]
pub struct MemoryHandoffStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryHandoffStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> Error {
    Error::Io(std::io::Error::other(format!("lock poisoned: {}", e)))
}

#[async_trait]
impl HandoffStore for MemoryHandoffStore {
    async fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        Ok(entries.remove(key).is_some())
    }

    async fn take(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        Ok(entries.remove(key))
    }
}
