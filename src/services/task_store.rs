use crate::errors::{AppResult, StorageError};
use crate::models::Task;
use super::storage::{Namespace, SharedStore};

/// Per-user ordered task lists, one JSON array per `tasks.<username>` key.
pub struct TaskStore {
    store: SharedStore,
    namespace: Namespace,
}

impl TaskStore {
    pub fn new(store: SharedStore, namespace: Namespace) -> Self {
        Self { store, namespace }
    }

    // Missing or unparseable data loads as an empty list; only backend failures are errors.
    pub fn load(&self, username: &str) -> AppResult<Vec<Task>> {
        let key = self.namespace.tasks(username);
        let Some(raw) = self.store.get(&key)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(tasks) => Ok(tasks),
            Err(e) => {
                tracing::warn!("Ignoring corrupt task list under {}: {}", key, e);
                Ok(Vec::new())
            }
        }
    }

    pub fn save(&self, username: Option<&str>, tasks: &[Task]) -> AppResult<()> {
        let Some(username) = username else {
            tracing::debug!("No active user, skipping task save");
            return Ok(());
        };
        let raw = serde_json::to_string(tasks).map_err(StorageError::from)?;
        self.store.set(&self.namespace.tasks(username), &raw)?;
        Ok(())
    }
}
