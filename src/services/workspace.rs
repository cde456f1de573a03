use std::sync::Arc;
use crate::config::{Config, StorageBackend};
use crate::errors::StorageResult;
use super::auth_session::AuthSessionManager;
use super::credential_store::CredentialStore;
use super::password::PasswordHasher;
use super::preferences::Preferences;
use super::redis_store::RedisStore;
use super::storage::{FileStore, MemoryStore, Namespace, SharedStore};
use super::task_list::TaskListEngine;
use super::task_store::TaskStore;

/// Everything a presentation layer talks to, wired over one key-value store.
pub struct Workspace {
    pub auth: AuthSessionManager,
    pub tasks: TaskListEngine,
    pub preferences: Preferences,
}

impl Workspace {
    pub fn new(store: SharedStore, config: &Config) -> Self {
        let namespace = Namespace::new(config.storage.namespace.clone());
        let hasher = PasswordHasher::from_config(&config.auth);
        if hasher == PasswordHasher::Legacy {
            tracing::warn!("Using the legacy password hash, which is not suitable for real authentication");
        }

        let credentials = CredentialStore::new(store.clone(), &namespace, hasher);
        Self {
            auth: AuthSessionManager::new(credentials, store.clone(), &namespace),
            preferences: Preferences::new(store.clone(), &namespace),
            tasks: TaskListEngine::new(TaskStore::new(store, namespace)),
        }
    }
}

pub fn open_store(config: &Config) -> StorageResult<SharedStore> {
    let store: SharedStore = match config.storage.backend {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::File => Arc::new(FileStore::open(&config.storage.path)?),
        StorageBackend::Redis => Arc::new(RedisStore::open(&config.storage.redis_url)?),
    };
    tracing::info!("Using {:?} storage backend", config.storage.backend);
    Ok(store)
}
