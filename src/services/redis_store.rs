use redis::{Client, Commands};
use std::sync::Arc;
use crate::errors::StorageResult;
use super::storage::KeyValueStore;

// Keys are written verbatim, so `taskly.tasks.alice` is a plain Redis string key.
pub struct RedisStore {
    client: Arc<Client>,
}

impl RedisStore {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    pub fn open(url: &str) -> StorageResult<Self> {
        Ok(Self::new(Arc::new(Client::open(url)?)))
    }
}

impl KeyValueStore for RedisStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let mut conn = self.client.get_connection()?;
        let value: Option<String> = conn.get(key)?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut conn = self.client.get_connection()?;
        conn.set::<_, _, ()>(key, value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut conn = self.client.get_connection()?;
        conn.del::<_, ()>(key)?;
        Ok(())
    }
}
