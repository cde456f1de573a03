mod auth_session;
mod credential_store;
mod password;
mod preferences;
mod redis_store;
mod storage;
mod task_list;
mod task_store;
mod workspace;

pub use task_list::TaskListEngine;
pub use workspace::{open_store, Workspace};

#[cfg(test)]
pub use storage::{MemoryStore, SharedStore};
