//! In-memory task list of the active session.
//!
//! Every mutating operation edits a copy of the list, writes it through the [`TaskStore`]
//! and only then swaps it in, so a failed write leaves memory as it was. Without an active
//! session all operations fail with `NotAuthenticated`.

use uuid::Uuid;
use crate::errors::{AppError, AppResult};
use crate::models::{FilterMode, Progress, Task};
use super::task_store::TaskStore;

/// The signed-in user together with their loaded list.
#[derive(Debug)]
struct ActiveSession {
    username: String,
    tasks: Vec<Task>,
}

pub struct TaskListEngine {
    store: TaskStore,
    session: Option<ActiveSession>,
}

fn commit(store: &TaskStore, session: &mut ActiveSession, tasks: Vec<Task>) -> AppResult<()> {
    store.save(Some(&session.username), &tasks)?;
    session.tasks = tasks;
    Ok(())
}

impl TaskListEngine {
    pub fn new(store: TaskStore) -> Self {
        Self { store, session: None }
    }

    /// Loads `username`'s list, replacing whatever was in memory.
    pub fn open(&mut self, username: &str) -> AppResult<()> {
        let tasks = self.store.load(username)?;
        tracing::info!("Loaded {} tasks for user {}", tasks.len(), username);
        self.session = Some(ActiveSession { username: username.to_string(), tasks });
        Ok(())
    }

    /// Drops the in-memory list. Persisted data is left alone.
    pub fn close(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::debug!("Discarded in-memory tasks of user {}", session.username);
        }
    }

    pub fn current_user(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.username.as_str())
    }

    fn active(&self) -> AppResult<&ActiveSession> {
        self.session.as_ref().ok_or(AppError::NotAuthenticated)
    }

    /// Full unfiltered list in display order.
    pub fn tasks(&self) -> AppResult<&[Task]> {
        Ok(&self.active()?.tasks)
    }

    pub fn add(&mut self, text: &str) -> AppResult<Option<Task>> {
        let session = self.session.as_mut().ok_or(AppError::NotAuthenticated)?;
        let text = text.trim();
        if text.is_empty() {
            tracing::debug!("Ignoring empty task text");
            return Ok(None);
        }

        let mut id = Uuid::new_v4().to_string();
        while session.tasks.iter().any(|t| t.id == id) {
            id = Uuid::new_v4().to_string();
        }
        let task = Task { id, text: text.to_string(), completed: false };
        let mut tasks = session.tasks.clone();
        tasks.insert(0, task.clone());
        commit(&self.store, session, tasks)?;

        tracing::info!("Added task {} for user {}", task.id, session.username);
        Ok(Some(task))
    }

    /// Returns whether the text actually changed.
    pub fn edit(&mut self, id: &str, new_text: &str) -> AppResult<bool> {
        let session = self.session.as_mut().ok_or(AppError::NotAuthenticated)?;
        let new_text = new_text.trim();
        let mut tasks = session.tasks.clone();
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            tracing::debug!("Edit of unknown task {}", id);
            return Ok(false);
        };
        if new_text.is_empty() || new_text == task.text {
            return Ok(false);
        }

        task.text = new_text.to_string();
        commit(&self.store, session, tasks)?;
        tracing::info!("Edited task {} for user {}", id, session.username);
        Ok(true)
    }

    /// Returns the new completion state, or `None` when the task does not exist.
    pub fn toggle_complete(&mut self, id: &str) -> AppResult<Option<bool>> {
        let session = self.session.as_mut().ok_or(AppError::NotAuthenticated)?;
        let mut tasks = session.tasks.clone();
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            tracing::debug!("Toggle of unknown task {}", id);
            return Ok(None);
        };
        task.completed = !task.completed;
        let completed = task.completed;

        commit(&self.store, session, tasks)?;
        Ok(Some(completed))
    }

    // Persists even when nothing was removed.
    pub fn delete(&mut self, id: &str) -> AppResult<bool> {
        let session = self.session.as_mut().ok_or(AppError::NotAuthenticated)?;
        let mut tasks = session.tasks.clone();
        tasks.retain(|t| t.id != id);
        let removed = tasks.len() != session.tasks.len();

        commit(&self.store, session, tasks)?;
        if removed {
            tracing::info!("Deleted task {} for user {}", id, session.username);
        }
        Ok(removed)
    }

    /// Removes every completed task and returns how many went.
    pub fn clear_completed(&mut self) -> AppResult<usize> {
        let session = self.session.as_mut().ok_or(AppError::NotAuthenticated)?;
        let mut tasks = session.tasks.clone();
        tasks.retain(|t| !t.completed);
        let removed = session.tasks.len() - tasks.len();

        commit(&self.store, session, tasks)?;
        tracing::info!("Cleared {} completed tasks for user {}", removed, session.username);
        Ok(removed)
    }

    /// Moves the dragged task into the target's slot.
    ///
    /// The dragged task is removed first and then inserted at the index the target held
    /// before the removal, so `[A, B, C]` with `A` dropped on `C` becomes `[B, C, A]`.
    pub fn reorder(&mut self, dragged_id: &str, target_id: &str) -> AppResult<bool> {
        let session = self.session.as_mut().ok_or(AppError::NotAuthenticated)?;
        if dragged_id == target_id {
            return Ok(false);
        }
        let dragged = session.tasks.iter().position(|t| t.id == dragged_id);
        let target = session.tasks.iter().position(|t| t.id == target_id);
        let (Some(from), Some(to)) = (dragged, target) else {
            tracing::debug!("Reorder with unknown task {} -> {}", dragged_id, target_id);
            return Ok(false);
        };

        let mut tasks = session.tasks.clone();
        let task = tasks.remove(from);
        tasks.insert(to, task);
        commit(&self.store, session, tasks)?;
        Ok(true)
    }

    pub fn filter(&self, mode: FilterMode) -> AppResult<Vec<&Task>> {
        Ok(filter(self.tasks()?, mode))
    }

    // Always over the full list, whatever filter the caller is showing.
    pub fn progress(&self) -> AppResult<Progress> {
        Ok(Progress::of(self.tasks()?))
    }
}

pub fn filter(tasks: &[Task], mode: FilterMode) -> Vec<&Task> {
    tasks.iter().filter(|t| mode.matches(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::errors::{StorageError, StorageResult};
    use crate::services::storage::{KeyValueStore, MemoryStore, Namespace, SharedStore};

    // Reads from an inner store, rejects every write.
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            self.0.get(key)
        }

        fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full")))
        }

        fn remove(&self, _key: &str) -> StorageResult<()> {
            Err(StorageError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full")))
        }
    }

    fn engine() -> (SharedStore, TaskListEngine) {
        let kv: SharedStore = Arc::new(MemoryStore::new());
        let engine = TaskListEngine::new(TaskStore::new(kv.clone(), Namespace::new("taskly")));
        (kv, engine)
    }

    fn signed_in() -> (SharedStore, TaskListEngine) {
        let (kv, mut engine) = engine();
        engine.open("alice").unwrap();
        (kv, engine)
    }

    fn texts(engine: &TaskListEngine) -> Vec<String> {
        engine.tasks().unwrap().iter().map(|t| t.text.clone()).collect()
    }

    fn persisted(kv: &SharedStore) -> Vec<Task> {
        serde_json::from_str(&kv.get("taskly.tasks.alice").unwrap().unwrap()).unwrap()
    }

    // Adds C, B, A so the list reads [A, B, C] and returns their ids in that order.
    fn seed_abc(engine: &mut TaskListEngine) -> (String, String, String) {
        let c = engine.add("C").unwrap().unwrap().id;
        let b = engine.add("B").unwrap().unwrap().id;
        let a = engine.add("A").unwrap().unwrap().id;
        (a, b, c)
    }

    #[test]
    fn operations_require_a_session() {
        let (kv, mut engine) = engine();
        assert!(matches!(engine.add("buy milk"), Err(AppError::NotAuthenticated)));
        assert!(matches!(engine.edit("x", "y"), Err(AppError::NotAuthenticated)));
        assert!(matches!(engine.toggle_complete("x"), Err(AppError::NotAuthenticated)));
        assert!(matches!(engine.delete("x"), Err(AppError::NotAuthenticated)));
        assert!(matches!(engine.clear_completed(), Err(AppError::NotAuthenticated)));
        assert!(matches!(engine.reorder("x", "y"), Err(AppError::NotAuthenticated)));
        assert!(matches!(engine.progress(), Err(AppError::NotAuthenticated)));
        assert!(matches!(engine.tasks(), Err(AppError::NotAuthenticated)));

        engine.open("alice").unwrap();
        assert!(engine.tasks().unwrap().is_empty());
        assert_eq!(kv.get("taskly.tasks.alice").unwrap(), None);
    }

    #[test]
    fn add_prepends_trimmed_task() {
        let (kv, mut engine) = signed_in();
        engine.add("first").unwrap();
        let task = engine.add("  second  ").unwrap().unwrap();

        assert_eq!(task.text, "second");
        assert!(!task.completed);
        assert_eq!(texts(&engine), ["second", "first"]);
        assert_eq!(persisted(&kv), engine.tasks().unwrap());
    }

    #[test]
    fn add_ignores_blank_text() {
        let (kv, mut engine) = signed_in();
        assert_eq!(engine.add("").unwrap(), None);
        assert_eq!(engine.add("   \t\n").unwrap(), None);
        assert!(engine.tasks().unwrap().is_empty());
        assert_eq!(kv.get("taskly.tasks.alice").unwrap(), None);
    }

    #[test]
    fn ids_are_unique() {
        let (_, mut engine) = signed_in();
        for i in 0..50 {
            engine.add(&format!("task {}", i)).unwrap();
        }
        let mut ids: Vec<_> = engine.tasks().unwrap().iter().map(|t| t.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn add_then_delete_restores_empty_list() {
        let (kv, mut engine) = signed_in();
        let task = engine.add("buy milk").unwrap().unwrap();
        assert!(engine.delete(&task.id).unwrap());
        assert!(engine.tasks().unwrap().is_empty());
        assert!(persisted(&kv).is_empty());
    }

    #[test]
    fn delete_of_unknown_id_still_persists() {
        let (kv, mut engine) = signed_in();
        assert!(!engine.delete("missing").unwrap());
        assert_eq!(kv.get("taskly.tasks.alice").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn edit_replaces_text_only_when_changed() {
        let (kv, mut engine) = signed_in();
        let id = engine.add("draft").unwrap().unwrap().id;

        assert!(!engine.edit("missing", "x").unwrap());
        assert!(!engine.edit(&id, "   ").unwrap());
        assert!(!engine.edit(&id, " draft ").unwrap());
        assert_eq!(texts(&engine), ["draft"]);

        assert!(engine.edit(&id, "  final ").unwrap());
        assert_eq!(texts(&engine), ["final"]);
        assert_eq!(persisted(&kv)[0].text, "final");
        assert_eq!(engine.tasks().unwrap()[0].id, id);
    }

    #[test]
    fn toggle_flips_completion() {
        let (kv, mut engine) = signed_in();
        let id = engine.add("task").unwrap().unwrap().id;

        assert_eq!(engine.toggle_complete(&id).unwrap(), Some(true));
        assert!(persisted(&kv)[0].completed);
        assert_eq!(engine.toggle_complete(&id).unwrap(), Some(false));
        assert_eq!(engine.toggle_complete("missing").unwrap(), None);
    }

    #[test]
    fn clear_completed_reports_count() {
        let (kv, mut engine) = signed_in();
        let (a, _b, c) = seed_abc(&mut engine);
        engine.toggle_complete(&a).unwrap();
        engine.toggle_complete(&c).unwrap();

        assert_eq!(engine.clear_completed().unwrap(), 2);
        assert_eq!(texts(&engine), ["B"]);
        assert!(!engine.tasks().unwrap()[0].completed);
        assert_eq!(persisted(&kv).len(), 1);
        assert_eq!(engine.clear_completed().unwrap(), 0);
    }

    #[test]
    fn reorder_moves_dragged_into_target_slot() {
        let (kv, mut engine) = signed_in();
        let (a, _b, c) = seed_abc(&mut engine);

        assert!(engine.reorder(&a, &c).unwrap());
        assert_eq!(texts(&engine), ["B", "C", "A"]);
        assert_eq!(persisted(&kv).iter().map(|t| t.text.as_str()).collect::<Vec<_>>(), ["B", "C", "A"]);

        // Moving up: A dropped on B
        let b = engine.tasks().unwrap()[0].id.clone();
        assert!(engine.reorder(&a, &b).unwrap());
        assert_eq!(texts(&engine), ["A", "B", "C"]);
    }

    #[test]
    fn adjacent_reorder_is_an_involution() {
        let (_, mut engine) = signed_in();
        let (a, b, c) = seed_abc(&mut engine);

        engine.reorder(&a, &b).unwrap();
        assert_eq!(texts(&engine), ["B", "A", "C"]);
        engine.reorder(&b, &a).unwrap();
        assert_eq!(texts(&engine), ["A", "B", "C"]);

        engine.reorder(&c, &b).unwrap();
        assert_eq!(texts(&engine), ["A", "C", "B"]);
        engine.reorder(&b, &c).unwrap();
        assert_eq!(texts(&engine), ["A", "B", "C"]);
    }

    #[test]
    fn reorder_ignores_unknown_and_identical_ids() {
        let (_, mut engine) = signed_in();
        let (a, _, _) = seed_abc(&mut engine);
        assert!(!engine.reorder(&a, &a).unwrap());
        assert!(!engine.reorder(&a, "missing").unwrap());
        assert!(!engine.reorder("missing", &a).unwrap());
        assert_eq!(texts(&engine), ["A", "B", "C"]);
    }

    #[test]
    fn filter_is_a_pure_view() {
        let (kv, mut engine) = signed_in();
        let (a, _, _) = seed_abc(&mut engine);
        engine.toggle_complete(&a).unwrap();
        let before = kv.get("taskly.tasks.alice").unwrap();

        let active: Vec<_> = engine.filter(FilterMode::Active).unwrap().iter().map(|t| t.text.clone()).collect();
        let done: Vec<_> = engine.filter(FilterMode::Completed).unwrap().iter().map(|t| t.text.clone()).collect();
        assert_eq!(active, ["B", "C"]);
        assert_eq!(done, ["A"]);
        assert_eq!(engine.filter(FilterMode::from("unknown")).unwrap().len(), 3);

        assert_eq!(texts(&engine), ["A", "B", "C"]);
        assert_eq!(kv.get("taskly.tasks.alice").unwrap(), before);
    }

    #[test]
    fn progress_ignores_filter_mode() {
        let (_, mut engine) = signed_in();
        let (a, _, _) = seed_abc(&mut engine);
        engine.toggle_complete(&a).unwrap();

        let expected = Progress { done: 1, total: 3, percent: 33 };
        for mode in [FilterMode::All, FilterMode::Active, FilterMode::Completed] {
            let _ = engine.filter(mode).unwrap();
            assert_eq!(engine.progress().unwrap(), expected);
        }
    }

    #[test]
    fn reopening_replaces_in_memory_list() {
        let (_, mut engine) = signed_in();
        engine.add("alice's").unwrap();

        engine.close();
        assert_eq!(engine.current_user(), None);
        engine.open("bob").unwrap();
        assert!(engine.tasks().unwrap().is_empty());

        engine.open("alice").unwrap();
        assert_eq!(texts(&engine), ["alice's"]);
    }

    #[test]
    fn failed_write_leaves_list_untouched() {
        let inner = MemoryStore::new();
        let seeded = r#"[{"id":"a","text":"A","completed":true},{"id":"b","text":"B","completed":false}]"#;
        inner.set("taskly.tasks.alice", seeded).unwrap();
        let kv: SharedStore = Arc::new(ReadOnlyStore(inner));
        let mut engine = TaskListEngine::new(TaskStore::new(kv.clone(), Namespace::new("taskly")));
        engine.open("alice").unwrap();
        let before = engine.tasks().unwrap().to_vec();

        assert!(matches!(engine.add("buy milk"), Err(AppError::Storage(_))));
        assert!(matches!(engine.edit("b", "Bee"), Err(AppError::Storage(_))));
        assert!(matches!(engine.toggle_complete("b"), Err(AppError::Storage(_))));
        assert!(matches!(engine.delete("a"), Err(AppError::Storage(_))));
        assert!(matches!(engine.clear_completed(), Err(AppError::Storage(_))));
        assert!(matches!(engine.reorder("a", "b"), Err(AppError::Storage(_))));

        assert_eq!(engine.tasks().unwrap(), before.as_slice());
        assert_eq!(kv.get("taskly.tasks.alice").unwrap().as_deref(), Some(seeded));
    }
}
