//! # Task Repository
//!
//! Owns every read and write of a day's task list. Each [`DateKey`] maps to one
//! storage key, `"<namespace>_<YYYY-MM-DD>"`, holding the whole list as a JSON array.
//!
//! ## Persistence Discipline
//!
//! Every mutation is a full read-modify-write of one day's list:
//! 1. `get` the list (absent means empty)
//! 2. change it in memory
//! 3. `set` the whole list back
//!
//! Nothing is cached between calls, so if the final `set` fails the previously
//! persisted list is still what the next read sees.
//!
//! Two mutations of the same day that interleave their round trips can lose an
//! update. The repository does not lock; callers serialize per day. Different
//! days never touch the same key and never interfere.
//!
//! ## Not Found
//!
//! `update` and `toggle` return `Ok(None)` when the id is not in that day's list.
//! That is a normal outcome, not an error. `delete` of a missing id is a silent no-op.

use crate::date::DateKey;
use crate::error::{Result, TodoError};
use crate::model::{display_order, Task, TaskId, TaskPatch};
use crate::store::KeyValueStore;
use log::{debug, info};

pub const DEFAULT_NAMESPACE: &str = "todo_items";

/// Storage key of `date`'s task list.
pub fn partition_key(namespace: &str, date: &DateKey) -> String {
    format!("{}_{}", namespace, date.canonical())
}

pub struct TaskRepository<S: KeyValueStore> {
    store: S,
    namespace: String,
}

impl<S: KeyValueStore> TaskRepository<S> {
    pub fn new(store: S) -> Self {
        Self::with_namespace(store, DEFAULT_NAMESPACE)
    }

    pub fn with_namespace(store: S, namespace: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn key_for(&self, date: &DateKey) -> String {
        partition_key(&self.namespace, date)
    }

    /// The list for `date` in stored (insertion) order.
    pub async fn load(&self, date: &DateKey) -> Result<Vec<Task>> {
        let key = self.key_for(date);
        match self.store.get(&key).await? {
            Some(value) => serde_json::from_value(value).map_err(TodoError::Serialization),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, date: &DateKey, tasks: &[Task]) -> Result<()> {
        let key = self.key_for(date);
        let value = serde_json::to_value(tasks).map_err(TodoError::Serialization)?;
        self.store.set(&key, value).await
    }

    /// All tasks for `date` in display order. Empty when the day was never written.
    pub async fn list(&self, date: &DateKey) -> Result<Vec<Task>> {
        Ok(display_order(self.load(date).await?))
    }

    pub async fn find(&self, date: &DateKey, id: &TaskId) -> Result<Option<Task>> {
        Ok(self.load(date).await?.into_iter().find(|t| &t.id == id))
    }

    /// Creates an incomplete task with a fresh id and appends it to `date`'s list.
    pub async fn add(&self, date: &DateKey, content: &str) -> Result<Task> {
        ensure_content(content)?;

        let mut tasks = self.load(date).await?;
        let task = Task::new(content);
        tasks.push(task.clone());
        self.save(date, &tasks).await?;

        info!(
            "event=task_add module=repo status=ok date={} id={}",
            date, task.id
        );
        Ok(task)
    }

    /// Merges `patch` into the task `id` of `date`.
    ///
    /// Returns `Ok(None)` and writes nothing when the id is not in that day's list.
    pub async fn update(
        &self,
        date: &DateKey,
        id: &TaskId,
        patch: &TaskPatch,
    ) -> Result<Option<Task>> {
        if let Some(content) = &patch.content {
            ensure_content(content)?;
        }

        let mut tasks = self.load(date).await?;
        let Some(task) = tasks.iter_mut().find(|t| &t.id == id) else {
            debug!(
                "event=task_update module=repo status=not_found date={} id={}",
                date, id
            );
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(Some(task.clone()));
        }
        task.apply(patch);
        let updated = task.clone();
        self.save(date, &tasks).await?;

        info!(
            "event=task_update module=repo status=ok date={} id={}",
            date, id
        );
        Ok(Some(updated))
    }

    /// Flips `completed` on task `id`. `Ok(None)` when not found.
    pub async fn toggle(&self, date: &DateKey, id: &TaskId) -> Result<Option<Task>> {
        let Some(current) = self.find(date, id).await? else {
            return Ok(None);
        };
        self.update(date, id, &TaskPatch::completed(!current.completed))
            .await
    }

    /// Removes task `id` from `date`'s list if it is there.
    pub async fn delete(&self, date: &DateKey, id: &TaskId) -> Result<()> {
        let mut tasks = self.load(date).await?;
        let before = tasks.len();
        tasks.retain(|t| &t.id != id);
        if tasks.len() == before {
            debug!(
                "event=task_delete module=repo status=absent date={} id={}",
                date, id
            );
            return Ok(());
        }
        self.save(date, &tasks).await?;

        info!(
            "event=task_delete module=repo status=ok date={} id={}",
            date, id
        );
        Ok(())
    }

    /// Appends already built tasks to `date`'s list in a single write.
    pub async fn append(&self, date: &DateKey, new_tasks: &[Task]) -> Result<()> {
        if new_tasks.is_empty() {
            return Ok(());
        }
        for task in new_tasks {
            ensure_content(&task.content)?;
        }
        let mut tasks = self.load(date).await?;
        tasks.extend_from_slice(new_tasks);
        self.save(date, &tasks).await
    }
}

fn ensure_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(TodoError::EmptyContent);
    }
    Ok(())
}
