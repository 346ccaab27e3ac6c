use super::KeyValueStore;
use crate::error::{Result, TodoError};
use async_trait::async_trait;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
///
/// Uses `RefCell` for interior mutability since the store is driven from a single
/// flow of control. The failure switches let tests exercise IO error paths.
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, Value>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable read error simulation.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.fail_reads.set(simulate);
    }

    /// Enable write error simulation.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.fail_writes.set(simulate);
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Raw value currently stored under `key`, bypassing the async contract.
    pub fn raw(&self, key: &str) -> Option<Value> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn insert_raw(&self, key: &str, value: Value) {
        self.entries.borrow_mut().insert(key.to_string(), value);
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.borrow().keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait(?Send)]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        if self.fail_reads.get() {
            return Err(TodoError::Store("Simulated read error".to_string()));
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        if self.fail_writes.get() {
            return Err(TodoError::Store("Simulated write error".to_string()));
        }
        self.entries.borrow_mut().insert(key.to_string(), value);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::date::DateKey;
    use crate::model::{Task, TaskId};
    use crate::repo::partition_key;

    pub const NAMESPACE: &str = "todo_items";

    pub struct StoreFixture {
        pub store: MemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: MemoryStore::new(),
            }
        }

        /// Appends a task with a fixed id and timestamp directly to `date`'s list.
        pub fn with_task(
            self,
            date: DateKey,
            id: &str,
            content: &str,
            completed: bool,
            created_at: i64,
        ) -> Self {
            let key = partition_key(NAMESPACE, &date);
            let mut tasks: Vec<Task> = self
                .store
                .raw(&key)
                .map(|v| serde_json::from_value(v).unwrap())
                .unwrap_or_default();
            tasks.push(Task {
                id: TaskId::from(id),
                content: content.to_string(),
                completed,
                created_at,
                inherited_from: None,
            });
            self.store
                .insert_raw(&key, serde_json::to_value(&tasks).unwrap());
            self
        }

        pub fn with_open_task(self, date: DateKey, content: &str) -> Self {
            let id = format!("open-{}", content);
            self.with_task(date, &id, content, false, 100)
        }

        pub fn with_done_task(self, date: DateKey, content: &str) -> Self {
            let id = format!("done-{}", content);
            self.with_task(date, &id, content, true, 100)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollster::FutureExt as _;
    use serde_json::json;

    #[test]
    fn missing_key_reads_as_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nothing").block_on().unwrap(), None);
    }

    #[test]
    fn set_then_get() {
        let store = MemoryStore::new();
        store.set("k", json!([1, 2])).block_on().unwrap();
        assert_eq!(store.get("k").block_on().unwrap(), Some(json!([1, 2])));
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn failed_write_keeps_previous_value() {
        let store = MemoryStore::new();
        store.set("k", json!("before")).block_on().unwrap();
        store.set_simulate_write_error(true);

        let err = store.set("k", json!("after")).block_on().unwrap_err();
        assert!(err.is_io_failure());
        assert_eq!(store.raw("k"), Some(json!("before")));
    }

    #[test]
    fn simulated_read_error() {
        let store = MemoryStore::new();
        store.set_simulate_read_error(true);
        assert!(store.get("k").block_on().unwrap_err().is_io_failure());
    }
}
