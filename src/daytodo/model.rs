use crate::date::DateKey;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque task identifier, unique across the whole store.
///
/// New ids are random 128-bit values. Any string is accepted when reading so that
/// lists written by older clients keep their ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn generate() -> Self {
        TaskId(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        TaskId(value.to_string())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        TaskId(value)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One to-do entry. The serialized shape is the durable on-disk contract:
/// `{id, content, completed, createdAt, inheritedFrom?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub content: String,
    #[serde(default)]
    pub completed: bool,
    /// Wall-clock milliseconds. Only used to order the display view.
    pub created_at: i64,
    /// Set only on tasks carried over from the previous day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherited_from: Option<DateKey>,
}

impl Task {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: TaskId::generate(),
            content: content.into(),
            completed: false,
            created_at: now_millis(),
            inherited_from: None,
        }
    }

    /// A fresh, incomplete copy of `source` tagged with the day it came from.
    pub fn carried_over(source: &Task, from: DateKey, created_at: i64) -> Self {
        Self {
            id: TaskId::generate(),
            content: source.content.clone(),
            completed: false,
            created_at,
            inherited_from: Some(from),
        }
    }

    pub fn is_inherited(&self) -> bool {
        self.inherited_from.is_some()
    }

    pub fn apply(&mut self, patch: &TaskPatch) {
        if let Some(content) = &patch.content {
            self.content = content.clone();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}

/// Fields a caller may change on an existing task. `None` leaves the field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub content: Option<String>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            completed: None,
        }
    }

    pub fn completed(completed: bool) -> Self {
        Self {
            content: None,
            completed: Some(completed),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.completed.is_none()
    }
}

/// Orders tasks for display: incomplete before completed, newest first within
/// each group. The sort is stable, so equal timestamps keep their stored order.
pub fn display_order(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by(|a, b| {
        a.completed
            .cmp(&b.completed)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    tasks
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(content: &str, completed: bool, created_at: i64) -> Task {
        Task {
            id: TaskId::from(content),
            content: content.to_string(),
            completed,
            created_at,
            inherited_from: None,
        }
    }

    fn contents(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.content.as_str()).collect()
    }

    #[test]
    fn incomplete_first_then_newest_first() {
        let tasks = vec![task("A", false, 100), task("B", true, 200), task("C", false, 300)];
        assert_eq!(contents(&display_order(tasks)), vec!["C", "A", "B"]);
    }

    #[test]
    fn completed_group_is_newest_first() {
        let tasks = vec![task("old", true, 1), task("open", false, 2), task("new", true, 3)];
        assert_eq!(contents(&display_order(tasks)), vec!["open", "new", "old"]);
    }

    #[test]
    fn ties_keep_stored_order() {
        let tasks = vec![task("first", false, 50), task("second", false, 50), task("third", false, 50)];
        assert_eq!(
            contents(&display_order(tasks)),
            vec!["first", "second", "third"]
        );
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = Task::new("a");
        let b = Task::new("a");
        assert_ne!(a.id, b.id);
        assert!(!a.completed);
        assert!(!a.is_inherited());
    }

    #[test]
    fn patch_merges_only_supplied_fields() {
        let mut t = task("draft", false, 1);
        t.apply(&TaskPatch::completed(true));
        assert_eq!(t.content, "draft");
        assert!(t.completed);

        t.apply(&TaskPatch::content("final"));
        assert_eq!(t.content, "final");
        assert!(t.completed);
    }

    #[test]
    fn serialized_shape_uses_camel_case_and_omits_missing_provenance() {
        let t = task("write report", false, 1700000000000);
        let value = serde_json::to_value(&t).unwrap();
        assert_eq!(value["id"], "write report");
        assert_eq!(value["createdAt"], 1700000000000_i64);
        assert!(value.get("inheritedFrom").is_none());

        let carried = Task::carried_over(&t, "2024-03-01".parse().unwrap(), 5);
        let value = serde_json::to_value(&carried).unwrap();
        assert_eq!(value["inheritedFrom"], "2024-03-01");
        assert_eq!(value["completed"], false);
    }

    #[test]
    fn reads_records_written_by_older_clients() {
        let raw = r#"[{"id":"lq2x9k0abc","content":"buy milk","completed":true,"createdAt":1717171717171}]"#;
        let tasks: Vec<Task> = serde_json::from_str(raw).unwrap();
        assert_eq!(tasks[0].id.as_str(), "lq2x9k0abc");
        assert!(tasks[0].completed);
        assert_eq!(tasks[0].inherited_from, None);
    }
}
