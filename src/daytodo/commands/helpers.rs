use crate::commands::DisplayTask;
use crate::date::DateKey;
use crate::error::{Result, TodoError};
use crate::model::Task;
use crate::repo::TaskRepository;
use crate::store::KeyValueStore;

pub fn index_tasks(tasks: Vec<Task>) -> Vec<DisplayTask> {
    tasks
        .into_iter()
        .enumerate()
        .map(|(i, task)| DisplayTask { index: i + 1, task })
        .collect()
}

pub async fn indexed_tasks<S: KeyValueStore>(
    repo: &TaskRepository<S>,
    date: &DateKey,
) -> Result<Vec<DisplayTask>> {
    Ok(index_tasks(repo.list(date).await?))
}

/// Resolves display indexes to tasks against one read of the day's list.
///
/// Fails on the first index that does not exist, before anything is changed.
/// Repeated indexes resolve once.
pub async fn resolve_indexes<S: KeyValueStore>(
    repo: &TaskRepository<S>,
    date: &DateKey,
    indexes: &[usize],
) -> Result<Vec<DisplayTask>> {
    let indexed = indexed_tasks(repo, date).await?;
    let mut seen = Vec::with_capacity(indexes.len());

    indexes
        .iter()
        .filter(|idx| {
            if seen.contains(*idx) {
                false
            } else {
                seen.push(**idx);
                true
            }
        })
        .map(|idx| {
            indexed
                .iter()
                .find(|dt| dt.index == *idx)
                .cloned()
                .ok_or_else(|| TodoError::TaskNotFound(format!("index {} on {}", idx, date)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use pollster::FutureExt as _;

    #[test]
    fn resolves_in_display_order() {
        let repo = TaskRepository::new(MemoryStore::new());
        let d: DateKey = "2024-03-01".parse().unwrap();
        let done = repo.add(&d, "done").block_on().unwrap();
        repo.toggle(&d, &done.id).block_on().unwrap();
        let open = repo.add(&d, "open").block_on().unwrap();

        let resolved = resolve_indexes(&repo, &d, &[1, 2]).block_on().unwrap();
        assert_eq!(resolved[0].task.id, open.id);
        assert_eq!(resolved[1].task.id, done.id);
    }

    #[test]
    fn unknown_index_fails() {
        let repo = TaskRepository::new(MemoryStore::new());
        let d: DateKey = "2024-03-01".parse().unwrap();
        repo.add(&d, "only").block_on().unwrap();

        let err = resolve_indexes(&repo, &d, &[1, 2]).block_on().unwrap_err();
        assert!(matches!(err, TodoError::TaskNotFound(_)));
        let err = resolve_indexes(&repo, &d, &[0]).block_on().unwrap_err();
        assert!(matches!(err, TodoError::TaskNotFound(_)));
    }
}
