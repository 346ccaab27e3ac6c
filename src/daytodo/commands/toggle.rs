use crate::commands::{CmdMessage, CmdResult};
use crate::date::DateKey;
use crate::error::Result;
use crate::repo::TaskRepository;
use crate::store::KeyValueStore;

use super::helpers::resolve_indexes;

/// Toggles each indexed task. Indexes refer to the display order before any change.
pub async fn run<S: KeyValueStore>(
    repo: &TaskRepository<S>,
    date: &DateKey,
    indexes: &[usize],
) -> Result<CmdResult> {
    let resolved = resolve_indexes(repo, date, indexes).await?;
    let mut result = CmdResult::default().with_date(*date);

    for target in resolved {
        match repo.toggle(date, &target.task.id).await? {
            Some(task) => {
                let state = if task.completed { "done" } else { "open" };
                result.add_message(CmdMessage::success(format!(
                    "Task marked {} ({}): {}",
                    state, target.index, task.content
                )));
                result.affected_tasks.push(task);
            }
            None => {
                result.add_message(CmdMessage::warning(format!(
                    "Task {} no longer exists on {}",
                    target.index, date
                )));
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use pollster::FutureExt as _;

    #[test]
    fn toggles_by_index() {
        let repo = TaskRepository::new(MemoryStore::new());
        let d: DateKey = "2024-03-01".parse().unwrap();
        repo.add(&d, "A").block_on().unwrap();

        let result = run(&repo, &d, &[1]).block_on().unwrap();
        assert!(result.affected_tasks[0].completed);

        let result = run(&repo, &d, &[1]).block_on().unwrap();
        assert!(!result.affected_tasks[0].completed);
    }

    #[test]
    fn indexes_resolve_before_any_change() {
        let repo = TaskRepository::new(MemoryStore::new());
        let d: DateKey = "2024-03-01".parse().unwrap();
        let a = repo.add(&d, "A").block_on().unwrap();
        let b = repo.add(&d, "B").block_on().unwrap();

        run(&repo, &d, &[1, 2]).block_on().unwrap();
        let tasks = repo.list(&d).block_on().unwrap();
        assert!(tasks.iter().all(|t| t.completed));
        assert!(tasks.iter().any(|t| t.id == a.id));
        assert!(tasks.iter().any(|t| t.id == b.id));
    }
}
