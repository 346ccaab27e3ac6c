use crate::commands::{CmdMessage, CmdResult};
use crate::date::DateKey;
use crate::error::Result;
use crate::repo::TaskRepository;
use crate::store::KeyValueStore;

use super::helpers::resolve_indexes;

pub async fn run<S: KeyValueStore>(
    repo: &TaskRepository<S>,
    date: &DateKey,
    indexes: &[usize],
) -> Result<CmdResult> {
    let resolved = resolve_indexes(repo, date, indexes).await?;
    let mut result = CmdResult::default().with_date(*date);

    for target in resolved {
        repo.delete(date, &target.task.id).await?;
        result.add_message(CmdMessage::success(format!(
            "Task deleted ({}): {}",
            target.index, target.task.content
        )));
        result.affected_tasks.push(target.task);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use pollster::FutureExt as _;

    #[test]
    fn deletes_by_index() {
        let repo = TaskRepository::new(MemoryStore::new());
        let d: DateKey = "2024-03-01".parse().unwrap();
        let keep = repo.add(&d, "keep").block_on().unwrap();
        repo.toggle(&d, &keep.id).block_on().unwrap();
        repo.add(&d, "drop").block_on().unwrap();

        // open tasks sort first, so "drop" is index 1
        let result = run(&repo, &d, &[1]).block_on().unwrap();
        assert_eq!(result.affected_tasks[0].content, "drop");

        let tasks = repo.list(&d).block_on().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, keep.id);
    }

    #[test]
    fn duplicate_index_deletes_once() {
        let repo = TaskRepository::new(MemoryStore::new());
        let d: DateKey = "2024-03-01".parse().unwrap();
        repo.add(&d, "only").block_on().unwrap();

        let result = run(&repo, &d, &[1, 1]).block_on().unwrap();
        assert_eq!(result.affected_tasks.len(), 1);
        assert!(repo.list(&d).block_on().unwrap().is_empty());
    }
}
