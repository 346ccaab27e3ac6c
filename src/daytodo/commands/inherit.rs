use crate::commands::{CmdMessage, CmdResult};
use crate::date::DateKey;
use crate::error::Result;
use crate::inherit::InheritanceEngine;
use crate::repo::TaskRepository;
use crate::store::KeyValueStore;

pub async fn run<S: KeyValueStore>(repo: &TaskRepository<S>, date: &DateKey) -> Result<CmdResult> {
    let created = InheritanceEngine::new(repo).inherit(date).await?;
    let mut result = CmdResult::default().with_date(*date);

    if created.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "Nothing to carry over from {}",
            date.day_before()?
        )));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Carried over {} unfinished task(s) from {}",
            created.len(),
            date.day_before()?
        )));
    }

    Ok(result.with_affected_tasks(created))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::MemoryStore;
    use pollster::FutureExt as _;

    #[test]
    fn reports_carried_tasks() {
        let repo = TaskRepository::new(MemoryStore::new());
        let yesterday: DateKey = "2024-03-01".parse().unwrap();
        repo.add(&yesterday, "unfinished").block_on().unwrap();

        let today = yesterday.day_after().unwrap();
        let result = run(&repo, &today).block_on().unwrap();
        assert_eq!(result.affected_tasks.len(), 1);
        assert!(result.has_level(MessageLevel::Success));
    }

    #[test]
    fn reports_nothing_to_do() {
        let repo = TaskRepository::new(MemoryStore::new());
        let today: DateKey = "2024-03-02".parse().unwrap();
        let result = run(&repo, &today).block_on().unwrap();
        assert!(result.affected_tasks.is_empty());
        assert!(result.has_level(MessageLevel::Info));
    }
}
