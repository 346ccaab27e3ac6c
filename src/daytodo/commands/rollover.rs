//! Day-transition check run before every command.
//!
//! The last day a command ran on is kept under `<namespace>__last_seen`. When the
//! current day is later than that, unfinished tasks from the day before are carried
//! forward (if enabled) and the marker is moved. Because the marker only moves after
//! a successful carry, a day is inherited into at most once.

use crate::calendar::CalendarNavigator;
use crate::commands::{CmdMessage, CmdResult};
use crate::date::DateKey;
use crate::error::Result;
use crate::inherit::InheritanceEngine;
use crate::repo::TaskRepository;
use crate::store::KeyValueStore;
use log::{debug, warn};

pub fn last_seen_key(namespace: &str) -> String {
    format!("{}__last_seen", namespace)
}

pub async fn run<S: KeyValueStore>(
    repo: &TaskRepository<S>,
    now: &DateKey,
    auto_inherit: bool,
) -> Result<CmdResult> {
    let key = last_seen_key(repo.namespace());
    let mut result = CmdResult::default().with_date(*now);

    let stored = repo.store().get(&key).await?;
    let last: DateKey = match stored.map(serde_json::from_value::<DateKey>) {
        Some(Ok(last)) => last,
        Some(Err(err)) => {
            warn!(
                "event=rollover_reset module=rollover reason=bad_marker day={} error={}",
                now, err
            );
            repo.store().set(&key, serde_json::to_value(now)?).await?;
            return Ok(result);
        }
        None => {
            debug!("event=rollover_init module=rollover day={}", now);
            repo.store().set(&key, serde_json::to_value(now)?).await?;
            return Ok(result);
        }
    };

    let mut navigator = CalendarNavigator::new(last);
    if !navigator.detect_day_rollover(*now) {
        return Ok(result);
    }

    if *now < last {
        warn!(
            "event=rollover_skipped module=rollover reason=clock_behind last={} now={}",
            last, now
        );
        result.add_message(CmdMessage::warning(format!(
            "Clock is behind the last recorded day ({}), nothing carried over",
            last
        )));
        return Ok(result);
    }

    if auto_inherit {
        let created = InheritanceEngine::new(repo).inherit(now).await?;
        if !created.is_empty() {
            result.add_message(CmdMessage::info(format!(
                "New day: carried over {} unfinished task(s) from {}",
                created.len(),
                now.day_before()?
            )));
        }
        result = result.with_affected_tasks(created);
    }

    repo.store().set(&key, serde_json::to_value(now)?).await?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::MemoryStore;
    use pollster::FutureExt as _;

    fn day(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    fn seeded() -> TaskRepository<MemoryStore> {
        let repo = TaskRepository::new(MemoryStore::new());
        repo.add(&day("2024-03-01"), "unfinished").block_on().unwrap();
        repo
    }

    #[test]
    fn first_run_records_day_without_inheriting() {
        let repo = seeded();
        let result = run(&repo, &day("2024-03-02"), true).block_on().unwrap();

        assert!(result.affected_tasks.is_empty());
        assert!(repo.list(&day("2024-03-02")).block_on().unwrap().is_empty());
        assert_eq!(
            repo.store().raw("todo_items__last_seen"),
            Some(serde_json::json!("2024-03-02"))
        );
    }

    #[test]
    fn new_day_inherits_once() {
        let repo = seeded();
        run(&repo, &day("2024-03-01"), true).block_on().unwrap();

        let result = run(&repo, &day("2024-03-02"), true).block_on().unwrap();
        assert_eq!(result.affected_tasks.len(), 1);
        assert!(result.has_level(MessageLevel::Info));

        let again = run(&repo, &day("2024-03-02"), true).block_on().unwrap();
        assert!(again.affected_tasks.is_empty());
        assert_eq!(repo.list(&day("2024-03-02")).block_on().unwrap().len(), 1);
    }

    #[test]
    fn disabled_auto_inherit_still_moves_marker() {
        let repo = seeded();
        run(&repo, &day("2024-03-01"), false).block_on().unwrap();
        run(&repo, &day("2024-03-02"), false).block_on().unwrap();

        assert!(repo.list(&day("2024-03-02")).block_on().unwrap().is_empty());
        assert_eq!(
            repo.store().raw("todo_items__last_seen"),
            Some(serde_json::json!("2024-03-02"))
        );
    }

    #[test]
    fn clock_going_back_changes_nothing() {
        let repo = seeded();
        run(&repo, &day("2024-03-05"), true).block_on().unwrap();
        let writes = repo.store().write_count();

        let result = run(&repo, &day("2024-03-02"), true).block_on().unwrap();
        assert!(result.has_level(MessageLevel::Warning));
        assert_eq!(repo.store().write_count(), writes);
        assert_eq!(
            repo.store().raw("todo_items__last_seen"),
            Some(serde_json::json!("2024-03-05"))
        );
    }

    #[test]
    fn unreadable_marker_counts_as_first_run() {
        let repo = seeded();
        repo.store()
            .insert_raw("todo_items__last_seen", serde_json::json!("garbage"));

        let result = run(&repo, &day("2024-03-02"), true).block_on().unwrap();
        assert!(result.affected_tasks.is_empty());
        assert!(repo.list(&day("2024-03-02")).block_on().unwrap().is_empty());
        assert_eq!(
            repo.store().raw("todo_items__last_seen"),
            Some(serde_json::json!("2024-03-02"))
        );

        let next = run(&repo, &day("2024-03-03"), true).block_on().unwrap();
        assert!(next.affected_tasks.is_empty());
        assert_eq!(
            repo.store().raw("todo_items__last_seen"),
            Some(serde_json::json!("2024-03-03"))
        );
    }

    #[test]
    fn failed_inherit_keeps_marker() {
        let repo = seeded();
        run(&repo, &day("2024-03-01"), true).block_on().unwrap();

        repo.store().set_simulate_write_error(true);
        assert!(run(&repo, &day("2024-03-02"), true).block_on().is_err());
        repo.store().set_simulate_write_error(false);

        assert_eq!(
            repo.store().raw("todo_items__last_seen"),
            Some(serde_json::json!("2024-03-01"))
        );
        let result = run(&repo, &day("2024-03-02"), true).block_on().unwrap();
        assert_eq!(result.affected_tasks.len(), 1);
    }
}
