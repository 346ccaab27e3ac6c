//! # Carry-Over of Unfinished Tasks
//!
//! [`InheritanceEngine::inherit`] copies every incomplete task of the day before
//! `current` into `current`'s list as a new task:
//! - fresh id and creation time
//! - same content
//! - `completed = false`
//! - `inherited_from` = the previous day (never an older day, even if the source
//!   task was itself carried over)
//!
//! The previous day is only read. The new tasks are appended to `current` in one
//! write, after the source read has finished, so a reader of `current` either sees
//! all of them or none.
//!
//! The operation is NOT idempotent: calling it twice for the same day copies the
//! same tasks twice. Run it at most once per day transition (see
//! `commands::rollover`, which records the last day it processed).

use crate::date::DateKey;
use crate::error::Result;
use crate::model::{now_millis, Task};
use crate::repo::TaskRepository;
use crate::store::KeyValueStore;
use log::info;

pub struct InheritanceEngine<'a, S: KeyValueStore> {
    repo: &'a TaskRepository<S>,
}

impl<'a, S: KeyValueStore> InheritanceEngine<'a, S> {
    pub fn new(repo: &'a TaskRepository<S>) -> Self {
        Self { repo }
    }

    /// Copies the previous day's incomplete tasks into `current`.
    ///
    /// Returns the tasks created, empty (and without any write) when the previous
    /// day has nothing open.
    pub async fn inherit(&self, current: &DateKey) -> Result<Vec<Task>> {
        let previous = current.day_before()?;
        let previous_tasks = self.repo.load(&previous).await?;

        let created_at = now_millis();
        let carried: Vec<Task> = previous_tasks
            .iter()
            .filter(|task| !task.completed)
            .map(|task| Task::carried_over(task, previous, created_at))
            .collect();

        if carried.is_empty() {
            info!(
                "event=inherit module=inherit status=noop date={} from={}",
                current, previous
            );
            return Ok(carried);
        }

        self.repo.append(current, &carried).await?;
        info!(
            "event=inherit module=inherit status=ok date={} from={} count={}",
            current,
            previous,
            carried.len()
        );
        Ok(carried)
    }
}
