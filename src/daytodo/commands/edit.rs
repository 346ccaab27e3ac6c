use crate::commands::{CmdMessage, CmdResult};
use crate::date::DateKey;
use crate::edit::{reconcile_edit, EditOutcome};
use crate::error::Result;
use crate::model::TaskPatch;
use crate::repo::TaskRepository;
use crate::store::KeyValueStore;

use super::helpers::resolve_indexes;

pub async fn run<S: KeyValueStore>(
    repo: &TaskRepository<S>,
    date: &DateKey,
    index: usize,
    text: &str,
) -> Result<CmdResult> {
    let resolved = resolve_indexes(repo, date, &[index]).await?;
    let mut result = CmdResult::default().with_date(*date);
    let Some(target) = resolved.into_iter().next() else {
        return Ok(result);
    };

    match reconcile_edit(&target.task.content, text) {
        EditOutcome::Discard => {
            result.add_message(CmdMessage::warning(format!(
                "Empty text discarded, task kept ({}): {}",
                index, target.task.content
            )));
        }
        EditOutcome::Unchanged => {
            result.add_message(CmdMessage::info(format!(
                "Task unchanged ({}): {}",
                index, target.task.content
            )));
        }
        EditOutcome::Update(content) => {
            match repo
                .update(date, &target.task.id, &TaskPatch::content(content))
                .await?
            {
                Some(task) => {
                    result.add_message(CmdMessage::success(format!(
                        "Task updated ({}): {}",
                        index, task.content
                    )));
                    result.affected_tasks.push(task);
                }
                None => {
                    result.add_message(CmdMessage::warning(format!(
                        "Task {} no longer exists on {}",
                        index, date
                    )));
                }
            }
        }
    }

    Ok(result)
}
