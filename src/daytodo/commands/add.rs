use crate::commands::{CmdMessage, CmdResult};
use crate::date::DateKey;
use crate::error::Result;
use crate::repo::TaskRepository;
use crate::store::KeyValueStore;

/// Content given to a task added without any text.
pub const DEFAULT_CONTENT: &str = "New task";

pub async fn run<S: KeyValueStore>(
    repo: &TaskRepository<S>,
    date: &DateKey,
    content: Option<String>,
) -> Result<CmdResult> {
    let content = content
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CONTENT.to_string());

    let task = repo.add(date, &content).await?;

    let mut result = CmdResult::default().with_date(*date);
    result.add_message(CmdMessage::success(format!(
        "Task added ({}): {}",
        date, task.content
    )));
    result.affected_tasks.push(task);
    Ok(result)
}
