use crate::commands::CmdResult;
use crate::date::DateKey;
use crate::error::Result;
use crate::repo::TaskRepository;
use crate::store::KeyValueStore;

use super::helpers::indexed_tasks;

pub async fn run<S: KeyValueStore>(repo: &TaskRepository<S>, date: &DateKey) -> Result<CmdResult> {
    let listed = indexed_tasks(repo, date).await?;
    Ok(CmdResult::default().with_date(*date).with_listed_tasks(listed))
}
