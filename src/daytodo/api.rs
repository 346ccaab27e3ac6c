//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. Every UI talks to the
//! task store through it.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (display index strings become `usize`, the selected day
//!   is filled in from the calendar)
//! - **Owns session state**: the [`CalendarNavigator`] and the loaded [`TodoConfig`]
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and never reads the clock; callers pass "now" in.
//!
//! ## Generic Over KeyValueStore
//!
//! `TodoApi<S: KeyValueStore>` is generic over the storage backend:
//! - Production: `TodoApi<FileStore>`
//! - Testing: `TodoApi<MemoryStore>`
//!
//! ## Testing Strategy
//!
//! API tests check dispatch and argument normalization. Command behavior is tested
//! in `commands/*.rs`, storage in `store/`.

use crate::calendar::CalendarNavigator;
use crate::commands;
use crate::config::TodoConfig;
use crate::date::{DateKey, YearMonth};
use crate::error::{Result, TodoError};
use crate::repo::TaskRepository;
use crate::store::KeyValueStore;
use std::path::PathBuf;

pub struct TodoApi<S: KeyValueStore> {
    repo: TaskRepository<S>,
    navigator: CalendarNavigator,
    config: TodoConfig,
    config_dir: PathBuf,
}

impl<S: KeyValueStore> TodoApi<S> {
    /// Loads the config from `config_dir` and opens the repository under its namespace.
    pub fn new(store: S, config_dir: PathBuf, today: DateKey) -> Result<Self> {
        let config = TodoConfig::load(&config_dir)?;
        Ok(Self::with_config(store, config, config_dir, today))
    }

    pub fn with_config(store: S, config: TodoConfig, config_dir: PathBuf, today: DateKey) -> Self {
        let repo = TaskRepository::with_namespace(store, config.namespace.clone());
        let navigator = CalendarNavigator::new(today).with_week_start(config.week_start);
        Self {
            repo,
            navigator,
            config,
            config_dir,
        }
    }

    pub fn selected_date(&self) -> DateKey {
        self.navigator.selected()
    }

    pub fn select(&mut self, date: DateKey) {
        self.navigator.select(date);
    }

    /// Handles a possible day change. If the selection was still on the old today
    /// it follows to `now`.
    pub async fn check_rollover(&mut self, now: DateKey) -> Result<commands::CmdResult> {
        let previous = self.navigator.today();
        if self.navigator.detect_day_rollover(now) && self.navigator.selected() == previous {
            self.navigator.select(now);
        }
        commands::rollover::run(&self.repo, &now, self.config.auto_inherit).await
    }

    pub async fn list(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.repo, &self.selected_date()).await
    }

    pub async fn add(&self, content: Option<String>) -> Result<commands::CmdResult> {
        commands::add::run(&self.repo, &self.selected_date(), content).await
    }

    pub async fn edit(&self, index: &str, text: &str) -> Result<commands::CmdResult> {
        let index = parse_index(index)?;
        commands::edit::run(&self.repo, &self.selected_date(), index, text).await
    }

    pub async fn toggle<I: AsRef<str>>(&self, indexes: &[I]) -> Result<commands::CmdResult> {
        let indexes = parse_indexes(indexes)?;
        commands::toggle::run(&self.repo, &self.selected_date(), &indexes).await
    }

    pub async fn delete<I: AsRef<str>>(&self, indexes: &[I]) -> Result<commands::CmdResult> {
        let indexes = parse_indexes(indexes)?;
        commands::delete::run(&self.repo, &self.selected_date(), &indexes).await
    }

    /// Carries unfinished tasks from the day before the selected day into it.
    pub async fn inherit(&self) -> Result<commands::CmdResult> {
        commands::inherit::run(&self.repo, &self.selected_date()).await
    }

    pub fn calendar(&mut self, month: Option<YearMonth>, delta: i32) -> Result<commands::CmdResult> {
        commands::calendar::run(&mut self.navigator, month, delta)
    }

    /// Runs a config action. A successful `Set` is applied to the calendar right
    /// away; a new namespace takes effect on the next start.
    pub fn config(&mut self, action: ConfigAction) -> Result<commands::CmdResult> {
        let result = commands::config::run(&self.config_dir, action)?;
        if let Some(config) = &result.config {
            self.navigator = self.navigator.clone().with_week_start(config.week_start);
            self.config = config.clone();
        }
        Ok(result)
    }

    pub fn repository(&self) -> &TaskRepository<S> {
        &self.repo
    }

    pub fn navigator(&self) -> &CalendarNavigator {
        &self.navigator
    }
}

fn parse_index(input: &str) -> Result<usize> {
    match input.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(TodoError::Api(format!(
            "Invalid index '{}': expected a positive number",
            input
        ))),
    }
}

fn parse_indexes<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<usize>> {
    if inputs.is_empty() {
        return Err(TodoError::Api("No index given".to_string()));
    }
    inputs.iter().map(|s| parse_index(s.as_ref())).collect()
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, DisplayTask, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::WeekStart;
    use crate::store::memory::MemoryStore;
    use pollster::FutureExt as _;
    use std::path::Path;

    fn day(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    fn api(dir: &Path) -> TodoApi<MemoryStore> {
        TodoApi::new(MemoryStore::new(), dir.to_path_buf(), day("2024-03-01")).unwrap()
    }

    #[test]
    fn commands_target_selected_day() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = api(dir.path());
        api.add(Some("today".into())).block_on().unwrap();

        api.select(day("2024-03-05"));
        api.add(Some("later".into())).block_on().unwrap();
        let later = api.list().block_on().unwrap();
        assert_eq!(later.date, Some(day("2024-03-05")));
        assert_eq!(later.listed_tasks.len(), 1);
        assert_eq!(later.listed_tasks[0].task.content, "later");

        let first = api
            .repository()
            .list(&day("2024-03-01"))
            .block_on()
            .unwrap();
        assert_eq!(first[0].content, "today");
    }

    #[test]
    fn index_strings_are_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let api = api(dir.path());
        api.add(Some("A".into())).block_on().unwrap();

        let result = api.toggle(&["1"]).block_on().unwrap();
        assert!(result.affected_tasks[0].completed);

        assert!(matches!(
            api.toggle(&["x"]).block_on().unwrap_err(),
            TodoError::Api(_)
        ));
        assert!(matches!(
            api.delete(&["0"]).block_on().unwrap_err(),
            TodoError::Api(_)
        ));
        let empty: [&str; 0] = [];
        assert!(api.delete(&empty).block_on().is_err());
    }

    #[test]
    fn rollover_moves_selection_that_was_on_today() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = api(dir.path());
        api.check_rollover(day("2024-03-01")).block_on().unwrap();
        api.add(Some("carry me".into())).block_on().unwrap();

        let result = api.check_rollover(day("2024-03-02")).block_on().unwrap();
        assert_eq!(result.affected_tasks.len(), 1);
        assert_eq!(api.selected_date(), day("2024-03-02"));
        assert_eq!(api.list().block_on().unwrap().listed_tasks.len(), 1);
    }

    #[test]
    fn rollover_keeps_explicit_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = api(dir.path());
        api.select(day("2024-02-20"));
        api.check_rollover(day("2024-03-02")).block_on().unwrap();
        assert_eq!(api.selected_date(), day("2024-02-20"));
    }

    #[test]
    fn config_set_updates_calendar() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = api(dir.path());
        api.config(ConfigAction::Set("week-start".into(), "monday".into()))
            .unwrap();
        assert_eq!(api.navigator().week_start(), WeekStart::Monday);

        let grid = api.calendar(None, 0).unwrap().grid.unwrap();
        assert_eq!(grid.header()[0], "Mo");
        // 2024-03-01 is a Friday
        assert_eq!(grid.leading_blanks(), 4);
    }

    #[test]
    fn namespace_comes_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = TodoConfig::default();
        config.set("namespace", "work").unwrap();
        config.save(dir.path()).unwrap();

        let api = api(dir.path());
        api.add(Some("x".into())).block_on().unwrap();
        assert!(api
            .repository()
            .store()
            .raw("work_2024-03-01")
            .is_some());
    }
}
