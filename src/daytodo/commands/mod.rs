use crate::calendar::MonthGrid;
use crate::config::TodoConfig;
use crate::date::DateKey;
use crate::model::Task;

pub mod add;
pub mod calendar;
pub mod config;
pub mod delete;
pub mod edit;
pub mod helpers;
pub mod inherit;
pub mod list;
pub mod rollover;
pub mod toggle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A task together with its 1-based position in the display order of its day.
#[derive(Debug, Clone)]
pub struct DisplayTask {
    pub index: usize,
    pub task: Task,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub date: Option<DateKey>,
    pub affected_tasks: Vec<Task>,
    pub listed_tasks: Vec<DisplayTask>,
    pub grid: Option<MonthGrid>,
    pub config: Option<TodoConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_date(mut self, date: DateKey) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_affected_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.affected_tasks = tasks;
        self
    }

    pub fn with_listed_tasks(mut self, tasks: Vec<DisplayTask>) -> Self {
        self.listed_tasks = tasks;
        self
    }

    pub fn with_grid(mut self, grid: MonthGrid) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn with_config(mut self, config: TodoConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_level(&self, level: MessageLevel) -> bool {
        self.messages.iter().any(|m| m.level == level)
    }
}
