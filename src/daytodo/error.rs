use thiserror::Error;

#[derive(Error, Debug)]
pub enum TodoError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Task content cannot be empty")]
    EmptyContent,

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl TodoError {
    /// True for failures of the storage collaborator itself.
    pub fn is_io_failure(&self) -> bool {
        matches!(self, TodoError::Io(_) | TodoError::Store(_))
    }
}

pub type Result<T> = std::result::Result<T, TodoError>;
