use clap::{Parser, Subcommand};
use once_cell::sync::Lazy;

/// "0.3.2" for tagged releases, "0.3.2@abc1234 2024-01-15" otherwise.
static VERSION: Lazy<String> = Lazy::new(|| {
    let version = env!("CARGO_PKG_VERSION");
    let hash = env!("DAYTODO_GIT_HASH");
    if env!("DAYTODO_RELEASE") == "true" || hash.is_empty() {
        version.to_string()
    } else {
        format!("{}@{} {}", version, hash, env!("DAYTODO_GIT_DATE"))
    }
});

#[derive(Parser, Debug)]
#[command(name = "daytodo", version = VERSION.as_str())]
#[command(about = "Per-day to-do list that carries unfinished tasks forward", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Day to work on (YYYY-MM-DD), defaults to today
    #[arg(short, long, global = true)]
    pub date: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the day's tasks
    #[command(alias = "ls")]
    List,

    /// Add a task (empty text adds a placeholder task)
    #[command(alias = "a")]
    Add {
        /// Task text
        #[arg(required = false, num_args = 0..)]
        text: Vec<String>,
    },

    /// Replace a task's text; blank text keeps the old one
    #[command(alias = "e")]
    Edit {
        /// Index of the task (see `list`)
        index: String,

        /// New text
        #[arg(required = false, num_args = 0..)]
        text: Vec<String>,
    },

    /// Flip one or more tasks between open and done
    #[command(alias = "x")]
    Toggle {
        /// Indexes of the tasks (e.g. 1 3)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Delete one or more tasks
    #[command(alias = "rm")]
    Delete {
        /// Indexes of the tasks (e.g. 1 3)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Copy the previous day's unfinished tasks into this day
    Inherit,

    /// Show a month calendar
    #[command(alias = "cal")]
    Calendar {
        /// Month to show (YYYY-MM), defaults to the selected day's month
        #[arg(short, long)]
        month: Option<String>,

        /// Show the following month
        #[arg(long, conflicts_with = "prev")]
        next: bool,

        /// Show the preceding month
        #[arg(long)]
        prev: bool,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (namespace, week-start, auto-inherit)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
