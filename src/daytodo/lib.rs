//! # Daytodo Architecture
//!
//! Daytodo is a **per-day to-do library** with a small CLI client. Every calendar day
//! owns its own list of tasks. Unfinished tasks can be carried into the next day,
//! where they become independent copies that remember which day they came from.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs)                               │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Holds the calendar navigator and loaded config           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Display indexes, messages, day-rollover handling         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Domain (repo.rs, inherit.rs, calendar.rs, date.rs)         │
//! │  - TaskRepository: one partition per day                    │
//! │  - InheritanceEngine: carry unfinished tasks forward        │
//! │  - CalendarNavigator: month grids and day selection         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Async KeyValueStore trait                                │
//! │  - FileStore (production), MemoryStore (testing)            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Storage Layout
//!
//! Each day lives under `<namespace>_<YYYY-MM-DD>` as a JSON array of tasks.
//! Days nobody wrote to have no key at all and read as empty. The day-rollover
//! marker lives under `<namespace>__last_seen`.
//!
//! ## Async Without a Runtime
//!
//! The storage contract is async so that remote backends fit behind it, but nothing
//! here needs a reactor. The CLI and the tests drive futures with `pollster`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Per-command logic and the rollover check
//! - [`repo`]: Per-day task repository
//! - [`inherit`]: Carrying unfinished tasks into a day
//! - [`calendar`]: Month grids, cursor and selection
//! - [`date`]: `DateKey`, `YearMonth` and calendar arithmetic
//! - [`edit`]: Reconciling inline edits
//! - [`model`]: `Task`, `TaskId`, `TaskPatch`
//! - [`store`]: Storage abstraction and implementations
//! - [`config`]: Configuration management
//! - [`logging`]: Logger bootstrap for the binary
//! - [`error`]: Error types

pub mod api;
pub mod calendar;
pub mod commands;
pub mod config;
pub mod date;
pub mod edit;
pub mod error;
pub mod inherit;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;

pub use calendar::{CalendarNavigator, DayCell, GridCell, MonthGrid};
pub use date::{DateKey, WeekStart, YearMonth};
pub use error::{Result, TodoError};
pub use inherit::InheritanceEngine;
pub use model::{Task, TaskId, TaskPatch};
pub use repo::TaskRepository;
