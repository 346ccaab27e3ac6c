//! # Storage Layer
//!
//! The core never talks to a disk or database directly. It depends on the narrow
//! [`KeyValueStore`] contract: asynchronous `get` and `set` of JSON values by opaque
//! string key.
//!
//! ## Design Rationale
//!
//! Storage is abstracted behind a trait to:
//! - Enable **testing** with `MemoryStore` (no filesystem needed)
//! - Allow other media (browser storage, a database, a sync service) without
//!   touching the repository
//! - Keep read-modify-write discipline in one place, the repository
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: one JSON file per key, written atomically
//! - [`memory::MemoryStore`]: in-memory map with failure injection for tests
//!
//! ## Execution Model
//!
//! Futures are not `Send`: the crate assumes one logical flow of control per task
//! list, where each operation finishes its storage round trip before the next
//! starts. Callers that add real parallelism must serialize access per key.
//!
//! Stores do not retry. A failed `get` or `set` surfaces as an error and a failed
//! `set` must leave the previous value readable.

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

pub mod fs;
pub mod memory;

/// Abstract asynchronous key-value medium, durable for the store's lifetime.
#[async_trait(?Send)]
pub trait KeyValueStore {
    /// Read the value under `key`. `Ok(None)` when the key was never written.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Replace the value under `key`.
    async fn set(&self, key: &str, value: Value) -> Result<()>;
}
