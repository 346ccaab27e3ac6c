use super::KeyValueStore;
use crate::error::{Result, TodoError};
use async_trait::async_trait;
use log::{debug, error};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File-backed key-value store.
///
/// Each key lives in `<root>/<key>.json`. Writes go to a temporary file that is
/// renamed over the target, so an interrupted or failed write never leaves a
/// half-written value behind.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Path of the file holding `key`.
    pub fn key_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(TodoError::Io)?;
        }
        Ok(())
    }

    fn write_atomic(&self, path: &Path, content: &str) -> Result<()> {
        let tmp_file = self.root.join(format!(".write-{}.tmp", Uuid::new_v4()));
        if let Err(err) = fs::write(&tmp_file, content) {
            let _ = fs::remove_file(&tmp_file);
            return Err(TodoError::Io(err));
        }
        if let Err(err) = fs::rename(&tmp_file, path) {
            let _ = fs::remove_file(&tmp_file);
            return Err(TodoError::Io(err));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(|err| {
            error!("event=store_get module=store status=error key={} error={}", key, err);
            TodoError::Io(err)
        })?;
        let value: Value = serde_json::from_str(&content).map_err(TodoError::Serialization)?;
        Ok(Some(value))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let path = self.key_path(key)?;
        self.ensure_dir(&self.root)?;

        let content = serde_json::to_string_pretty(&value).map_err(TodoError::Serialization)?;
        self.write_atomic(&path, &content).map_err(|err| {
            error!("event=store_set module=store status=error key={} error={}", key, err);
            err
        })?;
        debug!("event=store_set module=store status=ok key={}", key);
        Ok(())
    }
}

/// Keys become file names, so they are limited to `[A-Za-z0-9_.-]` and may not
/// start with a dot.
fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(TodoError::Store(format!("Invalid storage key: {:?}", key)))
    }
}
