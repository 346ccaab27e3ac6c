use crate::date::WeekStart;
use crate::error::{Result, TodoError};
use crate::repo::DEFAULT_NAMESPACE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

pub const CONFIG_KEYS: &[&str] = &["namespace", "week-start", "auto-inherit"];

/// Configuration for daytodo, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct TodoConfig {
    /// Prefix of every storage key (`<namespace>_<YYYY-MM-DD>`)
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Weekday shown in the first calendar column
    #[serde(default)]
    pub week_start: WeekStart,

    /// Carry unfinished tasks forward when a new day is first seen
    #[serde(default = "default_auto_inherit")]
    pub auto_inherit: bool,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_auto_inherit() -> bool {
    true
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            week_start: WeekStart::default(),
            auto_inherit: default_auto_inherit(),
        }
    }
}

impl TodoConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(TodoError::Io)?;
        let config: TodoConfig =
            serde_json::from_str(&content).map_err(TodoError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(TodoError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(TodoError::Serialization)?;
        fs::write(config_path, content).map_err(TodoError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "namespace" => Some(self.namespace.clone()),
            "week-start" => Some(self.week_start.to_string()),
            "auto-inherit" => Some(self.auto_inherit.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "namespace" => {
                let value = value.trim();
                let valid = !value.is_empty()
                    && value
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
                if !valid {
                    return Err(format!(
                        "Invalid namespace '{}': use letters, digits, '_' or '-'",
                        value
                    ));
                }
                self.namespace = value.to_string();
            }
            "week-start" => self.week_start = value.parse()?,
            "auto-inherit" => {
                self.auto_inherit = match value.trim().to_ascii_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    other => return Err(format!("Invalid boolean '{}'", other)),
                }
            }
            other => return Err(format!("Unknown config key: {}", other)),
        }
        Ok(())
    }
}
