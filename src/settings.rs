use crate::persistence::{atomic_write, read_file, PersistenceError};
use anyhow::Result;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Key under which the default session length is stored
pub const DEFAULT_POMODORO_DURATION_KEY: &str = "defaultPomodoroDuration";

/// Key/value settings store
pub trait Settings {
    fn value(&self, key: &str) -> Option<Value>;

    fn set_value(&mut self, key: &str, value: Value);

    /// Integer setting, falling back to `default` when missing or not an integer
    fn int_value(&self, key: &str, default: i64) -> i64 {
        self.value(key)
            .and_then(|value| value.as_i64())
            .unwrap_or(default)
    }
}

/// Settings that live only as long as the process
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: HashMap<String, Value>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Settings for MemorySettings {
    fn value(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set_value(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }
}

/// Settings backed by a flat JSON object on disk, rewritten on every change
#[derive(Debug)]
pub struct JsonSettings {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonSettings {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = read_file(&path)?;

        let values = if content.trim().is_empty() {
            Map::new()
        } else {
            match serde_json::from_str::<Value>(&content) {
                Ok(Value::Object(values)) => values,
                Ok(_) => return Err(PersistenceError::NotAnObject(path).into()),
                Err(source) => return Err(PersistenceError::Corrupt { path, source }.into()),
            }
        };

        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.values)?;
        atomic_write(&self.path, &json)
    }
}

impl Settings for JsonSettings {
    fn value(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set_value(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
        if let Err(e) = self.save() {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to save settings");
        }
    }
}
