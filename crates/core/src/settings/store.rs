use std::collections::HashMap;
use std::sync::Mutex;

use super::SettingsError;

/// Trait for a string-keyed settings medium.
pub trait SettingsStore: Send + Sync {
    /// Read the value under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>, SettingsError>;

    /// Write `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> Result<(), SettingsError>;

    /// Remove the value under `key`.
    fn remove(&self, key: &str) -> Result<(), SettingsError>;
}

/// In-memory settings store (useful for testing and ephemeral sessions).
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, SettingsError> {
        self.values
            .lock()
            .map_err(|e| SettingsError::Storage(format!("lock poisoned: {}", e)))
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SettingsError> {
        self.lock()?.remove(key);
        Ok(())
    }
}
