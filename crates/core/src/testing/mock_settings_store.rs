//! Mock settings store for testing.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::settings::{SettingsError, SettingsStore};

#[derive(Debug, Default)]
struct Inner {
    values: HashMap<String, String>,
    saves: usize,
    fail_saves: bool,
    fail_loads: bool,
}

/// Settings store with controllable failures.
///
/// Provides:
/// - a count of successful saves
/// - forced save or load failures
/// - direct seeding of stored values
#[derive(Debug, Default)]
pub struct MockSettingsStore {
    inner: Mutex<Inner>,
}

impl MockSettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Store a raw value as if it had been saved earlier.
    pub fn seed(&self, key: &str, value: &str) {
        self.guard().values.insert(key.to_string(), value.to_string());
    }

    /// The raw value currently stored under `key`.
    pub fn stored(&self, key: &str) -> Option<String> {
        self.guard().values.get(key).cloned()
    }

    /// Number of saves that succeeded.
    pub fn save_count(&self) -> usize {
        self.guard().saves
    }

    /// Make every subsequent save fail.
    pub fn set_fail_saves(&self, fail: bool) {
        self.guard().fail_saves = fail;
    }

    /// Make every subsequent load fail.
    pub fn set_fail_loads(&self, fail: bool) {
        self.guard().fail_loads = fail;
    }
}

impl SettingsStore for MockSettingsStore {
    fn load(&self, key: &str) -> Result<Option<String>, SettingsError> {
        let inner = self.guard();
        if inner.fail_loads {
            return Err(SettingsError::Storage("simulated load failure".to_string()));
        }
        Ok(inner.values.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        let mut inner = self.guard();
        if inner.fail_saves {
            return Err(SettingsError::Storage("simulated save failure".to_string()));
        }
        inner.values.insert(key.to_string(), value.to_string());
        inner.saves += 1;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SettingsError> {
        self.guard().values.remove(key);
        Ok(())
    }
}
