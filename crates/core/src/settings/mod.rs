//! Settings persistence.
//!
//! The picker writes a [`SavedSettings`] record to a [`SettingsStore`] after
//! every change and reads it back on startup. The same record is used for
//! file export and import.

mod sqlite;
mod store;
mod types;

pub use sqlite::SqliteSettingsStore;
pub use store::{MemorySettingsStore, SettingsStore};
pub use types::*;

/// Default key the settings record is stored under.
pub const DEFAULT_SETTINGS_KEY: &str = "widgetSettings";
