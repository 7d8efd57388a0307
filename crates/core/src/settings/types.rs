//! Persisted picker settings.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::modes::ModeFlags;

/// The record written to the settings store and to export files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSettings {
    /// Selected checkpoint ids.
    #[serde(default, alias = "selectedModels")]
    pub selected_ids: Vec<String>,
    #[serde(default, alias = "selectedVAE")]
    pub selected_vae: Option<String>,
    #[serde(default)]
    pub selected_loras: Vec<String>,
    /// Display name behind each selected id when the record was written.
    /// Ids are positional, so restore matches entries by these names.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub selected_names: BTreeMap<String, String>,
    #[serde(default)]
    pub flags: ModeFlags,
    /// When the record was written.
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    /// Set on exported documents only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<DateTime<Utc>>,
}

impl Default for SavedSettings {
    fn default() -> Self {
        Self {
            selected_ids: Vec::new(),
            selected_vae: None,
            selected_loras: Vec::new(),
            selected_names: BTreeMap::new(),
            flags: ModeFlags::default(),
            timestamp: Utc::now(),
            export_date: None,
        }
    }
}

impl SavedSettings {
    pub fn to_json(&self) -> Result<String, SettingsError> {
        serde_json::to_string(self).map_err(|e| SettingsError::Serialization(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, SettingsError> {
        serde_json::to_string_pretty(self).map_err(|e| SettingsError::Serialization(e.to_string()))
    }

    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        serde_json::from_str(text).map_err(|e| SettingsError::Serialization(e.to_string()))
    }
}

/// An exported settings document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsExport {
    /// Suggested download name, `widget-settings-YYYY-MM-DD.json`.
    pub file_name: String,
    /// Pretty-printed JSON body.
    pub contents: String,
}

/// Errors for settings persistence.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Settings storage error: {0}")]
    Storage(String),

    #[error("Settings serialization error: {0}")]
    Serialization(String),
}
