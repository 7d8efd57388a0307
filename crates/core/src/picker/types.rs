//! View and error types for the picker.

use serde::Serialize;
use thiserror::Error;

use crate::catalog::{AssetKind, CatalogEntry, CatalogError, FilterState};
use crate::modes::ModeFlags;
use crate::settings::SettingsError;

/// One entry of a rendered view.
#[derive(Debug, Clone, Serialize)]
pub struct ViewEntry<'a> {
    #[serde(flatten)]
    pub entry: &'a CatalogEntry,
    pub selected: bool,
    /// False when the active modes rule this entry out.
    pub compatible: bool,
}

/// What a renderer needs to draw one asset kind.
#[derive(Debug, Clone, Serialize)]
pub struct PickerView<'a> {
    pub kind: AssetKind,
    /// Entries passing the filter, in catalog order.
    pub entries: Vec<ViewEntry<'a>>,
    /// Entries in the catalog, ignoring the filter.
    pub total: usize,
    pub selected_count: usize,
    /// Effective selection cap.
    pub max_selection: usize,
    pub filter: &'a FilterState,
    pub flags: ModeFlags,
}

impl PickerView<'_> {
    pub fn selected_ids(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.selected)
            .map(|e| e.entry.id.as_str())
            .collect()
    }
}

/// Errors for picker operations.
///
/// None of these leave the picker partially updated.
#[derive(Debug, Error)]
pub enum PickerError {
    #[error("Maximum {max} {kind} selections reached")]
    MaxSelectionReached { kind: AssetKind, max: usize },

    #[error("No {kind} entry with id {id}")]
    EntryNotFound { kind: AssetKind, id: String },

    #[error("Invalid settings file: {0}")]
    ImportParse(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}
