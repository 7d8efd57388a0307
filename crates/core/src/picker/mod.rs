//! The picker engine.
//!
//! [`ModelPicker`] owns one catalog and one selection per asset kind, the
//! working modes, and handles to the event sink and the settings store. The
//! application constructs it and passes it to whatever needs it; there is no
//! global instance.
//!
//! Every operation computes its result before committing, so a failed call
//! leaves the picker untouched. Each successful selection mutation emits
//! exactly one [`PickerEvent::SelectionChanged`] per affected asset kind and
//! then writes the settings record (fire-and-forget).

mod persistence;
mod types;

pub use types::*;

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::catalog::{
    AssetKind, CatalogDocument, CatalogEntry, CatalogStore, FilterUpdate, TypeFilter,
};
use crate::classifier::RawEntry;
use crate::config::PickerConfig;
use crate::events::{EventSink, PickerEvent, Severity};
use crate::metrics::{CATALOG_ENTRIES, CATALOG_LOADS, PRESETS_APPLIED, SELECTION_TOGGLES};
use crate::modes::{ModeFlags, ModeUpdate};
use crate::quick_select::{self, Preset};
use crate::selection::{SelectionError, SelectionPolicy, SelectionSet, ToggleOutcome};
use crate::settings::{SettingsStore, DEFAULT_SETTINGS_KEY};

/// Catalog and selection for one asset kind.
#[derive(Debug, Clone)]
struct AssetSlot {
    catalog: CatalogStore,
    selection: SelectionSet,
}

impl AssetSlot {
    fn new(kind: AssetKind, policy: SelectionPolicy) -> Self {
        Self {
            catalog: CatalogStore::new(kind),
            selection: SelectionSet::new(policy),
        }
    }

    /// Display names of selected entries, in catalog order.
    fn selected_names(&self) -> Vec<String> {
        self.catalog
            .entries()
            .iter()
            .filter(|e| self.selection.contains(&e.id))
            .map(|e| e.display_name.clone())
            .collect()
    }

    /// Selected ids, in catalog order.
    fn selected_ids(&self) -> Vec<String> {
        self.catalog
            .entries()
            .iter()
            .filter(|e| self.selection.contains(&e.id))
            .map(|e| e.id.clone())
            .collect()
    }

    /// Ids of catalog entries matching `pred`, in catalog order, cut to the
    /// selection capacity.
    fn pick_ids(&self, pred: impl Fn(&CatalogEntry) -> bool) -> Vec<String> {
        self.catalog
            .entries()
            .iter()
            .filter(|e| pred(e))
            .take(self.selection.policy().capacity())
            .map(|e| e.id.clone())
            .collect()
    }
}

/// The model selection and filtering engine.
pub struct ModelPicker {
    models: AssetSlot,
    vaes: AssetSlot,
    loras: AssetSlot,
    flags: ModeFlags,
    events: Arc<dyn EventSink>,
    settings: Arc<dyn SettingsStore>,
    settings_key: String,
}

impl fmt::Debug for ModelPicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelPicker")
            .field("models", &self.models.catalog.len())
            .field("vaes", &self.vaes.catalog.len())
            .field("loras", &self.loras.catalog.len())
            .field("flags", &self.flags)
            .field("settings_key", &self.settings_key)
            .finish()
    }
}

impl ModelPicker {
    /// Create an empty picker. Checkpoints follow `config`, VAEs are
    /// single-select and LoRAs use their own cap.
    pub fn new(
        config: &PickerConfig,
        events: Arc<dyn EventSink>,
        settings: Arc<dyn SettingsStore>,
    ) -> Self {
        Self {
            models: AssetSlot::new(AssetKind::Model, config.model_policy()),
            vaes: AssetSlot::new(AssetKind::Vae, SelectionPolicy::single()),
            loras: AssetSlot::new(AssetKind::Lora, config.lora_policy()),
            flags: ModeFlags::default(),
            events,
            settings,
            settings_key: DEFAULT_SETTINGS_KEY.to_string(),
        }
    }

    /// Use a different key in the settings store.
    pub fn with_settings_key(mut self, key: impl Into<String>) -> Self {
        self.settings_key = key.into();
        self
    }

    fn slot(&self, kind: AssetKind) -> &AssetSlot {
        match kind {
            AssetKind::Model => &self.models,
            AssetKind::Vae => &self.vaes,
            AssetKind::Lora => &self.loras,
        }
    }

    fn slot_mut(&mut self, kind: AssetKind) -> &mut AssetSlot {
        match kind {
            AssetKind::Model => &mut self.models,
            AssetKind::Vae => &mut self.vaes,
            AssetKind::Lora => &mut self.loras,
        }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Replace every catalog with the sections of `document`.
    pub fn load_catalog(&mut self, document: CatalogDocument) {
        let CatalogDocument {
            models,
            vaes,
            loras,
        } = document;

        let mut changed = self.load_entries_inner(AssetKind::Model, models);
        changed |= self.load_entries_inner(AssetKind::Vae, vaes);
        changed |= self.load_entries_inner(AssetKind::Lora, loras);
        if changed {
            self.persist();
        }
    }

    /// Replace the catalog of one asset kind.
    pub fn load_entries(&mut self, kind: AssetKind, raw: Vec<RawEntry>) {
        if self.load_entries_inner(kind, raw) {
            self.persist();
        }
    }

    /// Load, then carry the selection over by display name. Ids are
    /// positional, so an old id is only kept when the new catalog has the
    /// same entry under it. Returns true when the selected ids changed.
    fn load_entries_inner(&mut self, kind: AssetKind, raw: Vec<RawEntry>) -> bool {
        let (total, dropped, changed) = {
            let slot = self.slot_mut(kind);
            let previous_names = slot.selected_names();
            let previous_ids = slot.selection.members().clone();

            slot.catalog.load(raw);
            let carried: Vec<String> = previous_names
                .iter()
                .filter_map(|name| slot.catalog.find_by_name(name))
                .map(|e| e.id.clone())
                .collect();
            let dropped = previous_names.len() - carried.len();
            slot.selection.replace(carried);

            (
                slot.catalog.len(),
                dropped,
                *slot.selection.members() != previous_ids,
            )
        };

        CATALOG_LOADS.inc();
        CATALOG_ENTRIES
            .with_label_values(&[kind.id_prefix()])
            .set(total as i64);
        self.events.emit(PickerEvent::CatalogLoaded { kind, total });

        if dropped > 0 {
            info!("Dropped {} stale {} selections after reload", dropped, kind);
        }
        if changed {
            self.emit_selection_changed(kind);
        }
        changed
    }

    pub fn catalog(&self, kind: AssetKind) -> &CatalogStore {
        &self.slot(kind).catalog
    }

    /// Merge a partial filter into the filter of one asset kind.
    pub fn set_filter(&mut self, kind: AssetKind, update: &FilterUpdate) {
        self.slot_mut(kind).catalog.set_filter(update);
    }

    /// The filtered view with selection and compatibility marks.
    ///
    /// Mode compatibility only applies to checkpoints.
    pub fn view(&self, kind: AssetKind) -> PickerView<'_> {
        let slot = self.slot(kind);
        let entries = slot
            .catalog
            .current_view()
            .into_iter()
            .map(|entry| ViewEntry {
                selected: slot.selection.contains(&entry.id),
                compatible: kind != AssetKind::Model || self.flags.is_compatible(entry),
                entry,
            })
            .collect();

        PickerView {
            kind,
            entries,
            total: slot.catalog.len(),
            selected_count: slot.selection.len(),
            max_selection: slot.selection.policy().capacity(),
            filter: slot.catalog.filter(),
            flags: self.flags,
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn selection(&self, kind: AssetKind) -> &SelectionSet {
        &self.slot(kind).selection
    }

    /// Display names of selected entries, in catalog order.
    pub fn selected_names(&self, kind: AssetKind) -> Vec<String> {
        self.slot(kind).selected_names()
    }

    /// Toggle one entry.
    ///
    /// Selecting a checkpoint switches on the SDXL / inpainting modes its
    /// classification implies.
    pub fn toggle(&mut self, kind: AssetKind, id: &str) -> Result<ToggleOutcome, PickerError> {
        let slot = self.slot_mut(kind);
        let name = match slot.catalog.get(id) {
            Some(entry) => entry.display_name.clone(),
            None => {
                return Err(PickerError::EntryNotFound {
                    kind,
                    id: id.to_string(),
                })
            }
        };

        let outcome = match slot.selection.toggle(id) {
            Ok(outcome) => outcome,
            Err(SelectionError::MaxReached { max }) => {
                SELECTION_TOGGLES
                    .with_label_values(&[kind.id_prefix(), "rejected"])
                    .inc();
                self.events
                    .emit(PickerEvent::SelectionRejected { kind, max });
                self.notify(
                    format!("You can select up to {} {}s", max, kind.label()),
                    Severity::Warning,
                );
                return Err(PickerError::MaxSelectionReached { kind, max });
            }
        };

        if outcome.is_selected() && kind == AssetKind::Model {
            if let Some(entry) = self.models.catalog.get(id) {
                if self.flags.detect_from(entry) {
                    debug!("Modes switched to {:?} by {}", self.flags, name);
                }
            }
        }

        let (result, verb) = match outcome {
            ToggleOutcome::Selected => ("selected", "selected"),
            ToggleOutcome::Deselected => ("deselected", "deselected"),
        };
        SELECTION_TOGGLES
            .with_label_values(&[kind.id_prefix(), result])
            .inc();

        self.emit_selection_changed(kind);
        self.notify(
            format!("{} {}: {}", kind.label(), verb, name),
            Severity::Success,
        );
        self.persist();
        Ok(outcome)
    }

    /// Empty the selection of one asset kind.
    pub fn clear(&mut self, kind: AssetKind) {
        self.slot_mut(kind).selection.clear();
        self.emit_selection_changed(kind);
        self.persist();
    }

    /// Empty every selection.
    pub fn clear_all(&mut self) {
        for kind in AssetKind::ALL {
            self.slot_mut(kind).selection.clear();
            self.emit_selection_changed(kind);
        }
        self.notify("All selections cleared", Severity::Warning);
        self.persist();
    }

    /// Replace the selection with the entries carrying the given display
    /// names. Unknown names are ignored. Returns how many were selected.
    pub fn select_by_names<S: AsRef<str>>(&mut self, kind: AssetKind, names: &[S]) -> usize {
        let ids = {
            let wanted: HashSet<&str> = names.iter().map(AsRef::as_ref).collect();
            self.slot(kind)
                .pick_ids(|e| wanted.contains(e.display_name.as_str()))
        };
        let count = ids.len();

        self.slot_mut(kind).selection.replace(ids);
        self.emit_selection_changed(kind);
        self.persist();
        count
    }

    /// Add every visible entry of the given type (and, for checkpoints,
    /// compatible with the modes) to the selection until the cap is reached.
    /// Returns how many were added.
    pub fn select_all(&mut self, kind: AssetKind, model_type: TypeFilter) -> usize {
        let (ids, added) = {
            let slot = self.slot(kind);
            let capacity = slot.selection.policy().capacity();
            let mut ids = slot.selected_ids();
            let before = ids.len();
            for entry in slot.catalog.current_view() {
                if ids.len() >= capacity {
                    break;
                }
                let wanted = model_type == TypeFilter::All || entry.is_inpainting();
                let compatible = kind != AssetKind::Model || self.flags.is_compatible(entry);
                if wanted && compatible && !slot.selection.contains(&entry.id) {
                    ids.push(entry.id.clone());
                }
            }
            let added = ids.len() - before;
            (ids, added)
        };

        self.slot_mut(kind).selection.replace(ids);
        self.emit_selection_changed(kind);
        self.notify(
            format!("Selected {} more {}s", added, kind.label()),
            Severity::Success,
        );
        self.persist();
        added
    }

    /// Apply a quick-select preset to the checkpoint selection.
    ///
    /// The selection is cleared and replaced by the resolved entries; unknown
    /// presets resolve to nothing and so just clear it. In single-select mode
    /// only the first resolved entry is kept. Returns the selected names.
    pub fn apply_preset(&mut self, preset_name: &str) -> Vec<String> {
        let capacity = self.models.selection.policy().capacity();
        let ids: Vec<String> = quick_select::resolve(preset_name, &self.models.catalog)
            .into_iter()
            .take(capacity)
            .map(|e| e.id.clone())
            .collect();

        let label = preset_name
            .parse::<Preset>()
            .map(|p| p.as_str())
            .unwrap_or("unknown");
        PRESETS_APPLIED.with_label_values(&[label]).inc();

        self.models.selection.replace(ids);
        self.emit_selection_changed(AssetKind::Model);

        let names = self.models.selected_names();
        self.notify(
            format!("Quick-selected {} {} models", names.len(), preset_name),
            Severity::Info,
        );
        self.persist();
        names
    }

    // =========================================================================
    // Modes
    // =========================================================================

    pub fn flags(&self) -> ModeFlags {
        self.flags
    }

    pub fn set_sdxl_mode(&mut self, enabled: bool) {
        self.set_modes(ModeUpdate {
            sdxl: Some(enabled),
            inpainting: None,
        });
    }

    pub fn set_inpainting_mode(&mut self, enabled: bool) {
        self.set_modes(ModeUpdate {
            sdxl: None,
            inpainting: Some(enabled),
        });
    }

    /// Apply a partial mode change, notifying once per mode named.
    pub fn set_modes(&mut self, update: ModeUpdate) -> ModeFlags {
        if let Some(enabled) = update.sdxl {
            self.flags.sdxl = enabled;
            self.notify_mode("SDXL", enabled);
        }
        if let Some(enabled) = update.inpainting {
            self.flags.inpainting = enabled;
            self.notify_mode("Inpainting", enabled);
        }
        if update.sdxl.is_some() || update.inpainting.is_some() {
            self.persist();
        }
        self.flags
    }

    fn notify_mode(&self, mode: &str, enabled: bool) {
        let (state, severity) = if enabled {
            ("enabled", Severity::Success)
        } else {
            ("disabled", Severity::Warning)
        };
        self.notify(format!("{} mode {}", mode, state), severity);
    }

    // =========================================================================
    // Events
    // =========================================================================

    fn emit_selection_changed(&self, kind: AssetKind) {
        self.events.emit(PickerEvent::SelectionChanged {
            kind,
            selected: self.slot(kind).selected_names(),
        });
    }

    fn notify(&self, message: impl Into<String>, severity: Severity) {
        self.events.emit(PickerEvent::notification(message, severity));
    }
}
