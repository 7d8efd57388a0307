//! Saving, restoring, exporting and importing picker settings.

use std::collections::{BTreeMap, HashSet};

use chrono::Utc;
use tracing::{debug, info, warn};

use super::{AssetSlot, ModelPicker, PickerError};
use crate::catalog::AssetKind;
use crate::events::Severity;
use crate::metrics::{SETTINGS_SAVE_FAILURES, SETTINGS_TRANSFERS};
use crate::settings::{SavedSettings, SettingsExport};

impl ModelPicker {
    /// The current selections and modes as a settings record.
    pub fn snapshot(&self) -> SavedSettings {
        let selected_names = [&self.models, &self.vaes, &self.loras]
            .into_iter()
            .flat_map(|slot| {
                slot.catalog
                    .entries()
                    .iter()
                    .filter(move |e| slot.selection.contains(&e.id))
                    .map(|e| (e.id.clone(), e.display_name.clone()))
            })
            .collect();

        SavedSettings {
            selected_ids: self.models.selected_ids(),
            selected_vae: self.vaes.selected_ids().into_iter().next(),
            selected_loras: self.loras.selected_ids(),
            selected_names,
            flags: self.flags,
            timestamp: Utc::now(),
            export_date: None,
        }
    }

    /// Write the current snapshot to the settings store.
    ///
    /// Failures are logged and counted, never returned.
    pub(super) fn persist(&self) {
        let result = self
            .snapshot()
            .to_json()
            .and_then(|json| self.settings.save(&self.settings_key, &json));

        if let Err(e) = result {
            SETTINGS_SAVE_FAILURES.inc();
            warn!("Failed to save settings under {}: {}", self.settings_key, e);
        }
    }

    /// Load the saved record, if any, and apply it to the current catalogs.
    ///
    /// Missing or unreadable records leave the defaults in place. Returns
    /// true when a record was applied.
    pub fn restore(&mut self) -> bool {
        let text = match self.settings.load(&self.settings_key) {
            Ok(Some(text)) => text,
            Ok(None) => {
                debug!("No saved settings under {}", self.settings_key);
                return false;
            }
            Err(e) => {
                warn!("Failed to read saved settings: {}", e);
                return false;
            }
        };

        match SavedSettings::from_json(&text) {
            Ok(settings) => {
                self.apply_settings(&settings);
                info!(
                    "Restored settings: {} models, {} loras",
                    self.models.selection.len(),
                    self.loras.selection.len()
                );
                true
            }
            Err(e) => {
                warn!("Ignoring unreadable saved settings: {}", e);
                false
            }
        }
    }

    /// Produce a downloadable settings document.
    pub fn export_settings(&self) -> Result<SettingsExport, PickerError> {
        let now = Utc::now();
        let mut settings = self.snapshot();
        settings.export_date = Some(now);

        match settings.to_json_pretty() {
            Ok(contents) => {
                SETTINGS_TRANSFERS
                    .with_label_values(&["export", "success"])
                    .inc();
                self.notify("Settings exported successfully!", Severity::Success);
                Ok(SettingsExport {
                    file_name: format!("widget-settings-{}.json", now.format("%Y-%m-%d")),
                    contents,
                })
            }
            Err(e) => {
                SETTINGS_TRANSFERS
                    .with_label_values(&["export", "failure"])
                    .inc();
                self.notify("Failed to export settings", Severity::Error);
                Err(e.into())
            }
        }
    }

    /// Replace selections and modes with an imported settings document.
    ///
    /// A document that does not parse leaves the picker untouched. Ids the
    /// current catalogs do not know are dropped and over-cap selections are
    /// cut in catalog order.
    pub fn import_settings(&mut self, text: &str) -> Result<(), PickerError> {
        let settings = match SavedSettings::from_json(text) {
            Ok(settings) => settings,
            Err(e) => {
                SETTINGS_TRANSFERS
                    .with_label_values(&["import", "failure"])
                    .inc();
                self.notify(
                    "Failed to import settings. Invalid file format.",
                    Severity::Error,
                );
                return Err(PickerError::ImportParse(e.to_string()));
            }
        };

        self.apply_settings(&settings);
        self.persist();
        SETTINGS_TRANSFERS
            .with_label_values(&["import", "success"])
            .inc();
        self.notify("Settings imported successfully!", Severity::Success);
        Ok(())
    }

    fn apply_settings(&mut self, settings: &SavedSettings) {
        let names = &settings.selected_names;
        let models = self.models.resolve_saved(&settings.selected_ids, names);
        let vae = self
            .vaes
            .resolve_saved(settings.selected_vae.as_slice(), names);
        let loras = self.loras.resolve_saved(&settings.selected_loras, names);

        let mut changed = Vec::new();
        for (kind, ids) in [
            (AssetKind::Model, models),
            (AssetKind::Vae, vae),
            (AssetKind::Lora, loras),
        ] {
            let selection = &mut self.slot_mut(kind).selection;
            let before = selection.members().clone();
            selection.replace(ids);
            if *selection.members() != before {
                changed.push(kind);
            }
        }
        self.flags = settings.flags;

        for kind in changed {
            self.emit_selection_changed(kind);
        }
    }
}

impl AssetSlot {
    /// Map saved ids onto the current catalog, in catalog order and cut to
    /// capacity. An id with a recorded name follows that name; older records
    /// without names fall back to the id itself.
    fn resolve_saved(&self, ids: &[String], names: &BTreeMap<String, String>) -> Vec<String> {
        let wanted: HashSet<&str> = ids
            .iter()
            .filter_map(|id| match names.get(id) {
                Some(name) => self.catalog.find_by_name(name).map(|e| e.id.as_str()),
                None => Some(id.as_str()),
            })
            .collect();
        self.pick_ids(|e| wanted.contains(e.id.as_str()))
    }
}
