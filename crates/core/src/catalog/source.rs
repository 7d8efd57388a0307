//! Parsing of catalog documents.
//!
//! A catalog document is JSON. It is either a flat `name -> metadata` map of
//! checkpoints, or an object with `models`, `vaes` and `loras` sections
//! (also accepted as `model_list`, `vae_list`, `lora_list`). Document order is
//! ingestion order.

use std::path::Path;

use serde_json::{Map, Value};

use super::{AssetKind, CatalogError};
use crate::classifier::RawEntry;

const SECTIONS: &[(AssetKind, &[&str])] = &[
    (AssetKind::Model, &["models", "model_list"]),
    (AssetKind::Vae, &["vaes", "vae_list"]),
    (AssetKind::Lora, &["loras", "lora_list"]),
];

/// Raw entries of a catalog document, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogDocument {
    pub models: Vec<RawEntry>,
    pub vaes: Vec<RawEntry>,
    pub loras: Vec<RawEntry>,
}

impl CatalogDocument {
    pub fn entries(&self, kind: AssetKind) -> &[RawEntry] {
        match kind {
            AssetKind::Model => &self.models,
            AssetKind::Vae => &self.vaes,
            AssetKind::Lora => &self.loras,
        }
    }

    fn entries_mut(&mut self, kind: AssetKind) -> &mut Vec<RawEntry> {
        match kind {
            AssetKind::Model => &mut self.models,
            AssetKind::Vae => &mut self.vaes,
            AssetKind::Lora => &mut self.loras,
        }
    }

    /// Parse a catalog document from a JSON string.
    pub fn from_json_str(text: &str) -> Result<Self, CatalogError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| CatalogError::Parse(e.to_string()))?;
        let Value::Object(root) = value else {
            return Err(CatalogError::Parse(
                "catalog document must be a JSON object".to_string(),
            ));
        };

        let is_sectioned = SECTIONS
            .iter()
            .flat_map(|(_, keys)| keys.iter())
            .any(|key| root.get(*key).is_some_and(Value::is_object));

        let mut document = CatalogDocument::default();
        if is_sectioned {
            for (kind, keys) in SECTIONS {
                for key in *keys {
                    if let Some(Value::Object(section)) = root.get(*key) {
                        document.entries_mut(*kind).extend(raw_entries(section));
                    }
                }
            }
        } else {
            document.models = raw_entries(&root);
        }

        Ok(document)
    }

    /// Read and parse a catalog document from disk.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&text)
    }
}

fn raw_entries(section: &Map<String, Value>) -> Vec<RawEntry> {
    section
        .iter()
        .map(|(name, metadata)| RawEntry::from_json(name.clone(), metadata))
        .collect()
}
