//! Testing utilities: a recording event sink, a settings store with
//! injectable failures, and catalog fixtures.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use modelpicker_core::testing::{fixtures, MockSettingsStore, RecordingSink};
//!
//! let sink = Arc::new(RecordingSink::new());
//! let store = Arc::new(MockSettingsStore::new());
//! let mut picker = ModelPicker::new(&PickerConfig::default(), sink.clone(), store.clone());
//! picker.load_catalog(fixtures::scenario_document());
//! ```

mod mock_event_sink;
mod mock_settings_store;

pub use mock_event_sink::RecordingSink;
pub use mock_settings_store::MockSettingsStore;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::catalog::CatalogDocument;
    use crate::classifier::RawEntry;

    /// Checkpoint names of the reference scenario, in ingestion order.
    pub const SCENARIO_MODELS: [&str; 3] =
        ["RealismEngine", "AnythingXL_v5", "CounterfeitV3-inpainting"];

    /// The reference scenario catalog as a JSON document.
    pub const SCENARIO_JSON: &str = r#"{
        "RealismEngine": {},
        "AnythingXL_v5": {},
        "CounterfeitV3-inpainting": {}
    }"#;

    /// Checkpoints of the reference scenario.
    pub fn scenario_models() -> Vec<RawEntry> {
        SCENARIO_MODELS.iter().map(|name| RawEntry::new(*name)).collect()
    }

    /// The reference scenario catalog with no VAEs or LoRAs.
    pub fn scenario_document() -> CatalogDocument {
        CatalogDocument {
            models: scenario_models(),
            ..Default::default()
        }
    }

    /// A larger catalog covering every preset, with VAEs and LoRAs.
    pub fn full_document() -> CatalogDocument {
        CatalogDocument {
            models: [
                "RealismEngine",
                "AnythingXL_v5",
                "CounterfeitV3-inpainting",
                "D5K_v6",
                "MeinaMix_anime",
                "PhotonMerged",
                "OilPainting_art",
                "JuggernautXL",
                "DreamShaper",
            ]
            .iter()
            .map(|name| RawEntry::new(*name))
            .collect(),
            vaes: named(&["vae-ft-mse-840000", "kl-f8-anime2", "sdxl_vae"]),
            loras: named(&["add_detail", "more_details", "epi_noiseoffset"]),
        }
    }

    /// Raw entries with just a name.
    pub fn named(names: &[&str]) -> Vec<RawEntry> {
        names.iter().map(|name| RawEntry::new(*name)).collect()
    }
}
