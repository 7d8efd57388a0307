//! Prometheus metrics for the picker engine.
//!
//! This module provides metrics for:
//! - Catalog loads and sizes
//! - Selection toggles and presets
//! - Settings import/export and persistence failures

use once_cell::sync::Lazy;
use prometheus::{IntCounter, IntCounterVec, IntGaugeVec, Opts};

// =============================================================================
// Catalog
// =============================================================================

/// Entries in the current catalog by asset kind.
pub static CATALOG_ENTRIES: Lazy<IntGaugeVec> = Lazy::new(|| {
    IntGaugeVec::new(
        Opts::new("modelpicker_catalog_entries", "Entries in the loaded catalog"),
        &["kind"],
    )
    .unwrap()
});

/// Catalog loads total.
pub static CATALOG_LOADS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("modelpicker_catalog_loads_total", "Total catalog loads").unwrap()
});

// =============================================================================
// Selection
// =============================================================================

/// Selection toggles by kind and result.
pub static SELECTION_TOGGLES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("modelpicker_selection_toggles_total", "Total selection toggles"),
        &["kind", "result"], // "selected", "deselected", "rejected"
    )
    .unwrap()
});

/// Quick-select presets applied by name.
pub static PRESETS_APPLIED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("modelpicker_presets_applied_total", "Total presets applied"),
        &["preset"],
    )
    .unwrap()
});

// =============================================================================
// Settings
// =============================================================================

/// Settings imports and exports by result.
pub static SETTINGS_TRANSFERS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "modelpicker_settings_transfers_total",
            "Total settings imports and exports",
        ),
        &["direction", "result"], // direction: "import", "export"
    )
    .unwrap()
});

/// Failed writes to the settings store.
pub static SETTINGS_SAVE_FAILURES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "modelpicker_settings_save_failures_total",
        "Total failed settings saves",
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(CATALOG_ENTRIES.clone()),
        Box::new(CATALOG_LOADS.clone()),
        Box::new(SELECTION_TOGGLES.clone()),
        Box::new(PRESETS_APPLIED.clone()),
        Box::new(SETTINGS_TRANSFERS.clone()),
        Box::new(SETTINGS_SAVE_FAILURES.clone()),
    ]
}
