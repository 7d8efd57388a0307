use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{info, warn};

use modelpicker_core::{
    BroadcastSink, CatalogDocument, CatalogError, Config, ModelPicker, SettingsStore,
};

use crate::api::ApiError;

const SDXL_CATALOG: &str = "sdxl";
const DEFAULT_CATALOG: &str = "default";

/// Shared application state
pub struct AppState {
    config: Config,
    picker: Mutex<ModelPicker>,
    events: BroadcastSink,
    settings: Arc<dyn SettingsStore>,
    /// Whether the SDXL catalog file is the one loaded. Only an explicit
    /// mode change swaps catalogs; auto-detected SDXL mode does not.
    sdxl_catalog: AtomicBool,
}

impl AppState {
    pub fn new(
        config: Config,
        picker: ModelPicker,
        events: BroadcastSink,
        settings: Arc<dyn SettingsStore>,
        sdxl_catalog: bool,
    ) -> Self {
        Self {
            config,
            picker: Mutex::new(picker),
            events,
            settings,
            sdxl_catalog: AtomicBool::new(sdxl_catalog),
        }
    }

    /// Build the picker from configuration: load the catalog file chosen
    /// last session, then restore saved settings against it.
    pub fn initialize(
        config: Config,
        settings: Arc<dyn SettingsStore>,
    ) -> Result<Self, CatalogError> {
        let sdxl_catalog = config.catalog.sdxl_path.is_some()
            && settings
                .load(&catalog_key(&config))
                .ok()
                .flatten()
                .is_some_and(|choice| choice == SDXL_CATALOG);

        let events = BroadcastSink::default();
        let mut picker = ModelPicker::new(
            &config.picker,
            Arc::new(events.clone()),
            Arc::clone(&settings),
        )
        .with_settings_key(config.settings.key.clone());

        let path = catalog_path(&config, sdxl_catalog);
        info!("Loading catalog from {:?}", path);
        picker.load_catalog(CatalogDocument::from_path(path)?);
        if picker.restore() {
            info!("Restored saved selections");
        }

        Ok(Self::new(config, picker, events, settings, sdxl_catalog))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Lock the picker for the duration of one operation.
    pub fn picker(&self) -> Result<MutexGuard<'_, ModelPicker>, ApiError> {
        self.picker
            .lock()
            .map_err(|_| ApiError::internal("picker state is poisoned"))
    }

    pub fn events(&self) -> &BroadcastSink {
        &self.events
    }

    /// Whether the SDXL catalog file is loaded.
    pub fn sdxl_catalog(&self) -> bool {
        self.sdxl_catalog.load(Ordering::SeqCst)
    }

    /// Record which catalog file is loaded, for the next startup.
    pub fn set_sdxl_catalog(&self, sdxl: bool) {
        self.sdxl_catalog.store(sdxl, Ordering::SeqCst);
        let choice = if sdxl { SDXL_CATALOG } else { DEFAULT_CATALOG };
        if let Err(e) = self.settings.save(&catalog_key(&self.config), choice) {
            warn!("Failed to save catalog choice: {}", e);
        }
    }

    /// The catalog file matching the given SDXL mode.
    pub fn catalog_path(&self, sdxl: bool) -> &Path {
        catalog_path(&self.config, sdxl)
    }

    /// The catalog file currently loaded.
    pub fn loaded_catalog_path(&self) -> &Path {
        self.catalog_path(self.sdxl_catalog())
    }
}

fn catalog_key(config: &Config) -> String {
    format!("{}.catalog", config.settings.key)
}

fn catalog_path(config: &Config, sdxl: bool) -> &Path {
    match (&config.catalog.sdxl_path, sdxl) {
        (Some(path), true) => path,
        _ => &config.catalog.path,
    }
}
