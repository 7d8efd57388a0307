pub mod catalog;
pub mod classifier;
pub mod config;
pub mod events;
pub mod metrics;
pub mod modes;
pub mod picker;
pub mod quick_select;
pub mod selection;
pub mod settings;
pub mod testing;

pub use catalog::{
    AssetKind, CatalogDocument, CatalogEntry, CatalogError, CatalogStore, CategoryFilter,
    FilterState, FilterUpdate, TypeFilter, VersionFilter,
};
pub use classifier::{classify, Category, Classification, RawEntry, SizeClass, Tag};
pub use config::{
    load_config, load_config_from_str, validate_config, CatalogConfig, Config, ConfigError,
    PickerConfig, ServerConfig, SettingsConfig,
};
pub use events::{
    BroadcastSink, EventSink, NullSink, PickerEvent, PickerEventEnvelope, Severity,
};
pub use modes::{ModeFlags, ModeUpdate};
pub use picker::{ModelPicker, PickerError, PickerView, ViewEntry};
pub use quick_select::{resolve, Preset, PRESET_LIMIT};
pub use selection::{SelectionError, SelectionPolicy, SelectionSet, ToggleOutcome};
pub use settings::{
    MemorySettingsStore, SavedSettings, SettingsError, SettingsExport, SettingsStore,
    SqliteSettingsStore, DEFAULT_SETTINGS_KEY,
};
