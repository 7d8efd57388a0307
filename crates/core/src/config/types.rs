use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use crate::selection::SelectionPolicy;
use crate::settings::DEFAULT_SETTINGS_KEY;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub picker: PickerConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_port() -> u16 {
    8080
}

/// Catalog sources
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Catalog document loaded at startup.
    pub path: PathBuf,
    /// Catalog document swapped in while SDXL mode is on.
    #[serde(default)]
    pub sdxl_path: Option<PathBuf>,
}

/// Selection policy for each asset kind
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PickerConfig {
    /// Checkpoint selection cap.
    #[serde(default = "default_max_selection")]
    pub max_selection: usize,
    /// Whether more than one checkpoint may be selected.
    #[serde(default = "default_allow_multiple")]
    pub allow_multiple: bool,
    /// LoRA selection cap.
    #[serde(default = "default_max_loras")]
    pub max_loras: usize,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            max_selection: default_max_selection(),
            allow_multiple: default_allow_multiple(),
            max_loras: default_max_loras(),
        }
    }
}

impl PickerConfig {
    pub fn model_policy(&self) -> SelectionPolicy {
        SelectionPolicy {
            max_selection: self.max_selection,
            allow_multiple: self.allow_multiple,
        }
    }

    pub fn lora_policy(&self) -> SelectionPolicy {
        SelectionPolicy::multiple(self.max_loras)
    }
}

fn default_max_selection() -> usize {
    5
}

fn default_allow_multiple() -> bool {
    true
}

fn default_max_loras() -> usize {
    10
}

/// Settings persistence
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SettingsConfig {
    /// SQLite database holding saved settings.
    #[serde(default = "default_settings_db")]
    pub database: PathBuf,
    /// Key the settings record is stored under.
    #[serde(default = "default_settings_key")]
    pub key: String,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            database: default_settings_db(),
            key: default_settings_key(),
        }
    }
}

fn default_settings_db() -> PathBuf {
    PathBuf::from("modelpicker.db")
}

fn default_settings_key() -> String {
    DEFAULT_SETTINGS_KEY.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_config() {
        let toml = r#"
[catalog]
path = "models.json"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.catalog.path.to_str().unwrap(), "models.json");
        assert!(config.catalog.sdxl_path.is_none());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host.to_string(), "127.0.0.1");
        assert_eq!(config.picker.max_selection, 5);
        assert!(config.picker.allow_multiple);
        assert_eq!(config.settings.key, "widgetSettings");
        assert_eq!(config.settings.database.to_str().unwrap(), "modelpicker.db");
    }

    #[test]
    fn test_deserialize_missing_catalog_fails() {
        let toml = r#"
[server]
port = 8080
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml = r#"
[catalog]
path = "/data/models.json"
sdxl_path = "/data/xl-models.json"

[server]
host = "0.0.0.0"
port = 9000

[picker]
max_selection = 8
allow_multiple = false
max_loras = 4

[settings]
database = "/data/picker.db"
key = "pickerSettings"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.catalog.sdxl_path.as_deref().unwrap().to_str().unwrap(),
            "/data/xl-models.json"
        );
        assert_eq!(config.server.port, 9000);
        assert_eq!(
            config.picker.model_policy(),
            SelectionPolicy {
                max_selection: 8,
                allow_multiple: false
            }
        );
        assert_eq!(config.picker.lora_policy(), SelectionPolicy::multiple(4));
        assert_eq!(config.settings.key, "pickerSettings");
    }
}
