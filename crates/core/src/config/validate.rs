use super::{types::Config, ConfigError};
use crate::quick_select::PRESET_LIMIT;

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Selection caps are positive
/// - With multiple selection, the checkpoint cap can hold a full preset
/// - Settings key is not empty
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.picker.max_selection == 0 {
        return Err(ConfigError::ValidationError(
            "picker.max_selection must be at least 1".to_string(),
        ));
    }

    if config.picker.allow_multiple && config.picker.max_selection < PRESET_LIMIT {
        return Err(ConfigError::ValidationError(format!(
            "picker.max_selection must be at least {} when allow_multiple is set, got {}",
            PRESET_LIMIT, config.picker.max_selection
        )));
    }

    if config.picker.max_loras == 0 {
        return Err(ConfigError::ValidationError(
            "picker.max_loras must be at least 1".to_string(),
        ));
    }

    if config.settings.key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "settings.key cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CatalogConfig, PickerConfig, ServerConfig, SettingsConfig};
    use std::net::IpAddr;
    use std::path::PathBuf;

    fn valid_config() -> Config {
        Config {
            catalog: CatalogConfig {
                path: PathBuf::from("models.json"),
                sdxl_path: None,
            },
            server: ServerConfig::default(),
            picker: PickerConfig::default(),
            settings: SettingsConfig::default(),
        }
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let mut config = valid_config();
        config.server = ServerConfig {
            host: "0.0.0.0".parse::<IpAddr>().unwrap(),
            port: 0,
        };
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_cap_below_preset_size_fails() {
        let mut config = valid_config();
        config.picker.max_selection = 2;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("max_selection"));
    }

    #[test]
    fn test_validate_small_cap_allowed_in_single_mode() {
        let mut config = valid_config();
        config.picker.max_selection = 1;
        config.picker.allow_multiple = false;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_zero_caps_fail() {
        let mut config = valid_config();
        config.picker.max_selection = 0;
        config.picker.allow_multiple = false;
        assert!(validate_config(&config).is_err());

        let mut config = valid_config();
        config.picker.max_loras = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_empty_settings_key_fails() {
        let mut config = valid_config();
        config.settings.key = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }
}
