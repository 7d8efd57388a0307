use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::{Path, PathBuf};

use super::{types::Config, ConfigError};

/// Environment prefix for overrides. Nested keys use a double underscore,
/// e.g. `MODELPICKER_PICKER__MAX_SELECTION=8`.
const ENV_PREFIX: &str = "MODELPICKER_";

/// Load the picker configuration from a TOML file, then apply environment
/// overrides.
///
/// Relative catalog and settings database paths are taken relative to the
/// directory holding the file, so a config can sit next to its catalogs.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let mut config: Config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    if let Some(base) = path.parent() {
        anchor(base, &mut config.catalog.path);
        if let Some(sdxl_path) = config.catalog.sdxl_path.as_mut() {
            anchor(base, sdxl_path);
        }
        anchor(base, &mut config.settings.database);
    }

    Ok(config)
}

/// Parse configuration from a TOML string. Paths are kept as written and
/// the environment is not consulted.
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn anchor(base: &Path, path: &mut PathBuf) {
    if path.is_relative() {
        *path = base.join(&*path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_from_str_keeps_relative_paths() {
        let config = load_config_from_str(
            r#"
[catalog]
path = "models.json"
sdxl_path = "xl-models.json"
"#,
        )
        .unwrap();
        assert_eq!(config.catalog.path, PathBuf::from("models.json"));
        assert_eq!(
            config.catalog.sdxl_path.as_deref(),
            Some(Path::new("xl-models.json"))
        );
    }

    #[test]
    fn test_from_str_rejects_non_numeric_cap() {
        let err = load_config_from_str(
            r#"
[catalog]
path = "models.json"

[picker]
max_selection = "five"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = load_config(Path::new("/nonexistent/modelpicker.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_directory_is_not_a_config_file() {
        let dir = TempDir::new().unwrap();
        let err = load_config(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_file_paths_resolve_next_to_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
[catalog]
path = "models.json"
sdxl_path = "catalogs/xl-models.json"

[settings]
database = "picker.db"

[picker]
max_selection = 6
max_loras = 3
"#,
        );

        let config = load_config(&path).unwrap();
        assert_eq!(config.catalog.path, dir.path().join("models.json"));
        assert_eq!(
            config.catalog.sdxl_path,
            Some(dir.path().join("catalogs/xl-models.json"))
        );
        assert_eq!(config.settings.database, dir.path().join("picker.db"));
        assert_eq!(config.picker.max_selection, 6);
        assert_eq!(config.picker.max_loras, 3);
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
[catalog]
path = "/srv/models/models.json"
"#,
        );

        let config = load_config(&path).unwrap();
        assert_eq!(config.catalog.path, PathBuf::from("/srv/models/models.json"));
        assert!(config.catalog.sdxl_path.is_none());
        assert_eq!(config.settings.database, dir.path().join("modelpicker.db"));
    }
}
