//! Configuration file persistence for SERP Preview
//!
//! This module handles loading and saving configuration files to
//! platform-specific directories with robust error handling and
//! graceful fallback to defaults.

use crate::config::Settings;
use crate::error::{Error, Result, ResultExt};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Application name used for the config directory
const APP_NAME: &str = "serp-preview";

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

/// Backup configuration file name (used during atomic writes)
const CONFIG_BACKUP_NAME: &str = "config.json.bak";

// ─────────────────────────────────────────────────────────────────────────────
// Platform-Specific Directory Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Get the platform-specific configuration directory for the application.
///
/// - **Windows**: `%APPDATA%\serp-preview\`
/// - **macOS**: `~/Library/Application Support/serp-preview/`
/// - **Linux**: `~/.config/serp-preview/`
///
/// # Errors
///
/// Returns `Error::ConfigDirNotFound` if the config directory cannot be determined
/// (e.g., if the HOME environment variable is not set).
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the configuration file.
pub fn get_config_file_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

// ─────────────────────────────────────────────────────────────────────────────
// Load Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Load configuration from the default config file location.
///
/// # Behavior
///
/// 1. If the config file exists and is valid JSON, load and sanitize it
/// 2. If the config file doesn't exist, return default settings
/// 3. If the config file is corrupted/invalid, log a warning and return defaults
pub fn load_config() -> Settings {
    get_config_file_path()
        .and_then(|path| load_config_from(&path))
        .unwrap_or_warn_default(Settings::default(), "Failed to load configuration")
}

/// Load configuration from an explicit file path.
pub fn load_config_from(config_path: &Path) -> Result<Settings> {
    if !config_path.exists() {
        debug!(
            "Config file not found at {}, using defaults",
            config_path.display()
        );
        return Ok(Settings::default());
    }

    debug!("Loading config from: {}", config_path.display());

    let contents = fs::read_to_string(config_path).map_err(|e| Error::ConfigLoad {
        path: config_path.to_path_buf(),
        source: Box::new(e),
    })?;

    if contents.trim().is_empty() {
        debug!("Config file is empty, using defaults");
        return Ok(Settings::default());
    }

    let settings = Settings::from_json_sanitized(&contents).map_err(|e| {
        warn!(
            "Config file at {} contains invalid JSON: {}",
            config_path.display(),
            e
        );
        Error::ConfigParse {
            message: format!("Failed to parse config file: {}", e),
            source: Some(Box::new(e)),
        }
    })?;

    info!(
        "Configuration loaded successfully from {}",
        config_path.display()
    );
    Ok(settings)
}

// ─────────────────────────────────────────────────────────────────────────────
// Save Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Save configuration to the default config file location.
///
/// # Errors
///
/// - `Error::ConfigDirNotFound`: Config directory cannot be determined
/// - `Error::ConfigSave`: Failed to write the config file
pub fn save_config(settings: &Settings) -> Result<()> {
    save_config_in(&get_config_dir()?, settings)
}

/// Save configuration into `config_dir`, creating it if necessary.
///
/// Writes to a backup file first, then renames it over the config file.
pub fn save_config_in(config_dir: &Path, settings: &Settings) -> Result<()> {
    if !config_dir.exists() {
        debug!("Creating config directory: {}", config_dir.display());
        fs::create_dir_all(config_dir).map_err(|e| Error::ConfigSave {
            path: config_dir.to_path_buf(),
            source: Box::new(e),
        })?;
    }

    let config_path = config_dir.join(CONFIG_FILE_NAME);
    let backup_path = config_dir.join(CONFIG_BACKUP_NAME);

    debug!("Saving config to: {}", config_path.display());

    let json = serde_json::to_string_pretty(settings).map_err(|e| Error::ConfigSave {
        path: config_path.clone(),
        source: Box::new(e),
    })?;

    fs::write(&backup_path, &json).map_err(|e| Error::ConfigSave {
        path: backup_path.clone(),
        source: Box::new(e),
    })?;

    fs::rename(&backup_path, &config_path).map_err(|e| Error::ConfigSave {
        path: config_path.clone(),
        source: Box::new(e),
    })?;

    info!(
        "Configuration saved successfully to {}",
        config_path.display()
    );
    Ok(())
}

/// Save configuration, ignoring errors.
///
/// Returns `true` if the save was successful, `false` otherwise.
pub fn save_config_silent(settings: &Settings) -> bool {
    match save_config(settings) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to save configuration: {}", e);
            false
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;
    use tempfile::TempDir;

    /// Helper to create a test environment with a temporary config directory.
    struct TestEnv {
        _temp_dir: TempDir,
        config_dir: PathBuf,
        config_file: PathBuf,
    }

    impl TestEnv {
        fn new() -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp dir");
            let config_dir = temp_dir.path().join(APP_NAME);
            let config_file = config_dir.join(CONFIG_FILE_NAME);
            Self {
                _temp_dir: temp_dir,
                config_dir,
                config_file,
            }
        }

        fn write_config(&self, content: &str) {
            fs::create_dir_all(&self.config_dir).expect("Failed to create config dir");
            fs::write(&self.config_file, content).expect("Failed to write config");
        }
    }

    #[test]
    fn test_get_config_dir_contains_app_name() {
        if let Ok(path) = get_config_dir() {
            assert!(path.to_string_lossy().contains(APP_NAME));
        }
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let env = TestEnv::new();
        let settings = load_config_from(&env.config_file).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_empty_file_uses_defaults() {
        let env = TestEnv::new();
        env.write_config("   \n");
        let settings = load_config_from(&env.config_file).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_partial_config() {
        let env = TestEnv::new();
        env.write_config(r#"{"theme": "dark", "preview": {"description_limit": 120}}"#);
        let settings = load_config_from(&env.config_file).unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.preview.description_limit, 120);
        assert_eq!(settings.preview.title_limit, 55);
    }

    #[test]
    fn test_load_corrupted_config_returns_parse_error() {
        let env = TestEnv::new();
        env.write_config("{ invalid json }");
        let result = load_config_from(&env.config_file);
        assert!(matches!(result, Err(Error::ConfigParse { .. })));
    }

    #[test]
    fn test_load_sanitizes_values() {
        let env = TestEnv::new();
        env.write_config(r#"{"preview": {"title_limit": 0, "description_limit": 5000}}"#);
        let settings = load_config_from(&env.config_file).unwrap();
        assert_eq!(settings.preview.title_limit, 1);
        assert_eq!(settings.preview.description_limit, 1000);
    }

    #[test]
    fn test_save_creates_directory_and_roundtrips() {
        let env = TestEnv::new();
        let mut original = Settings::default();
        original.theme = Theme::System;
        original.form.base_url = "https://example.com".to_string();
        original.draft.description = "saved draft".to_string();

        save_config_in(&env.config_dir, &original).unwrap();
        assert!(env.config_file.exists());
        assert!(!env.config_dir.join(CONFIG_BACKUP_NAME).exists());

        let loaded = load_config_from(&env.config_file).unwrap();
        assert_eq!(original, loaded);
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let env = TestEnv::new();
        env.write_config(r#"{"theme": "dark"}"#);

        save_config_in(&env.config_dir, &Settings::default()).unwrap();
        let loaded = load_config_from(&env.config_file).unwrap();
        assert_eq!(loaded.theme, Theme::Light);
    }

    #[test]
    fn test_config_with_unknown_fields_ignored() {
        let env = TestEnv::new();
        env.write_config(r#"{"theme": "dark", "future_feature": true}"#);
        let settings = load_config_from(&env.config_file).unwrap();
        assert_eq!(settings.theme, Theme::Dark);
    }

    #[test]
    fn test_config_with_wrong_types_is_error() {
        let env = TestEnv::new();
        env.write_config(r#"{"preview": {"title_limit": "long"}}"#);
        assert!(load_config_from(&env.config_file).is_err());
    }
}
