//! Configuration file support for multitool.
//!
//! Loads an optional `config.toml` from `$MULTITOOL_CONFIG` or the user's
//! config directory, then applies environment overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::types::{CONFIG_ENV, ColorMode, SHOW_ALL_ENV};

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// List hidden applets too (same as setting `SHOW_ALL`)
    pub show_all: bool,
    /// Color mode for diagnostics
    pub color: ColorMode,
}

impl CliConfig {
    /// Load the config file (if any) and apply environment overrides.
    pub fn load() -> Self {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_from_path(&path),
            None => Self::default(),
        };
        config.apply_env();
        config
    }

    /// Location of the config file: `$MULTITOOL_CONFIG`, else
    /// `<config dir>/multitool/config.toml`.
    pub fn config_path() -> Option<PathBuf> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
            _ => dirs::config_dir().map(|dir| dir.join("multitool").join("config.toml")),
        }
    }

    /// Load config from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "loaded config");
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// `SHOW_ALL` (any value) forces hidden applets visible.
    pub fn apply_env(&mut self) {
        if std::env::var_os(SHOW_ALL_ENV).is_some() {
            self.show_all = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = CliConfig::load_from_path(Path::new("/nonexistent/multitool.toml"));
        assert!(!config.show_all);
        assert_eq!(config.color, ColorMode::Auto);
    }

    #[test]
    fn test_load_values() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "show_all = true\ncolor = \"never\"\n");
        let config = CliConfig::load_from_path(&path);
        assert!(config.show_all);
        assert_eq!(config.color, ColorMode::Never);
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "show_all = \"maybe\"\n[[[");
        let config = CliConfig::load_from_path(&path);
        assert!(!config.show_all);
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "show_all = false\n");

        // SAFETY: serialized with the other env-dependent tests.
        unsafe {
            std::env::set_var(CONFIG_ENV, &path);
            std::env::set_var(SHOW_ALL_ENV, "1");
        }
        let config = CliConfig::load();
        unsafe {
            std::env::remove_var(SHOW_ALL_ENV);
            std::env::remove_var(CONFIG_ENV);
        }

        assert!(config.show_all);
    }

    #[test]
    #[serial]
    fn test_config_env_selects_path() {
        // SAFETY: serialized with the other env-dependent tests.
        unsafe { std::env::set_var(CONFIG_ENV, "/tmp/custom-multitool.toml") };
        let path = CliConfig::config_path();
        unsafe { std::env::remove_var(CONFIG_ENV) };

        assert_eq!(path, Some(PathBuf::from("/tmp/custom-multitool.toml")));
    }
}
