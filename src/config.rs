// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::DEFAULT_RATES_URL;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Latest-rates endpoint queried once at startup.
    pub rates_url: String,
    /// JSON file holding the persisted preferences.
    pub preferences_path: PathBuf,
    /// Overrides the HTTP client's default timeout.
    pub request_timeout_secs: Option<u64>,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rates_url: DEFAULT_RATES_URL.to_string(),
            preferences_path: PathBuf::from("preferences.json"),
            request_timeout_secs: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config = toml::from_str(&config_str)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}

/// Load `path`, or the built-in defaults when it is missing or invalid.
///
/// Runs before logging is set up, so a file that exists but cannot be read
/// or parsed is handed back for the caller to report. A missing file is the
/// normal case and carries no error.
pub fn load_config_or_default(path: &Path) -> (Config, Option<anyhow::Error>) {
    if !path.exists() {
        return (Config::default(), None);
    }
    match load_config(path) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    }
}

pub fn save_config(path: &Path, config: &Config) -> anyhow::Result<()> {
    let config_str = toml::to_string_pretty(config)?;
    fs::write(path, config_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.rates_url, DEFAULT_RATES_URL);
        assert_eq!(config.preferences_path, PathBuf::from("preferences.json"));
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_deserialization_from_toml_string() {
        let toml_content = r#"
rates_url = "http://localhost:9000/latest"
preferences_path = "/var/lib/holibayt/prefs.json"
request_timeout_secs = 5
"#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.rates_url, "http://localhost:9000/latest");
        assert_eq!(config.preferences_path, PathBuf::from("/var/lib/holibayt/prefs.json"));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
        // Missing fields keep their defaults.
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_empty_file_is_all_defaults() {
        let config: Config = toml::from_str("").expect("Failed to parse TOML");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_toml_syntax() {
        let invalid_toml = r#"
rates_url = "http://localhost
"#;

        let result: Result<Config, _> = toml::from_str(invalid_toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("absent.toml");
        assert!(load_config(&path).is_err());

        let (config, error) = load_config_or_default(&path);
        assert_eq!(config, Config::default());
        assert!(error.is_none());
    }

    #[test]
    fn test_invalid_file_falls_back_with_error() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        temp_file
            .write_all(b"rates_url = \"http://localhost\n")
            .expect("Failed to write");

        let (config, error) = load_config_or_default(temp_file.path());
        assert_eq!(config, Config::default());
        let error = error.expect("parse error should be reported");
        assert!(error.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_save_and_load_config_to_temp_file() {
        let config = Config {
            rates_url: "http://rates.test/latest".to_string(),
            preferences_path: PathBuf::from("prefs.json"),
            request_timeout_secs: Some(3),
            log_level: "debug".to_string(),
        };

        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        save_config(temp_file.path(), &config).expect("Failed to save");
        let loaded = load_config(temp_file.path()).expect("Failed to load");
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_config_from_written_file() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        temp_file
            .write_all(b"log_level = \"warn\"\n")
            .expect("Failed to write");

        let loaded = load_config(temp_file.path()).expect("Failed to parse");
        assert_eq!(loaded.log_level, "warn");
        assert_eq!(loaded.rates_url, DEFAULT_RATES_URL);
    }
}
