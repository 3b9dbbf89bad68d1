use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf, time::Duration};

use crate::model::{Coordinates, TemperatureUnit};

/// Environment variable that overrides the API key stored on disk.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// unit = "fahrenheit"
///
/// [home]
/// lat = 51.5085
/// lon = -0.1257
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub api_key: Option<String>,

    /// Overrides the provider base URL, e.g. for a local mock server.
    pub base_url: Option<String>,

    #[serde(default)]
    pub unit: TemperatureUnit,

    /// Quiet period for search input, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Drop responses of fetches that were superseded before they settled.
    #[serde(default)]
    pub discard_stale: bool,

    /// Position used when the screen starts from geolocation.
    pub home: Option<Coordinates>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            unit: TemperatureUnit::default(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            discard_stale: false,
            home: None,
        }
    }
}

impl Config {
    /// Load config from disk and apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = Self::load_from(&path)?;

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            cfg.apply_env_api_key(&key);
        }

        Ok(cfg)
    }

    /// Load config from `path`, or return an empty default if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-screen", "weather-screen")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    fn apply_env_api_key(&mut self, key: &str) {
        let key = key.trim();
        if !key.is_empty() {
            self.api_key = Some(key.to_string());
        }
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// The opaque provider credential.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty()).ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `weather-screen configure` or set {API_KEY_ENV}."
            )
        })
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.api_key().unwrap_err();

        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn empty_api_key_counts_as_missing() {
        let mut cfg = Config::default();
        cfg.set_api_key(String::new());

        assert!(cfg.api_key().is_err());
    }

    #[test]
    fn env_key_overrides_file_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        cfg.apply_env_api_key("  ENV_KEY ");
        assert_eq!(cfg.api_key().expect("key must exist"), "ENV_KEY");

        cfg.apply_env_api_key("   ");
        assert_eq!(cfg.api_key().expect("key must exist"), "ENV_KEY");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from(&dir.path().join("absent.toml")).expect("load");

        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.debounce(), Duration::from_millis(500));
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.unit = TemperatureUnit::Fahrenheit;
        cfg.discard_stale = true;
        cfg.home = Some(Coordinates { lat: 51.5, lon: -0.12 });

        cfg.save_to(&path).expect("save");
        let loaded = Config::load_from(&path).expect("load");

        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = \"abc\"\ndebounce_ms = 250\n").expect("write");

        let cfg = Config::load_from(&path).expect("load");
        assert_eq!(cfg.api_key().expect("key"), "abc");
        assert_eq!(cfg.debounce(), Duration::from_millis(250));
        assert_eq!(cfg.unit, TemperatureUnit::Celsius);
        assert!(!cfg.discard_stale);
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "unit = 3").expect("write");

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
