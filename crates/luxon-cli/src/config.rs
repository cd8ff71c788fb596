//! Configuration file management.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use luxon_core::{DEFAULT_TEST_VALUE, clamp_test_value};
use serde::{Deserialize, Serialize};

/// Poll interval used when the config does not set one.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 200;

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// IIO device directory to read from instead of auto-discovery
    #[serde(default)]
    pub sensor: Option<PathBuf>,

    /// Sensor poll interval in milliseconds
    #[serde(default)]
    pub poll_interval_ms: Option<u64>,

    /// Initial slider value when entering test mode
    #[serde(default)]
    pub test_value: Option<f32>,

    /// Default output format
    #[serde(default)]
    pub format: Option<String>,

    /// Disable colored output
    #[serde(default)]
    pub no_color: bool,
}

impl Config {
    /// Get the config file path
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("luxon")
            .join("config.toml")
    }

    /// Load config from file, or return default if not found
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config: {}", e);
                    }
                },
                Err(e) => {
                    eprintln!("Warning: Failed to read config: {}", e);
                }
            }
        }
        Self::default()
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// The defaults written by `luxon config init`.
    pub fn initial() -> Self {
        Self {
            poll_interval_ms: Some(DEFAULT_POLL_INTERVAL_MS),
            test_value: Some(DEFAULT_TEST_VALUE),
            format: Some("text".to_string()),
            ..Default::default()
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(
            self.poll_interval_ms
                .filter(|ms| *ms > 0)
                .unwrap_or(DEFAULT_POLL_INTERVAL_MS),
        )
    }
}

/// Resolve sensor path: explicit argument wins over config
pub fn resolve_sensor(sensor: Option<PathBuf>, config: &Config) -> Option<PathBuf> {
    sensor.or_else(|| config.sensor.clone())
}

/// Resolve the initial test value, clamped to the slider range.
pub fn resolve_test_value(value: Option<f32>, config: &Config) -> f32 {
    clamp_test_value(value.or(config.test_value).unwrap_or(DEFAULT_TEST_VALUE))
}

/// Resolve poll interval: explicit milliseconds win over config.
pub fn resolve_poll_interval(interval_ms: Option<u64>, config: &Config) -> Duration {
    match interval_ms {
        Some(ms) if ms > 0 => Duration::from_millis(ms),
        _ => config.poll_interval(),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_resolve_sensor_prefers_arg() {
        let config = Config {
            sensor: Some(PathBuf::from("/config/dev")),
            ..Default::default()
        };
        let result = resolve_sensor(Some(PathBuf::from("/arg/dev")), &config);
        assert_eq!(result, Some(PathBuf::from("/arg/dev")));
    }

    #[test]
    fn test_resolve_sensor_falls_back_to_config() {
        let config = Config {
            sensor: Some(PathBuf::from("/config/dev")),
            ..Default::default()
        };
        assert_eq!(
            resolve_sensor(None, &config),
            Some(PathBuf::from("/config/dev"))
        );
        assert_eq!(resolve_sensor(None, &Config::default()), None);
    }

    #[test]
    fn test_resolve_test_value() {
        let config = Config {
            test_value: Some(450.0),
            ..Default::default()
        };
        assert_eq!(resolve_test_value(None, &config), 450.0);
        assert_eq!(resolve_test_value(Some(120.0), &config), 120.0);
        assert_eq!(resolve_test_value(Some(5000.0), &config), 1000.0);
        assert_eq!(resolve_test_value(None, &Config::default()), 300.0);
    }

    #[test]
    fn test_resolve_poll_interval() {
        let config = Config {
            poll_interval_ms: Some(500),
            ..Default::default()
        };
        assert_eq!(
            resolve_poll_interval(None, &config),
            Duration::from_millis(500)
        );
        assert_eq!(
            resolve_poll_interval(Some(50), &config),
            Duration::from_millis(50)
        );
        // Zero means "not set".
        assert_eq!(
            resolve_poll_interval(Some(0), &Config::default()),
            Duration::from_millis(200)
        );
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("config.toml");

        let config = Config {
            sensor: Some(PathBuf::from("/sys/bus/iio/devices/iio:device0")),
            no_color: true,
            ..Config::initial()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path), config);
    }

    #[test]
    fn test_load_missing_or_invalid_falls_back() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        assert_eq!(Config::load_from(&path), Config::default());

        fs::write(&path, "poll_interval_ms = \"fast\"").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("no_color = true").unwrap();
        assert!(config.no_color);
        assert_eq!(config.sensor, None);
        assert_eq!(config.poll_interval(), Duration::from_millis(200));
    }
}
