//! TOML-based preferences.
//!
//! Stores the single user preference that survives restarts -- the interval
//! length in minutes -- plus notification toggles. Configuration lives at
//! `~/.config/tickmind/config.toml` (or `tickmind-dev` with
//! `TICKMIND_ENV=dev`).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::interval::IntervalLength;

/// The engine's view of the persisted interval preference.
///
/// Injected at engine construction; the engine reads it once at startup and
/// writes through it on every explicit change.
pub trait PreferenceStore: Send {
    fn interval(&self) -> IntervalLength;
    fn set_interval(&mut self, value: IntervalLength) -> Result<(), ConfigError>;
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub sound: bool,
    /// Path to a custom alert sound file (optional). If set, this file is
    /// played instead of the system completion sound.
    #[serde(default)]
    pub custom_sound: Option<String>,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sound: true,
            custom_sound: None,
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/tickmind/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: f64,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

fn default_interval_minutes() -> f64 {
    30.0
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval_minutes: default_interval_minutes(),
            notifications: NotificationsConfig::default(),
        }
    }
}

/// Returns `~/.config/tickmind[-dev]/` based on TICKMIND_ENV.
///
/// Set TICKMIND_ENV=dev to use the development data directory.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TICKMIND_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("tickmind-dev")
    } else {
        base_dir.join("tickmind")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DirUnavailable(e.to_string()))?;
    Ok(dir)
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the defaults on first run.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get a config value as a string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "interval_minutes" => Some(self.interval_minutes.to_string()),
            "notifications.enabled" => Some(self.notifications.enabled.to_string()),
            "notifications.sound" => Some(self.notifications.sound.to_string()),
            "notifications.custom_sound" => Some(
                self.notifications
                    .custom_sound
                    .clone()
                    .unwrap_or_default(),
            ),
            _ => None,
        }
    }

    /// Set a config value by key. Returns an error for unknown keys or
    /// unparseable values. Does not persist; call [`Config::save`].
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "interval_minutes" => {
                let interval: IntervalLength =
                    value.parse().map_err(|e| ConfigError::InvalidValue {
                        key: key.into(),
                        message: format!("{e}"),
                    })?;
                self.interval_minutes = interval.minutes();
            }
            "notifications.enabled" => {
                self.notifications.enabled =
                    value.parse().map_err(|_| ConfigError::InvalidValue {
                        key: key.into(),
                        message: format!("cannot parse '{value}' as bool"),
                    })?;
            }
            "notifications.sound" => {
                self.notifications.sound =
                    value.parse().map_err(|_| ConfigError::InvalidValue {
                        key: key.into(),
                        message: format!("cannot parse '{value}' as bool"),
                    })?;
            }
            "notifications.custom_sound" => {
                self.notifications.custom_sound = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

impl PreferenceStore for Config {
    /// A stored value that fails validation (hand-edited file) degrades to
    /// zero, which keeps the engine constructible but disables starting.
    fn interval(&self) -> IntervalLength {
        IntervalLength::new(self.interval_minutes).unwrap_or_else(|_| IntervalLength::zero())
    }

    fn set_interval(&mut self, value: IntervalLength) -> Result<(), ConfigError> {
        self.interval_minutes = value.minutes();
        self.save()
    }
}

/// In-memory store for tests and for one-off runs that must not touch the
/// on-disk preference (e.g. `run --interval`).
#[derive(Debug, Clone)]
pub struct MemoryPrefs {
    interval: IntervalLength,
}

impl MemoryPrefs {
    pub fn new(interval: IntervalLength) -> Self {
        Self { interval }
    }
}

impl PreferenceStore for MemoryPrefs {
    fn interval(&self) -> IntervalLength {
        self.interval
    }

    fn set_interval(&mut self, value: IntervalLength) -> Result<(), ConfigError> {
        self.interval = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        // First load writes the defaults.
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.interval_minutes, 30.0);
        assert!(cfg.notifications.enabled);
        assert!(path.exists());

        let again = Config::load_from(&path).unwrap();
        assert_eq!(again.interval_minutes, cfg.interval_minutes);
    }

    #[test]
    fn set_interval_by_key_validates() {
        let mut cfg = Config::default();
        cfg.set("interval_minutes", "0.5").unwrap();
        assert_eq!(cfg.interval_minutes, 0.5);

        assert!(cfg.set("interval_minutes", "-3").is_err());
        assert!(cfg.set("interval_minutes", "abc").is_err());
        assert!(cfg.set("no.such.key", "1").is_err());
        // Failed sets leave the previous value intact.
        assert_eq!(cfg.interval_minutes, 0.5);
    }

    #[test]
    fn get_by_key() {
        let cfg = Config::default();
        assert_eq!(cfg.get("interval_minutes").as_deref(), Some("30"));
        assert_eq!(cfg.get("notifications.sound").as_deref(), Some("true"));
        assert_eq!(cfg.get("bogus"), None);
    }

    #[test]
    fn invalid_stored_interval_degrades_to_zero() {
        let cfg = Config {
            interval_minutes: -5.0,
            ..Config::default()
        };
        assert!(cfg.interval().is_zero());
    }

    #[test]
    fn memory_prefs_write_through() {
        let mut prefs = MemoryPrefs::new(IntervalLength::new(30.0).unwrap());
        prefs
            .set_interval(IntervalLength::new(1.5).unwrap())
            .unwrap();
        assert_eq!(prefs.interval().minutes(), 1.5);
    }
}
