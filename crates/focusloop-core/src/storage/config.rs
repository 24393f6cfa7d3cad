//! TOML-based application configuration.
//!
//! Stores the cadence knobs, notification/sound/vibration toggles, the UI
//! theme flag and the time scale. Lives at
//! `~/.config/focusloop/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::timer::Cadence;

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Gates the looping break alert.
    #[serde(default = "default_true")]
    pub sound: bool,
    #[serde(default = "default_true")]
    pub vibration: bool,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub dark_mode: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/focusloop/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cadence: Cadence,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub ui: UiConfig,
    /// Simulated seconds per wall-clock second (1 = real time).
    #[serde(default = "default_time_scale")]
    pub time_scale: u32,
}

fn default_true() -> bool {
    true
}
fn default_time_scale() -> u32 {
    1
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sound: true,
            vibration: true,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { dark_mode: true }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cadence: Cadence::default(),
            notifications: NotificationsConfig::default(),
            ui: UiConfig::default(),
            time_scale: default_time_scale(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/focusloop"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or write and return the default.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be parsed, or if the
    /// default cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_owned(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_owned(),
            message: e.to_string(),
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_owned(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_owned(),
            message: e.to_string(),
        })
    }

    /// Get a config value as a string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "cadence.focus_secs" => self.cadence.focus_secs.to_string(),
            "cadence.short_break_secs" => self.cadence.short_break_secs.to_string(),
            "cadence.long_break_secs" => self.cadence.long_break_secs.to_string(),
            "cadence.sessions_before_long_break" => {
                self.cadence.sessions_before_long_break.to_string()
            }
            "notifications.enabled" => self.notifications.enabled.to_string(),
            "notifications.sound" => self.notifications.sound.to_string(),
            "notifications.vibration" => self.notifications.vibration.to_string(),
            "ui.dark_mode" => self.ui.dark_mode.to_string(),
            "time_scale" => self.time_scale.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Set a config value by key. Returns an error for unknown keys or
    /// unparseable values; does not save.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "cadence.focus_secs" => self.cadence.focus_secs = parse_secs(key, value)?,
            "cadence.short_break_secs" => {
                self.cadence.short_break_secs = parse_secs(key, value)?
            }
            "cadence.long_break_secs" => {
                self.cadence.long_break_secs = parse_secs(key, value)?
            }
            "cadence.sessions_before_long_break" => {
                self.cadence.sessions_before_long_break = parse_secs(key, value)?
            }
            "notifications.enabled" => self.notifications.enabled = parse_bool(key, value)?,
            "notifications.sound" => self.notifications.sound = parse_bool(key, value)?,
            "notifications.vibration" => {
                self.notifications.vibration = parse_bool(key, value)?
            }
            "ui.dark_mode" => self.ui.dark_mode = parse_bool(key, value)?,
            "time_scale" => {
                let scale: u32 = value.parse().map_err(|_| invalid(key, value))?;
                self.time_scale = scale.max(1);
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("cannot parse '{value}'"),
    }
}

fn parse_secs(key: &str, value: &str) -> Result<u64, ConfigError> {
    let parsed: u64 = value.parse().map_err(|_| invalid(key, value))?;
    if parsed == 0 {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "must be non-zero".into(),
        });
    }
    Ok(parsed)
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.parse().map_err(|_| invalid(key, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert!(parsed.ui.dark_mode);
        assert_eq!(parsed.cadence.focus_secs, 1500);
        assert_eq!(parsed.cadence.short_break_secs, 300);
        assert_eq!(parsed.cadence.long_break_secs, 900);
        assert_eq!(parsed.time_scale, 1);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert!(cfg.notifications.enabled);
        assert_eq!(cfg.cadence.sessions_before_long_break, 4);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("ui.dark_mode").as_deref(), Some("true"));
        assert_eq!(cfg.get("cadence.focus_secs").as_deref(), Some("1500"));
        assert!(cfg.get("ui.missing_key").is_none());
    }

    #[test]
    fn set_updates_known_keys() {
        let mut cfg = Config::default();
        cfg.set("notifications.sound", "false").unwrap();
        assert!(!cfg.notifications.sound);
        cfg.set("cadence.focus_secs", "600").unwrap();
        assert_eq!(cfg.cadence.focus_secs, 600);
        cfg.set("time_scale", "60").unwrap();
        assert_eq!(cfg.time_scale, 60);
    }

    #[test]
    fn set_rejects_unknown_key_and_bad_values() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("nope", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(cfg.set("ui.dark_mode", "not_a_bool").is_err());
        assert!(cfg.set("cadence.focus_secs", "0").is_err());
    }

    #[test]
    fn time_scale_floor_is_one() {
        let mut cfg = Config::default();
        cfg.set("time_scale", "0").unwrap();
        assert_eq!(cfg.time_scale, 1);
    }

    #[test]
    fn save_and_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set("cadence.long_break_secs", "1200").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.cadence.long_break_secs, 1200);
    }
}
