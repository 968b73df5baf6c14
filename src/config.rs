use color_eyre::eyre::{Context, Result, bail, eyre};
use constants::{
    DEFAULT_DEBOUNCE_WAIT, TOAST_AUTOHIDE_DELAY,
    filename::{APP_DIR, persistent},
};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{system::clipboard::CommandClipboard, util::locale::Locale};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub locale: Locale,
    #[serde(default = "default_toast_autohide_ms")]
    pub toast_autohide_ms: u64,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_clipboard_command")]
    pub clipboard_command: String,
}
impl Default for Preferences {
    fn default() -> Self {
        Self {
            locale: Default::default(),
            toast_autohide_ms: default_toast_autohide_ms(),
            debounce_ms: default_debounce_ms(),
            clipboard_command: default_clipboard_command(),
        }
    }
}
impl Preferences {
    pub fn toast_autohide(&self) -> Duration {
        Duration::from_millis(self.toast_autohide_ms)
    }

    pub fn debounce_wait(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Updates one preference by its config-file key (e.g. `debounceMs`).
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "locale" => self.locale = value.parse().map_err(|e: String| eyre!(e))?,
            "toastAutohideMs" => {
                self.toast_autohide_ms = value
                    .parse()
                    .with_context(|| format!("Invalid {key}: {value}"))?
            }
            "debounceMs" => {
                self.debounce_ms = value
                    .parse()
                    .with_context(|| format!("Invalid {key}: {value}"))?
            }
            "clipboardCommand" => {
                CommandClipboard::from_command_line(value)?;
                self.clipboard_command = value.trim().to_string();
            }
            _ => bail!("Unknown preference: {key}"),
        }
        Ok(())
    }
}

fn default_toast_autohide_ms() -> u64 {
    TOAST_AUTOHIDE_DELAY.as_millis() as u64
}
fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_WAIT.as_millis() as u64
}
fn default_clipboard_command() -> String {
    CommandClipboard::default_command_line().to_string()
}

/// The directory in which the config file is stored.
pub fn get_config_dir() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .ok_or_else(|| eyre!("Could not find user config directory"))?
        .join(APP_DIR);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    #[serde(default)]
    pub preferences: Preferences,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::warn!(
                "No config file found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        tracing::info!("Loading config from {}", config_path.display());
        let contents = fs::read_to_string(config_path).context("Failed to read config file")?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let mut config =
            serde_json::from_str::<Config>(contents).context("Failed to parse config file")?;

        // An empty command would make every copy fail
        if config.preferences.clipboard_command.trim().is_empty() {
            config.preferences.clipboard_command = default_clipboard_command();
        }

        Ok(config)
    }

    pub fn get_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join(persistent::CONFIG))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        tracing::info!("Saving config to {}", config_path.display());
        fs::write(config_path, serde_json::to_string_pretty(&self)?)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.preferences.toast_autohide(), Duration::from_secs(5));
        assert_eq!(config.preferences.debounce_wait(), Duration::from_millis(300));
    }

    #[test]
    fn test_camel_case_fields() {
        let config = Config::parse(
            r#"{"preferences": {"locale": "vi-VN", "toastAutohideMs": 2000, "debounceMs": 50, "clipboardCommand": "wl-copy"}}"#,
        )
        .unwrap();
        assert_eq!(config.preferences.locale, Locale::Vietnamese);
        assert_eq!(config.preferences.toast_autohide_ms, 2000);
        assert_eq!(config.preferences.debounce_ms, 50);
        assert_eq!(config.preferences.clipboard_command, "wl-copy");
    }

    #[test]
    fn test_blank_clipboard_command_is_restored() {
        let config = Config::parse(r#"{"preferences": {"clipboardCommand": "  "}}"#).unwrap();
        assert_eq!(
            config.preferences.clipboard_command,
            CommandClipboard::default_command_line()
        );
    }

    #[test]
    fn test_set_preferences() {
        let mut preferences = Preferences::default();
        preferences.set("locale", "vi").unwrap();
        preferences.set("toastAutohideMs", "1500").unwrap();
        preferences.set("debounceMs", "75").unwrap();
        preferences.set("clipboardCommand", " wl-copy ").unwrap();

        assert_eq!(preferences.locale, Locale::Vietnamese);
        assert_eq!(preferences.toast_autohide(), Duration::from_millis(1500));
        assert_eq!(preferences.debounce_wait(), Duration::from_millis(75));
        assert_eq!(preferences.clipboard_command, "wl-copy");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut preferences = Preferences::default();
        assert!(preferences.set("locale", "fr-FR").is_err());
        assert!(preferences.set("debounceMs", "-5").is_err());
        assert!(preferences.set("clipboardCommand", "   ").is_err());
        assert!(preferences.set("theme", "dark").is_err());
        assert_eq!(preferences, Preferences::default());
    }

    #[test]
    fn test_set_then_save_persists() {
        let path = std::env::temp_dir().join(format!("vpu-set-{}.json", uuid::Uuid::new_v4()));
        let mut config = Config::default();
        config.preferences.set("debounceMs", "120").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.preferences.debounce_ms, 120);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Config::parse("{ not json").is_err());
        assert!(Config::parse(r#"{"preferences": {"locale": "fr-FR"}}"#).is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = std::env::temp_dir().join(format!("vpu-config-{}.json", uuid::Uuid::new_v4()));
        let mut config = Config::default();
        config.preferences.locale = Locale::Vietnamese;
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join(format!("vpu-missing-{}.json", uuid::Uuid::new_v4()));
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }
}
