//! Persistent user preferences.
//!
//! [`Config`] is the only durable state smooth owns. It is stored as JSON with
//! camelCase keys; missing keys take defaults and the file is always replaced
//! atomically so a crash never leaves it half written.
//!
//! # Public API
//! - [`Config`]: The settings document with load/save helpers
//! - [`ConfigKey`]: User-facing setting names accepted by `smooth config`
//! - [`ConfigPatch`]: A partial update applied with [`Config::apply`]

use crate::core::{
    dirs::get_config_directory,
    error::{Result, SmoothError},
    theme::{Theme, DEFAULT_THEME, THEME_IDS},
};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.json";
pub const DEFAULT_MAX_BACKUPS: usize = 10;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub auto_sync_enabled: bool,
    #[serde(deserialize_with = "at_least_one")]
    pub max_backups: usize,
    pub experiments_enabled: bool,
    #[serde(alias = "theme")]
    pub theme_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auto_sync_enabled: false,
            max_backups: DEFAULT_MAX_BACKUPS,
            experiments_enabled: false,
            theme_id: DEFAULT_THEME.to_string(),
        }
    }
}

/// Accept any integer for `maxBackups` and clamp it to at least one
fn at_least_one<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<usize, D::Error> {
    let value = i64::deserialize(deserializer)?;
    Ok(usize::try_from(value.max(1)).unwrap_or(usize::MAX))
}

impl Config {
    /// `<config dir>/config.json`, honoring an explicit directory override
    pub fn default_path(override_dir: Option<&Path>) -> Result<PathBuf> {
        Ok(get_config_directory(override_dir)?.join(CONFIG_FILE))
    }

    /// Read the config at `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(path).map_err(|e| SmoothError::config_read_failed(path, e))?;
        serde_json::from_str(&content).map_err(|e| SmoothError::config_parse_failed(path, e))
    }

    /// Like [`Config::load_from`], but an unreadable or corrupt file falls back to defaults
    pub fn load_or_default(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|e| {
            log::warn!("{e}; using default settings");
            Self::default()
        })
    }

    /// Load `path`, reading `legacy` instead while `path` does not exist yet.
    ///
    /// The next save writes to `path`, which moves the settings over.
    pub fn load_with_legacy(path: &Path, legacy: Option<&Path>) -> Self {
        match legacy {
            Some(legacy) if !path.exists() && legacy.exists() => {
                log::info!("Reading settings from {}", legacy.display());
                Self::load_or_default(legacy)
            }
            _ => Self::load_or_default(path),
        }
    }

    /// Write the whole document to a temp file beside `path`, then rename it into place
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(|e| SmoothError::config_write_failed(path, e))?;

        let content = serde_json::to_string_pretty(self)?;

        let mut temp = tempfile::NamedTempFile::new_in(dir)
            .map_err(|e| SmoothError::config_write_failed(path, e))?;
        temp.write_all(content.as_bytes())
            .map_err(|e| SmoothError::config_write_failed(path, e))?;
        temp.persist(path)
            .map_err(|e| SmoothError::config_write_failed(path, e.error))?;

        log::debug!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn theme(&self) -> Theme {
        Theme::from_id(&self.theme_id)
    }

    pub fn apply(&mut self, patch: ConfigPatch) {
        if let Some(value) = patch.auto_sync_enabled {
            self.auto_sync_enabled = value;
        }
        if let Some(value) = patch.max_backups {
            self.max_backups = value.max(1);
        }
        if let Some(value) = patch.experiments_enabled {
            self.experiments_enabled = value;
        }
        if let Some(value) = patch.theme_id {
            self.theme_id = value;
        }
    }

    pub fn get(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::AutoSync => self.auto_sync_enabled.to_string(),
            ConfigKey::MaxBackups => self.max_backups.to_string(),
            ConfigKey::Experiments => self.experiments_enabled.to_string(),
            ConfigKey::Theme => self.theme_id.clone(),
        }
    }

    /// Every setting with its current value, in display order
    pub fn entries(&self) -> Vec<(ConfigKey, String)> {
        ConfigKey::ALL.iter().map(|&key| (key, self.get(key))).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    AutoSync,
    MaxBackups,
    Experiments,
    Theme,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 4] = [
        ConfigKey::AutoSync,
        ConfigKey::MaxBackups,
        ConfigKey::Experiments,
        ConfigKey::Theme,
    ];

    /// Accepts the short CLI name or the JSON key
    pub fn parse(key: &str) -> Result<Self> {
        match key {
            "auto-sync" | "autoSyncEnabled" => Ok(ConfigKey::AutoSync),
            "max-backups" | "maxBackups" => Ok(ConfigKey::MaxBackups),
            "experiments" | "experimentsEnabled" => Ok(ConfigKey::Experiments),
            "theme" | "themeId" => Ok(ConfigKey::Theme),
            other => Err(SmoothError::invalid_config_key(other)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::AutoSync => "auto-sync",
            ConfigKey::MaxBackups => "max-backups",
            ConfigKey::Experiments => "experiments",
            ConfigKey::Theme => "theme",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPatch {
    pub auto_sync_enabled: Option<bool>,
    pub max_backups: Option<usize>,
    pub experiments_enabled: Option<bool>,
    pub theme_id: Option<String>,
}

impl ConfigPatch {
    /// Build a single-field patch from a `key value` pair typed by the user
    pub fn from_setting(key: &str, value: &str) -> Result<Self> {
        let key = ConfigKey::parse(key)?;
        let mut patch = ConfigPatch::default();

        match key {
            ConfigKey::AutoSync => patch.auto_sync_enabled = Some(parse_bool(key, value)?),
            ConfigKey::Experiments => patch.experiments_enabled = Some(parse_bool(key, value)?),
            ConfigKey::MaxBackups => {
                let count: usize = value.trim().parse().map_err(|_| {
                    SmoothError::invalid_config_value(key.name(), value, "expected a whole number")
                })?;
                if count == 0 {
                    return Err(SmoothError::invalid_config_value(
                        key.name(),
                        value,
                        "must be at least 1",
                    ));
                }
                patch.max_backups = Some(count);
            }
            ConfigKey::Theme => {
                let id = value.trim();
                if !Theme::is_known(id) {
                    return Err(SmoothError::invalid_config_value(
                        key.name(),
                        value,
                        format!("available themes: {}", THEME_IDS.join(", ")),
                    ));
                }
                patch.theme_id = Some(id.to_string());
            }
        }

        Ok(patch)
    }
}

fn parse_bool(key: ConfigKey, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(SmoothError::invalid_config_value(
            key.name(),
            value,
            "expected true or false",
        )),
    }
}
