// SPDX-License-Identifier: MPL-2.0
//! This module handles the notification engine's configuration, including
//! loading and saving user preferences to a `notifications.toml` file.
//!
//! The toast state itself is never persisted; only tunables such as the
//! active-toast capacity and the default auto-hide duration live here.
//!
//! # Examples
//!
//! ```no_run
//! use cnc_notify::config::{self, NotificationConfig};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.sound = false;
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use defaults::{DEFAULT_DURATION_MS, DEFAULT_MAX_TOASTS, DEFAULT_SOUND_ENABLED};

const CONFIG_FILE: &str = "notifications.toml";
const APP_NAME: &str = "CncNotify";

/// Validated active-toast capacity.
///
/// Out-of-range values are clamped into `[MIN_MAX_TOASTS, MAX_MAX_TOASTS]`
/// rather than rejected, so a hand-edited config file can never disable
/// the notification engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastCapacity(usize);

impl ToastCapacity {
    /// Creates a capacity, clamping the value into the valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(defaults::MIN_MAX_TOASTS, defaults::MAX_MAX_TOASTS))
    }

    /// Returns the capacity value.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for ToastCapacity {
    fn default() -> Self {
        Self::new(defaults::DEFAULT_MAX_TOASTS)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Maximum number of active toasts before the oldest tail entries are evicted.
    #[serde(default = "default_max_toasts")]
    pub max_toasts: usize,
    /// Auto-hide duration in milliseconds applied when a toast does not set its own.
    #[serde(default = "default_duration_ms")]
    pub default_duration_ms: u64,
    /// Master switch for audio cues.
    #[serde(default = "default_sound")]
    pub sound: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            max_toasts: defaults::DEFAULT_MAX_TOASTS,
            default_duration_ms: defaults::DEFAULT_DURATION_MS,
            sound: defaults::DEFAULT_SOUND_ENABLED,
        }
    }
}

fn default_max_toasts() -> usize {
    defaults::DEFAULT_MAX_TOASTS
}

fn default_duration_ms() -> u64 {
    defaults::DEFAULT_DURATION_MS
}

fn default_sound() -> bool {
    defaults::DEFAULT_SOUND_ENABLED
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<NotificationConfig> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(NotificationConfig::default())
}

pub fn save(config: &NotificationConfig) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<NotificationConfig> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &NotificationConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
