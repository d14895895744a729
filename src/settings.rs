//! Settings persistence for the launcher builder
//!
//! One remembered convenience value: the custom Zaparoo root the user last
//! picked. Load failures fall back to defaults so a broken settings file
//! never blocks startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application settings with persistence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Custom Zaparoo root folder from the last selection, if any.
    #[serde(default)]
    pub custom_root: Option<String>,
}

impl Settings {
    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("zaplauncher").join("settings.json"))
    }

    /// Load settings from disk, or return defaults
    pub fn load() -> Self {
        Self::settings_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load settings from a specific file, defaulting on any error.
    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    /// Save settings to disk, best effort.
    pub fn save(&self) {
        if let Some(path) = Self::settings_path() {
            self.save_to(&path);
        }
    }

    /// Save settings to a specific file, best effort.
    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Ok(json) = serde_json::to_string_pretty(self) {
            if let Err(e) = std::fs::write(path, json) {
                log::warn!("failed to save settings to {}: {e}", path.display());
            }
        }
    }

    /// Remember a newly selected custom root and persist immediately.
    pub fn remember_custom_root(&mut self, root: &str) {
        self.custom_root = Some(root.to_string());
        self.save();
    }
}
