//! Artwork settings persistence
//!
//! Settings are read from `settings.json` in the platform config directory.
//! Every field has a default, so a missing or partial file is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::artwork::{DEFAULT_ARTWORK_PATTERN, DEFAULT_EMBEDDED_MEDIA_TYPES, DirectoryScanner};

/// Artwork lookup settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtworkSettings {
    /// Music root the player reports track paths relative to
    pub music_dir: Option<PathBuf>,
    /// Case-insensitive regex matched against file names in the track's directory
    pub artwork_pattern: String,
    /// Media types whose embedded pictures are read
    pub embedded_media_types: Vec<String>,
}

impl Default for ArtworkSettings {
    fn default() -> Self {
        Self {
            music_dir: None,
            artwork_pattern: DEFAULT_ARTWORK_PATTERN.to_string(),
            embedded_media_types: DEFAULT_EMBEDDED_MEDIA_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ArtworkSettings {
    /// Get the settings file path
    pub fn file_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "trackart", "trackart")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from the default file, or return defaults if not found
    pub fn load() -> Self {
        match Self::file_path() {
            Some(path) if path.exists() => Self::load_from_file(&path).unwrap_or_else(|e| {
                tracing::warn!("Ignoring settings at {:?}: {}", path, e);
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&content)?;
        settings.scanner()?;
        Ok(settings)
    }

    /// Save settings to a specific file
    pub fn save_to_file(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Directory scanner for the configured artwork pattern
    pub fn scanner(&self) -> Result<DirectoryScanner, SettingsError> {
        DirectoryScanner::new(&self.artwork_pattern).map_err(SettingsError::Pattern)
    }
}

/// Errors that can occur with settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid artwork pattern: {0}")]
    Pattern(#[from] regex::Error),
}
