//! Persisted user settings
//!
//! Stored as JSON under the platform config directory
//! (`~/.config/FcoKit/config.json` on Linux).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Maximum number of recent files to track
const MAX_RECENT_FILES: usize = 10;

/// Database looked up in the working directory when nothing else is set.
pub const DEFAULT_DATABASE_FILE: &str = "fcoDatabase.txt";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FcoConfig {
    /// Location of `fcoDatabase.txt`.
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    #[serde(default)]
    pub last_fco_dir: Option<PathBuf>,
    #[serde(default)]
    pub last_fte_dir: Option<PathBuf>,
    /// Most recent first.
    #[serde(default)]
    pub recent_files: Vec<String>,
}

impl FcoConfig {
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("FcoKit").join("config.json"))
    }

    /// Load config from disk, or return default
    #[must_use]
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load config from `path`, or return default if it is missing or invalid.
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Save config to disk
    pub fn save(&self) -> Result<()> {
        match Self::config_path() {
            Some(path) => self.save_to(&path),
            None => {
                tracing::warn!("No config directory available, settings not saved");
                Ok(())
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Add a file to the recent files list
    pub fn add_recent_file(&mut self, path: &str) {
        // Remove if already in list (we'll re-add at front)
        self.recent_files.retain(|p| p != path);
        self.recent_files.insert(0, path.to_string());
        self.recent_files.truncate(MAX_RECENT_FILES);
    }

    /// Pick the database to load: explicit override, then the configured
    /// path, then `fcoDatabase.txt` in the working directory.
    #[must_use]
    pub fn resolve_database_path(&self, override_path: Option<&Path>) -> PathBuf {
        override_path
            .map(Path::to_path_buf)
            .or_else(|| self.database_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_FILE))
    }
}
