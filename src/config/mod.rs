//! Configuration module for boardflow-rs
//!
//! Handles the editor's TOML config file and the platform data
//! directory where the config and the autosaved board live.
//!
//! # App Data Location
//!
//! - **Linux**: `~/.local/share/boardflow-rs/`
//! - **macOS**: `~/Library/Application Support/boardflow-rs/`
//! - **Windows**: `%APPDATA%\boardflow-rs\`
//!
//! # Files
//!
//! - `editor.toml` - lane count, autosave switch, board file override
//! - `board.json` - the autosaved board (see `adapters::store`)

use crate::error::{BoardFlowError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for data directories
pub const APP_ID: &str = "boardflow-rs";

/// Editor config filename
pub const CONFIG_FILE: &str = "editor.toml";

/// Default board filename inside the app data directory
pub const BOARD_FILE: &str = "board.json";

/// Default number of lanes on a fresh board
pub const DEFAULT_LANES: usize = 4;

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir().ok_or_else(|| {
        BoardFlowError::Config("Could not determine app data directory".to_string())
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            BoardFlowError::Config(format!("Failed to create app data directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Get the path to the editor config file
pub fn config_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(CONFIG_FILE))
}

/// Editor configuration, loaded from `editor.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Number of lanes on a fresh board
    pub lanes: usize,

    /// Persist the model region on every change
    pub autosave: bool,

    /// Board file location; defaults to `board.json` in the app data dir
    pub board_file: Option<PathBuf>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            lanes: DEFAULT_LANES,
            autosave: true,
            board_file: None,
        }
    }
}

impl EditorConfig {
    /// Load the config from the default location, falling back to
    /// defaults when the file is missing or unreadable.
    pub fn load_or_default() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config from {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&text)
            .map_err(|e| BoardFlowError::Config(format!("Invalid config: {}", e)))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = toml::to_string_pretty(self)
            .map_err(|e| BoardFlowError::Serialization(e.to_string()))?;
        std::fs::write(path.as_ref(), text)?;
        Ok(())
    }

    /// Where the board should be persisted, honouring the override.
    pub fn board_file_path(&self) -> Option<PathBuf> {
        match &self.board_file {
            Some(path) => Some(path.clone()),
            None => app_data_dir().map(|dir| dir.join(BOARD_FILE)),
        }
    }
}
