//! Board persistence seam.
//!
//! The autosave side effect hands the store the model region whenever it
//! changed; the startup hook asks it for a previously saved board. The
//! file format is a small versioned JSON envelope.

use crate::error::{BoardFlowError, Result, ResultExt};
use crate::state::Value;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Current board file format version.
pub const BOARD_FILE_VERSION: u32 = 1;

/// Durable storage for the model region.
pub trait BoardStore: Send + Sync {
    fn save(&self, model: &Value) -> Result<()>;

    /// The previously saved model, if any.
    fn load(&self) -> Result<Option<Value>>;
}

/// On-disk envelope around a saved model.
#[derive(Debug, Serialize, Deserialize)]
pub struct BoardFile {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub model: Value,
}

/// Saves the board as pretty-printed JSON at a fixed path.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BoardStore for JsonFileStore {
    fn save(&self, model: &Value) -> Result<()> {
        let file = BoardFile {
            version: BOARD_FILE_VERSION,
            saved_at: Utc::now(),
            model: model.clone(),
        };
        let text = serde_json::to_string_pretty(&file)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, text)
            .map_err(BoardFlowError::from)
            .with_context(|| format!("Failed to write board file {:?}", self.path))?;
        tracing::debug!(path = ?self.path, "board saved");
        Ok(())
    }

    fn load(&self) -> Result<Option<Value>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(&self.path)
            .map_err(BoardFlowError::from)
            .with_context(|| format!("Failed to read board file {:?}", self.path))?;
        let file: BoardFile = serde_json::from_str(&text)?;
        if file.version != BOARD_FILE_VERSION {
            return Err(BoardFlowError::Config(format!(
                "Unsupported board file version {} (expected {})",
                file.version, BOARD_FILE_VERSION
            )));
        }
        Ok(Some(file.model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_model() -> Value {
        Value::map([
            (
                "boxes",
                Value::map([("b1", Value::map([("id", Value::from("b1"))]))]),
            ),
            ("layout", Value::seq([Value::seq([Value::from("b1")])])),
        ])
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("board.json"));
        assert!(store.load().unwrap().is_none());

        let model = sample_model();
        store.save(&model).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, model);
    }

    #[test]
    fn test_load_rejects_unknown_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");
        std::fs::write(
            &path,
            r#"{"version": 99, "saved_at": "2024-01-01T00:00:00Z", "model": null}"#,
        )
        .unwrap();
        let store = JsonFileStore::new(&path);
        assert!(store.load().is_err());
    }
}
