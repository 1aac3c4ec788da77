//! Settings persistence
//!
//! Settings are stored as a pretty-printed JSON document. A missing or blank
//! file is not an error: it just means nothing was saved yet.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::settings::GameSettings;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid settings path: {0}")]
    InvalidPath(String),
}

/// Where settings are loaded from and saved to
pub trait SettingsStorage {
    /// `Ok(None)` when nothing has been stored yet
    fn load(&self) -> Result<Option<GameSettings>, StorageError>;

    fn save(&self, settings: &GameSettings) -> Result<(), StorageError>;
}

/// Stores settings in a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// The path must name a file inside some directory
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(StorageError::InvalidPath("path is empty".into()));
        }
        if path.file_name().is_none() {
            return Err(StorageError::InvalidPath(format!(
                "{} has no file name",
                path.display()
            )));
        }
        if path.parent().is_none() {
            return Err(StorageError::InvalidPath(format!(
                "{} has no parent directory",
                path.display()
            )));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<GameSettings>, StorageError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if json.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&json)?))
    }

    fn save(&self, settings: &GameSettings) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json)?;
        log::debug!("Wrote settings to {}", self.path.display());
        Ok(())
    }
}
