use std::path::{Path, PathBuf};

use log::debug;

use crate::config::{ConfigData, ConfigError, ConfigFormat};

/// File-backed persistence for user setting values
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// The file format follows the path's extension
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        if ConfigFormat::from_path(&path).is_none() {
            return Err(ConfigError::UnsupportedConfigFormat(path));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read persisted values; a missing file reads as empty
    pub fn load(&self) -> Result<ConfigData, ConfigError> {
        if !self.path.exists() {
            debug!("No persisted settings at {}", self.path.display());
            return Ok(ConfigData::new());
        }
        ConfigFormat::read_file(&self.path)
    }

    pub fn save(&self, values: &ConfigData) -> Result<(), ConfigError> {
        debug!("Persisting {} setting values to {}", values.keys().len(), self.path.display());
        ConfigFormat::write_file(&self.path, values)
    }
}
