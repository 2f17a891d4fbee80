//! # Tessera Core Configuration
//!
//! File-backed configuration shared by the host. [`ConfigFormat`] picks a
//! serializer from a file extension (JSON always, YAML and TOML behind the
//! `yaml-config` / `toml-config` features), [`ConfigData`] is a flat map of
//! JSON values used to persist setting values, and [`HostConfig`] describes
//! how a host instance starts up.
pub mod error;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::kernel::constants::DEFAULT_LOCALE;
pub use error::ConfigError;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }

    /// Serialize a value to a string in this format
    pub fn serialize<T: Serialize>(&self, value: &T) -> Result<String, ConfigError> {
        let serialization_error = |source: Box<dyn std::error::Error + Send + Sync>| {
            ConfigError::SerializationError {
                format: self.extension().to_string(),
                source,
            }
        };
        match self {
            ConfigFormat::Json => {
                serde_json::to_string_pretty(value).map_err(|e| serialization_error(Box::new(e)))
            }
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => {
                serde_yaml::to_string(value).map_err(|e| serialization_error(Box::new(e)))
            }
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => {
                toml::to_string_pretty(value).map_err(|e| serialization_error(Box::new(e)))
            }
        }
    }

    /// Deserialize a value from a string in this format
    pub fn deserialize<T: DeserializeOwned>(&self, data: &str) -> Result<T, ConfigError> {
        let deserialization_error = |source: Box<dyn std::error::Error + Send + Sync>| {
            ConfigError::DeserializationError {
                format: self.extension().to_string(),
                source,
            }
        };
        match self {
            ConfigFormat::Json => {
                serde_json::from_str(data).map_err(|e| deserialization_error(Box::new(e)))
            }
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => {
                serde_yaml::from_str(data).map_err(|e| deserialization_error(Box::new(e)))
            }
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => {
                toml::from_str(data).map_err(|e| deserialization_error(Box::new(e)))
            }
        }
    }

    /// Read and parse a file, picking the format from its extension
    pub fn read_file<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedConfigFormat(path.to_path_buf()))?;
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::io(e, "read", path.to_path_buf()))?;
        format.deserialize(&content)
    }

    /// Serialize a value and write it to a file, creating parent directories
    pub fn write_file<T: Serialize>(path: &Path, value: &T) -> Result<(), ConfigError> {
        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedConfigFormat(path.to_path_buf()))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::io(e, "create_dir_all", parent.to_path_buf()))?;
        }
        let content = format.serialize(value)?;
        fs::write(path, content).map_err(|e| ConfigError::io(e, "write", path.to_path_buf()))
    }
}

/// In-memory representation of configuration data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigData {
    /// Raw configuration values
    #[serde(flatten)]
    values: HashMap<String, serde_json::Value>,
}

impl ConfigData {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a configuration value
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.values
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Set a configuration value
    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> Result<(), ConfigError> {
        let json_value = serde_json::to_value(value).map_err(|e| ConfigError::SerializationError {
            format: "json".to_string(),
            source: Box::new(e),
        })?;
        self.values.insert(key.to_string(), json_value);
        Ok(())
    }

    /// Remove a configuration value
    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.values.remove(key)
    }

    /// Get all keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.values.keys().cloned().collect();
        keys.sort();
        keys
    }
}

/// Startup configuration for a host instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Active locale tag
    pub locale: String,
    /// Experiments enabled at startup
    pub experiments: Vec<String>,
    /// File persisting user setting values; in-memory only when unset
    pub settings_path: Option<PathBuf>,
    /// Translation catalog files, keyed by locale
    pub catalogs: HashMap<String, PathBuf>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            experiments: Vec::new(),
            settings_path: None,
            catalogs: HashMap::new(),
        }
    }
}

impl HostConfig {
    /// Load a host configuration file.
    /// Relative paths inside it are resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config: HostConfig = ConfigFormat::read_file(path)?;
        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        Ok(config)
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        if let Some(settings_path) = self.settings_path.as_mut() {
            resolve(settings_path);
        }
        self.catalogs.values_mut().for_each(resolve);
    }
}

#[cfg(test)]
mod tests;
