//! # Tessera Core Settings Errors
//!
//! Errors raised while registering setting descriptors or reading and writing
//! their values. Registration errors describe invalid descriptors; value
//! errors describe rejected writes.
use thiserror::Error;

use crate::config::error::ConfigError;
use crate::settings::{SettingType, SettingValue};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Setting '{0}' is already registered")]
    DuplicateSetting(String),

    #[error("Setting '{0}' is not registered")]
    SettingNotFound(String),

    #[error("Value {value} for setting '{name}' is not a valid {expected}")]
    TypeMismatch {
        name: String,
        expected: SettingType,
        value: SettingValue,
    },

    #[error("Value {value} for setting '{name}' is not one of its options")]
    NotAnOption { name: String, value: SettingValue },

    #[error("Setting '{0}' has an invalid descriptor: {1}")]
    InvalidDescriptor(String, String),

    #[error("Failed to persist setting values: {0}")]
    Store(#[from] ConfigError),

    #[error("Settings registry is poisoned")]
    RegistryPoisoned,
}
