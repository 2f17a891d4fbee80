//! # Tessera Core Extension Errors
//!
//! Errors raised while installing extensions into a host: duplicate names,
//! incompatible API requirements and malformed version constraints.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("Extension '{0}' is already installed")]
    AlreadyInstalled(String),

    #[error("Extension '{name}' is not compatible with API version {api_version}")]
    IncompatibleApi { name: String, api_version: String },

    #[error("Version error: {0}")]
    Version(#[from] VersionError),

    #[error("Extension registry is poisoned")]
    RegistryPoisoned,
}

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("Invalid version '{version}': {message}")]
    InvalidVersion { version: String, message: String },

    #[error("Invalid version constraint '{constraint}': {message}")]
    InvalidConstraint { constraint: String, message: String },
}
