//! # Tessera Core Kernel Errors
//!
//! Defines the top-level error type of the extension host.
//!
//! [`Error`] wraps the typed errors of every subsystem (localization, module
//! loading, the three descriptor registries, extension installation and
//! configuration) so that host callbacks can propagate any of them with `?`.
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::config::error::ConfigError;
use crate::context_menu::error::ContextMenuError;
use crate::extension::error::ExtensionError;
use crate::i18n::error::I18nError;
use crate::loader::error::LoaderError;
use crate::settings::error::SettingsError;
use crate::view::error::ViewError;

/// Top-level error for the extension host
#[derive(Debug, ThisError)]
pub enum Error {
    /// Localization table or lookup error
    #[error("Localization error: {0}")]
    I18n(#[from] I18nError),

    /// Lazy module import error
    #[error("Module loader error: {0}")]
    Loader(#[from] LoaderError),

    /// View registry error
    #[error("View error: {0}")]
    View(#[from] ViewError),

    /// Settings registry error
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Context menu registry error
    #[error("Context menu error: {0}")]
    ContextMenu(#[from] ContextMenuError),

    /// Extension installation error
    #[error("Extension error: {0}")]
    Extension(#[from] ExtensionError),

    /// Configuration loading or serialization error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Failed to acquire a lock guarding host state
    #[error("Failed to acquire lock for '{0}': lock poisoned")]
    LockPoisoned(&'static str),

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}
