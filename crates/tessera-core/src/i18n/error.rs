//! # Tessera Core Localization Errors
//!
//! Errors raised while registering string tables or binding lazily localized
//! strings. An unknown message key is a static configuration mistake and is
//! reported at registration time, never while a string is being displayed.
use thiserror::Error;

use crate::config::error::ConfigError;

#[derive(Debug, Error)]
pub enum I18nError {
    #[error("UI string namespace '{0}' is already registered")]
    DuplicateNamespace(String),

    #[error("UI string table '{namespace}' declares message '{key}' more than once")]
    DuplicateMessage { namespace: String, key: String },

    #[error("Message '{key}' is not registered in UI string table '{namespace}'")]
    UnknownMessage { namespace: String, key: String },

    #[error("Failed to load translation catalog for locale '{locale}': {source}")]
    CatalogLoad {
        locale: String,
        #[source]
        source: ConfigError,
    },

    #[error("Localization state '{0}' is poisoned")]
    Poisoned(&'static str),
}
