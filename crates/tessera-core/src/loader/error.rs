//! # Tessera Core Module Loader Errors
//!
//! [`ImportError`] is what a [`ModuleSource`](crate::loader::ModuleSource)
//! reports when a feature module cannot be produced. [`LoaderError`] is what
//! callers of [`LazyModule::ensure_loaded`](crate::loader::LazyModule::ensure_loaded)
//! observe; every caller that awaited the same import shares one
//! `Arc<ImportError>`.
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Module '{0}' was not found")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Failed to import module '{specifier}': {source}")]
    ImportFailed {
        specifier: String,
        #[source]
        source: Arc<ImportError>,
    },

    #[error("Module cache for '{0}' is poisoned")]
    CachePoisoned(String),
}

impl LoaderError {
    /// The shared import failure, if this error carries one
    pub fn import_error(&self) -> Option<&Arc<ImportError>> {
        match self {
            LoaderError::ImportFailed { source, .. } => Some(source),
            LoaderError::CachePoisoned(_) => None,
        }
    }
}
