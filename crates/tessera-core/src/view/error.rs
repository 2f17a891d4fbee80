//! # Tessera Core View Registry Errors
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("View '{id}' is already registered at location '{location}'")]
    DuplicateView { location: String, id: String },

    #[error("No view '{id}' is registered at location '{location}'")]
    ViewNotFound { location: String, id: String },

    #[error("View registry is poisoned")]
    RegistryPoisoned,
}
