//! # Tessera Core Context Menu Errors
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextMenuError {
    #[error("Context menu provider must apply to at least one context type")]
    NoContextTypes,

    #[error("Context menu provider is gated on unknown experiment '{0}'")]
    UnknownExperiment(String),

    #[error("Context menu registry is poisoned")]
    RegistryPoisoned,
}
