//! # Tessera Core Kernel
//!
//! The `kernel` module ties the subsystems together into an
//! [`ExtensionHost`](host::ExtensionHost): the UI shell that owns the view,
//! setting and context-menu registries, the localization registry and the
//! experiment set, and that installs extensions into them.
//!
//! - **Host**: [`ExtensionHost`] in the `host` submodule.
//! - **Experiments**: feature gates consulted by context-menu providers.
//! - **Core Constants**: application name, API version, default locale.
//! - **Error Handling**: the aggregated [`Error`](error::Error) and `Result` alias.
pub mod constants;
pub mod error;
pub mod experiments;
pub mod host;

pub use error::{Error, Result};
pub use experiments::ExperimentSet;
pub use host::ExtensionHost;
