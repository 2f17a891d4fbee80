//! # Tessera Core Extensions
//!
//! An [`Extension`] contributes view, setting and context-menu descriptors to
//! a host through the [`ExtensionRegistrar`] surface. The
//! [`ExtensionRegistry`] keeps track of what is installed so that each
//! extension registers exactly once per host, and only when it declares
//! compatibility with the host's API version.
pub mod error;
pub mod registry;
pub mod traits;
pub mod version;

pub use error::{ExtensionError, VersionError};
pub use registry::ExtensionRegistry;
pub use traits::{Extension, ExtensionRegistrar};
pub use version::VersionRange;
