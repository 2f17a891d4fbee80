// Core modules of the extension host
pub mod config;
pub mod context_menu;
pub mod extension;
pub mod i18n;
pub mod kernel;
pub mod loader;
pub mod settings;
pub mod view;

// Re-export key public types/traits for easier use by the binary and extensions
pub use kernel::ExtensionHost;
pub use kernel::error::{Error, Result};
pub use extension::{Extension, ExtensionRegistrar};
pub use i18n::{I18n, LocalizedString, UiStrings};
pub use loader::{LazyModule, ModuleSource, RetryPolicy};
pub use view::{View, ViewDescriptor, ViewLocation};
pub use settings::{SettingCategory, SettingDescriptor, SettingType, SettingValue};
pub use context_menu::{ContextMenu, ContextMenuProvider, ContextTarget, ContextType, ProviderDescriptor};
