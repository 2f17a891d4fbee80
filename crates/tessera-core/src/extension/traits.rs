use crate::context_menu::ProviderDescriptor;
use crate::extension::version::VersionRange;
use crate::i18n::UiStrings;
use crate::kernel::error::Result;
use crate::settings::SettingDescriptor;
use crate::view::ViewDescriptor;

/// Registration surface a host exposes to extensions
pub trait ExtensionRegistrar: Send + Sync {
    /// Register a namespace's message table for lazy localization
    fn register_ui_strings(&self, namespace: &str, messages: &[(&str, &str)]) -> Result<UiStrings>;

    fn register_view_extension(&self, descriptor: ViewDescriptor) -> Result<()>;

    fn register_setting_extension(&self, descriptor: SettingDescriptor) -> Result<()>;

    fn register_provider(&self, descriptor: ProviderDescriptor) -> Result<()>;
}

/// An extension contributing descriptors to the host
pub trait Extension: Send + Sync {
    /// Unique name of the extension
    fn name(&self) -> &'static str;

    fn version(&self) -> &str;

    /// Host API versions this extension works with
    fn compatible_api_versions(&self) -> Vec<VersionRange>;

    /// Register every descriptor the extension contributes.
    /// Runs once per host, synchronously, before any descriptor callback.
    fn register(&self, registrar: &dyn ExtensionRegistrar) -> Result<()>;
}
