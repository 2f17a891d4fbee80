use std::sync::{Arc, Mutex, MutexGuard};

use log::{error, info, warn};

use crate::config::HostConfig;
use crate::context_menu::{ContextMenu, ContextMenuRegistry, ContextTarget, ProviderDescriptor};
use crate::extension::{Extension, ExtensionRegistrar, ExtensionRegistry};
use crate::i18n::{I18n, UiStrings};
use crate::kernel::constants::API_VERSION;
use crate::kernel::error::{Error, Result};
use crate::kernel::experiments::ExperimentSet;
use crate::settings::{SettingDescriptor, SettingsRegistry, SettingsStore};
use crate::view::{View, ViewDescriptor, ViewLocation, ViewManager};

/// The UI host: owns every registry extensions register into
#[derive(Debug)]
pub struct ExtensionHost {
    i18n: Arc<I18n>,
    experiments: Arc<ExperimentSet>,
    views: ViewManager,
    settings: SettingsRegistry,
    context_menu: ContextMenuRegistry,
    extensions: Mutex<ExtensionRegistry>,
}

impl ExtensionHost {
    /// A host with default configuration and in-memory settings
    pub fn new() -> Result<Self> {
        Self::from_config(&HostConfig::default())
    }

    /// Build a host from its startup configuration
    pub fn from_config(config: &HostConfig) -> Result<Self> {
        let i18n = Arc::new(I18n::new(config.locale.clone()));
        for (locale, path) in &config.catalogs {
            i18n.load_catalog(locale, path)?;
        }

        let experiments = Arc::new(ExperimentSet::new());
        for experiment in &config.experiments {
            experiments.enable(experiment);
        }

        let settings = match &config.settings_path {
            Some(path) => SettingsRegistry::with_store(SettingsStore::new(path.clone())?)?,
            None => SettingsRegistry::new(),
        };

        info!(
            "Host ready (locale {}, {} experiments enabled)",
            config.locale,
            config.experiments.len()
        );
        Ok(Self {
            i18n,
            context_menu: ContextMenuRegistry::new(Arc::clone(&experiments)),
            experiments,
            views: ViewManager::new(),
            settings,
            extensions: Mutex::new(ExtensionRegistry::new(API_VERSION)?),
        })
    }

    pub fn i18n(&self) -> &Arc<I18n> {
        &self.i18n
    }

    pub fn experiments(&self) -> &Arc<ExperimentSet> {
        &self.experiments
    }

    pub fn views(&self) -> &ViewManager {
        &self.views
    }

    pub fn settings(&self) -> &SettingsRegistry {
        &self.settings
    }

    pub fn context_menu(&self) -> &ContextMenuRegistry {
        &self.context_menu
    }

    /// Install an extension: check it once, then let it register its descriptors.
    /// A failed registration removes whatever the extension had registered
    /// and leaves it uninstalled.
    pub fn install(&self, extension: &dyn Extension) -> Result<()> {
        self.lock_extensions()?.reserve(extension)?;

        let scope = InstallScope::new(self);
        if let Err(e) = extension.register(&scope) {
            error!("Extension '{}' failed to register: {}", extension.name(), e);
            self.roll_back(extension.name(), scope.into_registered());
            self.lock_extensions()?.release(extension.name());
            return Err(e);
        }
        info!("Extension '{}' installed", extension.name());
        Ok(())
    }

    pub fn is_installed(&self, name: &str) -> bool {
        self.lock_extensions()
            .map(|registry| registry.is_installed(name))
            .unwrap_or(false)
    }

    /// Installed `(name, version)` pairs
    pub fn installed_extensions(&self) -> Result<Vec<(String, String)>> {
        Ok(self.lock_extensions()?.installed())
    }

    /// Open a view, loading its controller on demand
    pub async fn open_view(&self, location: ViewLocation, id: &str) -> Result<Arc<dyn View>> {
        self.views.load_view(location, id).await
    }

    /// Build the context menu for a right-clicked object
    pub async fn context_menu_for(&self, target: &ContextTarget) -> Result<ContextMenu> {
        self.context_menu.build_menu(target).await
    }

    /// Undo a partial registration, newest entries first
    fn roll_back(&self, extension: &str, registered: Registered) {
        for provider in registered.providers.iter().rev() {
            if let Err(e) = self.context_menu.unregister_provider(provider) {
                warn!("Could not remove provider of '{}': {}", extension, e);
            }
        }
        for name in registered.settings.iter().rev() {
            if let Err(e) = self.settings.unregister_setting_extension(name) {
                warn!("Could not remove setting '{}' of '{}': {}", name, extension, e);
            }
        }
        for (location, id) in registered.views.iter().rev() {
            if let Err(e) = self.views.unregister_view_extension(*location, id) {
                warn!("Could not remove view '{}' of '{}': {}", id, extension, e);
            }
        }
        for namespace in registered.namespaces.iter().rev() {
            if let Err(e) = self.i18n.unregister_ui_strings(namespace) {
                warn!("Could not remove UI strings '{}' of '{}': {}", namespace, extension, e);
            }
        }
    }

    fn lock_extensions(&self) -> Result<MutexGuard<'_, ExtensionRegistry>> {
        self.extensions
            .lock()
            .map_err(|_| Error::LockPoisoned("extensions"))
    }
}

impl ExtensionRegistrar for ExtensionHost {
    fn register_ui_strings(&self, namespace: &str, messages: &[(&str, &str)]) -> Result<UiStrings> {
        Ok(self.i18n.register_ui_strings(namespace, messages)?)
    }

    fn register_view_extension(&self, descriptor: ViewDescriptor) -> Result<()> {
        Ok(self.views.register_view_extension(descriptor)?)
    }

    fn register_setting_extension(&self, descriptor: SettingDescriptor) -> Result<()> {
        Ok(self.settings.register_setting_extension(descriptor)?)
    }

    fn register_provider(&self, descriptor: ProviderDescriptor) -> Result<()> {
        self.context_menu.register_provider(descriptor)?;
        Ok(())
    }
}

/// What one extension registered during `install`
#[derive(Debug, Default)]
struct Registered {
    namespaces: Vec<String>,
    views: Vec<(ViewLocation, String)>,
    settings: Vec<String>,
    providers: Vec<Arc<ProviderDescriptor>>,
}

/// Registrar handed to an extension while it is being installed.
/// Forwards to the host and records every successful registration.
struct InstallScope<'a> {
    host: &'a ExtensionHost,
    registered: Mutex<Registered>,
}

impl<'a> InstallScope<'a> {
    fn new(host: &'a ExtensionHost) -> Self {
        Self {
            host,
            registered: Mutex::new(Registered::default()),
        }
    }

    fn record(&self) -> Result<MutexGuard<'_, Registered>> {
        self.registered
            .lock()
            .map_err(|_| Error::LockPoisoned("install scope"))
    }

    fn into_registered(self) -> Registered {
        match self.registered.into_inner() {
            Ok(registered) => registered,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl ExtensionRegistrar for InstallScope<'_> {
    fn register_ui_strings(&self, namespace: &str, messages: &[(&str, &str)]) -> Result<UiStrings> {
        let strings = self.host.register_ui_strings(namespace, messages)?;
        self.record()?.namespaces.push(namespace.to_string());
        Ok(strings)
    }

    fn register_view_extension(&self, descriptor: ViewDescriptor) -> Result<()> {
        let key = (descriptor.location, descriptor.id.clone());
        self.host.register_view_extension(descriptor)?;
        self.record()?.views.push(key);
        Ok(())
    }

    fn register_setting_extension(&self, descriptor: SettingDescriptor) -> Result<()> {
        let name = descriptor.setting_name.clone();
        self.host.register_setting_extension(descriptor)?;
        self.record()?.settings.push(name);
        Ok(())
    }

    fn register_provider(&self, descriptor: ProviderDescriptor) -> Result<()> {
        let provider = self.host.context_menu.register_provider(descriptor)?;
        self.record()?.providers.push(provider);
        Ok(())
    }
}
