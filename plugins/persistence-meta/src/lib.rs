//! Registration shim for the persistence feature.
//!
//! Installing [`PersistenceMeta`] contributes three descriptors to the host:
//! the `workspace` tab of the settings view, the
//! `persistenceNetworkOverridesEnabled` setting, and a context-menu provider
//! for sources, resources and network requests. None of them touches the
//! `persistence` crate until the host calls one of their loaders.
use std::sync::{Arc, LazyLock};

use log::{debug, error, info};
use persistence::PersistenceModule;
use tessera_core::context_menu::{ContextMenuProvider, ContextType, ProviderDescriptor, provider_loader};
use tessera_core::extension::{Extension, ExtensionRegistrar, VersionRange};
use tessera_core::loader::{FnSource, LazyModule};
use tessera_core::settings::{SettingCategory, SettingDescriptor, SettingOption, SettingType, SettingValue};
use tessera_core::view::{View, ViewDescriptor, ViewLocation, view_loader};
use tessera_core::{Result, UiStrings};

/// Message namespace of the string table
pub const UI_STRINGS_NAMESPACE: &str = "models/persistence/persistence-meta";

/// Default English text, keyed by message id
pub const UI_STRINGS: &[(&str, &str)] = &[
    ("workspace", "Workspace"),
    ("showWorkspace", "Show Workspace"),
    ("enableLocalOverrides", "Enable Local Overrides"),
    ("interception", "interception"),
    ("override", "override"),
    ("network", "network"),
    ("rewrite", "rewrite"),
    ("request", "request"),
    ("enableOverrideNetworkRequests", "Enable override network requests"),
    ("disableOverrideNetworkRequests", "Disable override network requests"),
];

/// Storage key of the network overrides setting
pub const SETTING_NAME: &str = "persistenceNetworkOverridesEnabled";

pub const VIEW_ID: &str = "workspace";

/// Host API versions this extension was written against
pub const API_CONSTRAINT: &str = "^0.1";

const SEARCH_TAGS: [&str; 5] = ["interception", "override", "network", "rewrite", "request"];

/// What the shim needs from the loaded feature module
pub trait PersistenceFeature: Send + Sync + 'static {
    fn workspace_settings_tab(&self) -> Arc<dyn View>;

    fn context_menu_provider(&self) -> Arc<dyn ContextMenuProvider>;
}

impl PersistenceFeature for PersistenceModule {
    fn workspace_settings_tab(&self) -> Arc<dyn View> {
        PersistenceModule::workspace_settings_tab(self)
    }

    fn context_menu_provider(&self) -> Arc<dyn ContextMenuProvider> {
        PersistenceModule::context_menu_provider(self)
    }
}

static PERSISTENCE_MODULE: LazyLock<Arc<LazyModule<PersistenceModule>>> = LazyLock::new(|| {
    Arc::new(LazyModule::new(Arc::new(FnSource::new(
        "persistence",
        persistence::import,
    ))))
});

/// The persistence registration extension
#[derive(Debug)]
pub struct PersistenceMeta<M> {
    module: Arc<LazyModule<M>>,
}

impl PersistenceMeta<PersistenceModule> {
    /// Shim backed by the process-wide cache of the `persistence` crate
    pub fn from_process_cache() -> Self {
        Self::new(Arc::clone(&PERSISTENCE_MODULE))
    }
}

impl<M: PersistenceFeature> PersistenceMeta<M> {
    pub fn new(module: Arc<LazyModule<M>>) -> Self {
        Self { module }
    }

    /// The cache the loaders go through
    pub fn module(&self) -> &Arc<LazyModule<M>> {
        &self.module
    }

    fn workspace_view(&self, strings: &UiStrings) -> Result<ViewDescriptor> {
        let module = Arc::clone(&self.module);
        Ok(ViewDescriptor {
            location: ViewLocation::SettingsView,
            id: VIEW_ID.to_string(),
            title: strings.lazy("workspace")?,
            command_prompt: strings.lazy("showWorkspace")?,
            order: 1,
            load_view: view_loader(move || load_workspace_tab(Arc::clone(&module))),
        })
    }

    fn overrides_setting(&self, strings: &UiStrings) -> Result<SettingDescriptor> {
        let tags = SEARCH_TAGS
            .iter()
            .map(|key| strings.lazy(key))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(SettingDescriptor {
            category: SettingCategory::Persistence,
            title: strings.lazy("enableLocalOverrides")?,
            setting_name: SETTING_NAME.to_string(),
            setting_type: SettingType::Boolean,
            default_value: SettingValue::Bool(false),
            tags,
            options: vec![
                SettingOption {
                    value: SettingValue::Bool(true),
                    title: strings.lazy("enableOverrideNetworkRequests")?,
                },
                SettingOption {
                    value: SettingValue::Bool(false),
                    title: strings.lazy("disableOverrideNetworkRequests")?,
                },
            ],
        })
    }

    fn overrides_provider(&self) -> ProviderDescriptor {
        let module = Arc::clone(&self.module);
        ProviderDescriptor {
            context_types: vec![
                ContextType::UiSourceCode,
                ContextType::Resource,
                ContextType::NetworkRequest,
            ],
            load_provider: provider_loader(move || load_context_menu_provider(Arc::clone(&module))),
            experiment: None,
        }
    }
}

async fn load_workspace_tab<M: PersistenceFeature>(module: Arc<LazyModule<M>>) -> Result<Arc<dyn View>> {
    let feature = module.ensure_loaded().await?;
    Ok(feature.workspace_settings_tab())
}

async fn load_context_menu_provider<M: PersistenceFeature>(
    module: Arc<LazyModule<M>>,
) -> Result<Arc<dyn ContextMenuProvider>> {
    let feature = module.ensure_loaded().await?;
    Ok(feature.context_menu_provider())
}

impl<M: PersistenceFeature> Extension for PersistenceMeta<M> {
    fn name(&self) -> &'static str {
        "persistence-meta"
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn compatible_api_versions(&self) -> Vec<VersionRange> {
        match VersionRange::from_constraint(API_CONSTRAINT) {
            Ok(range) => vec![range],
            Err(e) => {
                error!("Invalid API constraint for persistence-meta: {}", e);
                Vec::new()
            }
        }
    }

    fn register(&self, registrar: &dyn ExtensionRegistrar) -> Result<()> {
        let strings = registrar.register_ui_strings(UI_STRINGS_NAMESPACE, UI_STRINGS)?;
        debug!("Registered {} persistence strings", UI_STRINGS.len());

        registrar.register_view_extension(self.workspace_view(&strings)?)?;
        registrar.register_setting_extension(self.overrides_setting(&strings)?)?;
        registrar.register_provider(self.overrides_provider())?;

        info!("Persistence descriptors registered (module '{}' not loaded)", self.module.specifier());
        Ok(())
    }
}
