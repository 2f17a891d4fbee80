//! Persistence feature module.
//!
//! This crate is imported lazily by `persistence-meta`; the host never links
//! against it directly. It exposes two singletons: the workspace settings tab
//! shown under the settings view, and the context-menu provider that offers
//! local-override actions on sources, resources and network requests.
use std::sync::{Arc, LazyLock};

use log::info;
use tessera_core::context_menu::{
    ContextMenu, ContextMenuProvider, ContextTarget, MenuSection,
};
use tessera_core::loader::ImportError;
use tessera_core::view::View;

/// Action ids contributed to context menus
pub mod actions {
    pub const SAVE_FOR_OVERRIDES: &str = "persistence.save-for-overrides";
    pub const OPEN_CONTAINING_FOLDER: &str = "persistence.open-containing-folder";
    pub const OVERRIDE_CONTENT: &str = "persistence.override-content";
    pub const OVERRIDE_HEADERS: &str = "persistence.override-headers";
}

/// Default folder exclude pattern shown on the workspace tab
pub const DEFAULT_EXCLUDE_PATTERN: &str = r"/node_modules/|/\.git/|/\.svn/|/\.hg/";

/// Settings tab listing workspace folders
#[derive(Debug)]
pub struct WorkspaceSettingsTab {
    exclude_pattern: String,
}

impl WorkspaceSettingsTab {
    /// The process-wide tab
    pub fn instance() -> Arc<WorkspaceSettingsTab> {
        static INSTANCE: LazyLock<Arc<WorkspaceSettingsTab>> = LazyLock::new(|| {
            Arc::new(WorkspaceSettingsTab {
                exclude_pattern: DEFAULT_EXCLUDE_PATTERN.to_string(),
            })
        });
        Arc::clone(&INSTANCE)
    }
}

impl View for WorkspaceSettingsTab {
    fn view_id(&self) -> &str {
        "workspace"
    }

    fn render(&self) -> Vec<String> {
        vec![
            "Workspace".to_string(),
            "Mappings are inferred automatically.".to_string(),
            format!("Folder exclude pattern: {}", self.exclude_pattern),
        ]
    }
}

/// Context-menu provider for local overrides
#[derive(Debug, Default)]
pub struct PersistenceContextMenuProvider;

impl PersistenceContextMenuProvider {
    /// The process-wide provider
    pub fn instance() -> Arc<PersistenceContextMenuProvider> {
        static INSTANCE: LazyLock<Arc<PersistenceContextMenuProvider>> =
            LazyLock::new(|| Arc::new(PersistenceContextMenuProvider));
        Arc::clone(&INSTANCE)
    }
}

impl ContextMenuProvider for PersistenceContextMenuProvider {
    fn append_applicable_items(&self, target: &ContextTarget, menu: &mut ContextMenu) {
        match target {
            ContextTarget::UiSourceCode { .. } => {
                menu.append_item(MenuSection::Save, "Save for overrides", actions::SAVE_FOR_OVERRIDES);
                menu.append_item(
                    MenuSection::Reveal,
                    "Open in containing folder",
                    actions::OPEN_CONTAINING_FOLDER,
                );
            }
            ContextTarget::Resource { .. } => {
                menu.append_item(MenuSection::Save, "Save for overrides", actions::SAVE_FOR_OVERRIDES);
            }
            ContextTarget::NetworkRequest { .. } => {
                menu.append_item(MenuSection::Override, "Override content", actions::OVERRIDE_CONTENT);
                menu.append_item(MenuSection::Override, "Override headers", actions::OVERRIDE_HEADERS);
            }
            ContextTarget::DomNode { .. } => {}
        }
    }
}

/// The loaded feature module
#[derive(Debug)]
pub struct PersistenceModule {
    _private: (),
}

impl PersistenceModule {
    pub fn workspace_settings_tab(&self) -> Arc<WorkspaceSettingsTab> {
        WorkspaceSettingsTab::instance()
    }

    pub fn context_menu_provider(&self) -> Arc<PersistenceContextMenuProvider> {
        PersistenceContextMenuProvider::instance()
    }
}

/// Bring the module up
pub async fn import() -> Result<PersistenceModule, ImportError> {
    info!("Persistence module imported");
    Ok(PersistenceModule { _private: () })
}
