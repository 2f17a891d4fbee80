//! # Tessera Core Context Menus
//!
//! Right-clickable objects are modelled by the closed [`ContextTarget`] enum.
//! A provider extension declares which [`ContextType`]s it applies to; when
//! the host builds a menu it matches the target's tag against those types,
//! loads each applicable provider lazily and lets it append items.
pub mod error;
pub mod registry;

use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};

use crate::kernel::error::Result;
pub use error::ContextMenuError;
pub use registry::ContextMenuRegistry;

/// Capability tag a provider can declare interest in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextType {
    UiSourceCode,
    Resource,
    NetworkRequest,
}

impl ContextType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextType::UiSourceCode => "ui-source-code",
            ContextType::Resource => "resource",
            ContextType::NetworkRequest => "network-request",
        }
    }
}

impl fmt::Display for ContextType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContextType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ui-source-code" | "source" => Ok(ContextType::UiSourceCode),
            "resource" => Ok(ContextType::Resource),
            "network-request" | "request" => Ok(ContextType::NetworkRequest),
            other => Err(format!("unknown context type '{}'", other)),
        }
    }
}

/// The object a context menu was opened on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextTarget {
    /// A file in the workspace or a mapped network resource
    UiSourceCode { url: String },
    /// A page resource known to the resource tree
    Resource { url: String, mime_type: String },
    /// A captured network request
    NetworkRequest { url: String, method: String },
    /// A DOM node; no persistence capability
    DomNode { description: String },
}

impl ContextTarget {
    /// Capability tag of this target, if it has one
    pub fn context_type(&self) -> Option<ContextType> {
        match self {
            ContextTarget::UiSourceCode { .. } => Some(ContextType::UiSourceCode),
            ContextTarget::Resource { .. } => Some(ContextType::Resource),
            ContextTarget::NetworkRequest { .. } => Some(ContextType::NetworkRequest),
            ContextTarget::DomNode { .. } => None,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            ContextTarget::UiSourceCode { url }
            | ContextTarget::Resource { url, .. }
            | ContextTarget::NetworkRequest { url, .. } => Some(url),
            ContextTarget::DomNode { .. } => None,
        }
    }
}

/// Menu sections, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MenuSection {
    Header,
    Reveal,
    Edit,
    Clipboard,
    Override,
    Save,
    Default,
    Footer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenuItem {
    pub section: MenuSection,
    pub label: String,
    /// Identifier of the action the host runs when the item is chosen
    pub action_id: String,
}

/// A context menu under construction
#[derive(Debug, Clone, Default)]
pub struct ContextMenu {
    items: Vec<ContextMenuItem>,
}

impl ContextMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_item(
        &mut self,
        section: MenuSection,
        label: impl Into<String>,
        action_id: impl Into<String>,
    ) {
        self.items.push(ContextMenuItem {
            section,
            label: label.into(),
            action_id: action_id.into(),
        });
    }

    /// Items grouped by section; insertion order is kept within a section
    pub fn items(&self) -> Vec<&ContextMenuItem> {
        let mut items: Vec<&ContextMenuItem> = self.items.iter().collect();
        items.sort_by_key(|item| item.section);
        items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A live context-menu provider
pub trait ContextMenuProvider: Send + Sync {
    /// Append the items that apply to `target`
    fn append_applicable_items(&self, target: &ContextTarget, menu: &mut ContextMenu);
}

/// Deferred constructor for a provider
pub type ProviderLoader =
    Arc<dyn Fn() -> BoxFuture<'static, Result<Arc<dyn ContextMenuProvider>>> + Send + Sync>;

/// Wrap an async closure as a [`ProviderLoader`]
pub fn provider_loader<F, Fut>(load: F) -> ProviderLoader
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Arc<dyn ContextMenuProvider>>> + Send + 'static,
{
    Arc::new(move || load().boxed())
}

/// Static description of a context-menu provider extension
#[derive(Clone)]
pub struct ProviderDescriptor {
    pub context_types: Vec<ContextType>,
    pub load_provider: ProviderLoader,
    /// Experiment that must be enabled for the provider to be consulted
    pub experiment: Option<String>,
}

impl ProviderDescriptor {
    /// Whether this provider is interested in `target`
    pub fn applies_to(&self, target: &ContextTarget) -> bool {
        target
            .context_type()
            .is_some_and(|tag| self.context_types.contains(&tag))
    }
}

impl fmt::Debug for ProviderDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderDescriptor")
            .field("context_types", &self.context_types)
            .field("experiment", &self.experiment)
            .finish_non_exhaustive()
    }
}
