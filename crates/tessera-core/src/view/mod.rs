//! # Tessera Core Views
//!
//! A view extension is a static [`ViewDescriptor`] naming where the view lives
//! ([`ViewLocation`]), how it is titled and ordered, the command-menu text that
//! opens it, and a deferred loader producing the live [`View`] controller.
//! Descriptors are registered with the [`ViewManager`] at startup; the loader is
//! invoked only when the user opens the view.
pub mod error;
pub mod manager;

use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};

use crate::i18n::LocalizedString;
use crate::kernel::error::Result;
pub use error::ViewError;
pub use manager::ViewManager;

/// Where in the host shell a view is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewLocation {
    SettingsView,
    Panel,
    Drawer,
    Navigator,
}

impl ViewLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewLocation::SettingsView => "settings-view",
            ViewLocation::Panel => "panel",
            ViewLocation::Drawer => "drawer-view",
            ViewLocation::Navigator => "navigator-view",
        }
    }
}

impl fmt::Display for ViewLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewLocation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "settings-view" => Ok(ViewLocation::SettingsView),
            "panel" => Ok(ViewLocation::Panel),
            "drawer-view" => Ok(ViewLocation::Drawer),
            "navigator-view" => Ok(ViewLocation::Navigator),
            other => Err(format!("unknown view location '{}'", other)),
        }
    }
}

/// A live view controller
pub trait View: Send + Sync {
    /// Identifier of the view, matching its descriptor's id
    fn view_id(&self) -> &str;

    /// Text lines shown when the view is opened
    fn render(&self) -> Vec<String>;
}

/// Deferred constructor for a view controller
pub type ViewLoader = Arc<dyn Fn() -> BoxFuture<'static, Result<Arc<dyn View>>> + Send + Sync>;

/// Wrap an async closure as a [`ViewLoader`]
pub fn view_loader<F, Fut>(load: F) -> ViewLoader
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Arc<dyn View>>> + Send + 'static,
{
    Arc::new(move || load().boxed())
}

/// Static description of a view extension
#[derive(Clone)]
pub struct ViewDescriptor {
    pub location: ViewLocation,
    /// Unique per location
    pub id: String,
    pub title: LocalizedString,
    /// Text of the command-menu entry that opens the view
    pub command_prompt: LocalizedString,
    /// Ascending sort key within the location
    pub order: i32,
    pub load_view: ViewLoader,
}

impl fmt::Debug for ViewDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewDescriptor")
            .field("location", &self.location)
            .field("id", &self.id)
            .field("title", &self.title)
            .field("command_prompt", &self.command_prompt)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}
