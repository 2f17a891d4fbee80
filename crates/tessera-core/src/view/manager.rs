use std::sync::{Arc, RwLock};

use log::{debug, info};

use crate::kernel::error::Result;
use crate::view::{View, ViewDescriptor, ViewError, ViewLocation};

/// Registry of view extensions
#[derive(Debug, Default)]
pub struct ViewManager {
    /// Descriptors in registration order
    views: RwLock<Vec<Arc<ViewDescriptor>>>,
}

impl ViewManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a view descriptor. Ids must be unique per location.
    pub fn register_view_extension(&self, descriptor: ViewDescriptor) -> std::result::Result<(), ViewError> {
        let mut views = self.views.write().map_err(|_| ViewError::RegistryPoisoned)?;
        if views
            .iter()
            .any(|v| v.location == descriptor.location && v.id == descriptor.id)
        {
            return Err(ViewError::DuplicateView {
                location: descriptor.location.to_string(),
                id: descriptor.id,
            });
        }
        info!("Registered view '{}' at '{}'", descriptor.id, descriptor.location);
        views.push(Arc::new(descriptor));
        Ok(())
    }

    /// Remove a view descriptor; returns whether one was registered
    pub fn unregister_view_extension(&self, location: ViewLocation, id: &str) -> std::result::Result<bool, ViewError> {
        let mut views = self.views.write().map_err(|_| ViewError::RegistryPoisoned)?;
        let before = views.len();
        views.retain(|v| !(v.location == location && v.id == id));
        let removed = views.len() != before;
        if removed {
            info!("Unregistered view '{}' at '{}'", id, location);
        }
        Ok(removed)
    }

    /// Number of registered views
    pub fn len(&self) -> usize {
        self.views.read().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Views at a location, by ascending order (ties keep registration order)
    pub fn views_at(&self, location: ViewLocation) -> std::result::Result<Vec<Arc<ViewDescriptor>>, ViewError> {
        let views = self.views.read().map_err(|_| ViewError::RegistryPoisoned)?;
        let mut found: Vec<_> = views
            .iter()
            .filter(|v| v.location == location)
            .cloned()
            .collect();
        found.sort_by_key(|v| v.order);
        Ok(found)
    }

    /// Look up a single descriptor
    pub fn descriptor(&self, location: ViewLocation, id: &str) -> std::result::Result<Arc<ViewDescriptor>, ViewError> {
        let views = self.views.read().map_err(|_| ViewError::RegistryPoisoned)?;
        views
            .iter()
            .find(|v| v.location == location && v.id == id)
            .cloned()
            .ok_or_else(|| ViewError::ViewNotFound {
                location: location.to_string(),
                id: id.to_string(),
            })
    }

    /// Open a view, running its deferred loader
    pub async fn load_view(&self, location: ViewLocation, id: &str) -> Result<Arc<dyn View>> {
        // The lock is released before the loader runs
        let descriptor = self.descriptor(location, id)?;
        debug!("Loading view '{}' at '{}'", id, location);
        (descriptor.load_view)().await
    }

    /// Every view's command-menu entry, ordered by location then order
    pub fn commands(&self) -> std::result::Result<Vec<Arc<ViewDescriptor>>, ViewError> {
        let views = self.views.read().map_err(|_| ViewError::RegistryPoisoned)?;
        let mut commands: Vec<_> = views.iter().cloned().collect();
        commands.sort_by(|a, b| {
            a.location
                .as_str()
                .cmp(b.location.as_str())
                .then(a.order.cmp(&b.order))
        });
        Ok(commands)
    }

    /// Commands whose localized prompt contains `query`, case-insensitively
    pub fn search_commands(&self, query: &str) -> std::result::Result<Vec<Arc<ViewDescriptor>>, ViewError> {
        let needle = query.to_lowercase();
        Ok(self
            .commands()?
            .into_iter()
            .filter(|v| v.command_prompt.resolve().to_lowercase().contains(&needle))
            .collect())
    }
}
