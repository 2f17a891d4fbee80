use std::sync::{Arc, RwLock};

use log::{debug, info};

use crate::context_menu::{ContextMenu, ContextMenuError, ContextTarget, ProviderDescriptor};
use crate::kernel::error::Result;
use crate::kernel::experiments::ExperimentSet;

/// Registry of context-menu providers
#[derive(Debug)]
pub struct ContextMenuRegistry {
    /// Providers in registration order
    providers: RwLock<Vec<Arc<ProviderDescriptor>>>,
    experiments: Arc<ExperimentSet>,
}

impl ContextMenuRegistry {
    pub fn new(experiments: Arc<ExperimentSet>) -> Self {
        Self {
            providers: RwLock::new(Vec::new()),
            experiments,
        }
    }

    /// Register a provider; the returned handle identifies it for removal
    pub fn register_provider(
        &self,
        descriptor: ProviderDescriptor,
    ) -> std::result::Result<Arc<ProviderDescriptor>, ContextMenuError> {
        if descriptor.context_types.is_empty() {
            return Err(ContextMenuError::NoContextTypes);
        }
        if let Some(experiment) = &descriptor.experiment {
            if !self.experiments.is_known(experiment) {
                return Err(ContextMenuError::UnknownExperiment(experiment.clone()));
            }
        }
        let mut providers = self.providers.write().map_err(|_| ContextMenuError::RegistryPoisoned)?;
        info!("Registered context menu provider for {:?}", descriptor.context_types);
        let descriptor = Arc::new(descriptor);
        providers.push(Arc::clone(&descriptor));
        Ok(descriptor)
    }

    /// Remove a provider previously returned by [`register_provider`](Self::register_provider)
    pub fn unregister_provider(&self, descriptor: &Arc<ProviderDescriptor>) -> std::result::Result<bool, ContextMenuError> {
        let mut providers = self.providers.write().map_err(|_| ContextMenuError::RegistryPoisoned)?;
        let before = providers.len();
        providers.retain(|p| !Arc::ptr_eq(p, descriptor));
        Ok(providers.len() != before)
    }

    pub fn len(&self) -> usize {
        self.providers.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Providers that apply to `target` and whose experiment gate is open
    pub fn applicable(&self, target: &ContextTarget) -> std::result::Result<Vec<Arc<ProviderDescriptor>>, ContextMenuError> {
        let providers = self.providers.read().map_err(|_| ContextMenuError::RegistryPoisoned)?;
        Ok(providers
            .iter()
            .filter(|p| p.applies_to(target))
            .filter(|p| {
                p.experiment
                    .as_deref()
                    .is_none_or(|experiment| self.experiments.is_enabled(experiment))
            })
            .cloned()
            .collect())
    }

    /// Build the menu for `target`, loading applicable providers in
    /// registration order. A provider that fails to load fails the build.
    pub async fn build_menu(&self, target: &ContextTarget) -> Result<ContextMenu> {
        let applicable = self.applicable(target)?;
        debug!("{} providers apply to {:?}", applicable.len(), target);

        let mut menu = ContextMenu::new();
        for descriptor in applicable {
            let provider = (descriptor.load_provider)().await?;
            provider.append_applicable_items(target, &mut menu);
        }
        Ok(menu)
    }
}
