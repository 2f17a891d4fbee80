use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{info, warn};

use crate::config::ConfigData;
use crate::settings::{
    SettingCategory, SettingDescriptor, SettingType, SettingValue, SettingsError, SettingsStore,
};

#[derive(Debug, Default)]
struct SettingsState {
    /// Descriptors in registration order
    descriptors: Vec<Arc<SettingDescriptor>>,
    /// User values that differ from the default
    values: HashMap<String, SettingValue>,
    /// Everything read from or written to the store, including keys of
    /// settings not registered in this session
    persisted: ConfigData,
}

/// Registry of setting extensions and their current values
#[derive(Debug, Default)]
pub struct SettingsRegistry {
    state: RwLock<SettingsState>,
    store: Option<SettingsStore>,
}

impl SettingsRegistry {
    /// An in-memory registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry backed by a settings file
    pub fn with_store(store: SettingsStore) -> Result<Self, SettingsError> {
        let persisted = store.load()?;
        info!(
            "Loaded {} persisted setting values from {}",
            persisted.keys().len(),
            store.path().display()
        );
        Ok(Self {
            state: RwLock::new(SettingsState {
                persisted,
                ..SettingsState::default()
            }),
            store: Some(store),
        })
    }

    /// Register a setting descriptor
    pub fn register_setting_extension(&self, descriptor: SettingDescriptor) -> Result<(), SettingsError> {
        descriptor.validate()?;
        let mut state = self.write_state()?;
        let name = descriptor.setting_name.clone();
        if state.descriptors.iter().any(|d| d.setting_name == name) {
            return Err(SettingsError::DuplicateSetting(name));
        }

        // Adopt a persisted value only if it is still valid for this descriptor
        if let Some(stored) = state.persisted.get::<SettingValue>(&name) {
            if stored.matches(descriptor.setting_type) && descriptor.is_option(&stored) {
                state.values.insert(name.clone(), stored);
            } else {
                warn!("Ignoring persisted value {} for setting '{}'", stored, name);
            }
        }

        info!("Registered setting '{}' in category {}", name, descriptor.category);
        state.descriptors.push(Arc::new(descriptor));
        Ok(())
    }

    /// Remove a setting descriptor and its in-memory value.
    /// The persisted value stays in the store.
    pub fn unregister_setting_extension(&self, name: &str) -> Result<bool, SettingsError> {
        let mut state = self.write_state()?;
        let before = state.descriptors.len();
        state.descriptors.retain(|d| d.setting_name != name);
        let removed = state.descriptors.len() != before;
        if removed {
            state.values.remove(name);
            info!("Unregistered setting '{}'", name);
        }
        Ok(removed)
    }

    pub fn descriptor(&self, name: &str) -> Result<Arc<SettingDescriptor>, SettingsError> {
        let state = self.read_state()?;
        Self::find(&state, name)
    }

    /// All descriptors in registration order
    pub fn descriptors(&self) -> Result<Vec<Arc<SettingDescriptor>>, SettingsError> {
        Ok(self.read_state()?.descriptors.clone())
    }

    pub fn by_category(&self, category: SettingCategory) -> Result<Vec<Arc<SettingDescriptor>>, SettingsError> {
        Ok(self
            .read_state()?
            .descriptors
            .iter()
            .filter(|d| d.category == category)
            .cloned()
            .collect())
    }

    /// Settings whose title or tags contain `query`
    pub fn search(&self, query: &str) -> Result<Vec<Arc<SettingDescriptor>>, SettingsError> {
        Ok(self
            .read_state()?
            .descriptors
            .iter()
            .filter(|d| d.matches_query(query))
            .cloned()
            .collect())
    }

    /// Current value: the user's value if set, else the default
    pub fn get(&self, name: &str) -> Result<SettingValue, SettingsError> {
        let state = self.read_state()?;
        let descriptor = Self::find(&state, name)?;
        Ok(state
            .values
            .get(name)
            .cloned()
            .unwrap_or_else(|| descriptor.default_value.clone()))
    }

    /// Convenience accessor for boolean settings
    pub fn get_bool(&self, name: &str) -> Result<bool, SettingsError> {
        let value = self.get(name)?;
        value.as_bool().ok_or_else(|| SettingsError::TypeMismatch {
            name: name.to_string(),
            expected: SettingType::Boolean,
            value,
        })
    }

    /// Set a user value, validating type and option membership
    pub fn set(&self, name: &str, value: SettingValue) -> Result<(), SettingsError> {
        let mut state = self.write_state()?;
        let descriptor = Self::find(&state, name)?;
        if !value.matches(descriptor.setting_type) {
            warn!("Rejected value {} for setting '{}'", value, name);
            return Err(SettingsError::TypeMismatch {
                name: name.to_string(),
                expected: descriptor.setting_type,
                value,
            });
        }
        if !descriptor.is_option(&value) {
            warn!("Rejected value {} for setting '{}'", value, name);
            return Err(SettingsError::NotAnOption {
                name: name.to_string(),
                value,
            });
        }

        let mut persisted = state.persisted.clone();
        persisted.set(name, &value)?;
        self.persist(&persisted)?;
        state.persisted = persisted;
        state.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Drop the user value so the default applies again
    pub fn reset(&self, name: &str) -> Result<(), SettingsError> {
        let mut state = self.write_state()?;
        Self::find(&state, name)?;
        let mut persisted = state.persisted.clone();
        persisted.remove(name);
        self.persist(&persisted)?;
        state.persisted = persisted;
        state.values.remove(name);
        Ok(())
    }

    /// Write `persisted` to the store; in-memory state is committed only after this succeeds
    fn persist(&self, persisted: &ConfigData) -> Result<(), SettingsError> {
        if let Some(store) = &self.store {
            store.save(persisted)?;
        }
        Ok(())
    }

    fn find(state: &SettingsState, name: &str) -> Result<Arc<SettingDescriptor>, SettingsError> {
        state
            .descriptors
            .iter()
            .find(|d| d.setting_name == name)
            .cloned()
            .ok_or_else(|| SettingsError::SettingNotFound(name.to_string()))
    }

    fn read_state(&self) -> Result<RwLockReadGuard<'_, SettingsState>, SettingsError> {
        self.state.read().map_err(|_| SettingsError::RegistryPoisoned)
    }

    fn write_state(&self) -> Result<RwLockWriteGuard<'_, SettingsState>, SettingsError> {
        self.state.write().map_err(|_| SettingsError::RegistryPoisoned)
    }
}
