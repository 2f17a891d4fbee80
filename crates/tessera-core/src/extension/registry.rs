use std::collections::BTreeMap;

use log::info;
use semver::Version;

use crate::extension::error::ExtensionError;
use crate::extension::traits::Extension;
use crate::extension::version::parse_version;

/// Bookkeeping for installed extensions
#[derive(Debug)]
pub struct ExtensionRegistry {
    api_version: Version,
    /// Installed extension names and their versions
    installed: BTreeMap<String, String>,
}

impl ExtensionRegistry {
    /// Create a registry for the given host API version
    pub fn new(api_version: &str) -> Result<Self, ExtensionError> {
        Ok(Self {
            api_version: parse_version(api_version)?,
            installed: BTreeMap::new(),
        })
    }

    pub fn api_version(&self) -> &Version {
        &self.api_version
    }

    /// Check whether the extension accepts this host's API version
    pub fn is_compatible(&self, extension: &dyn Extension) -> bool {
        extension
            .compatible_api_versions()
            .iter()
            .any(|range| range.includes(&self.api_version))
    }

    /// Record an extension as installed, rejecting duplicates and
    /// incompatible API requirements.
    pub fn reserve(&mut self, extension: &dyn Extension) -> Result<(), ExtensionError> {
        let name = extension.name();
        if self.installed.contains_key(name) {
            return Err(ExtensionError::AlreadyInstalled(name.to_string()));
        }
        if !self.is_compatible(extension) {
            return Err(ExtensionError::IncompatibleApi {
                name: name.to_string(),
                api_version: self.api_version.to_string(),
            });
        }
        info!("Installing extension '{}' v{}", name, extension.version());
        self.installed.insert(name.to_string(), extension.version().to_string());
        Ok(())
    }

    /// Forget an extension whose registration failed
    pub fn release(&mut self, name: &str) {
        self.installed.remove(name);
    }

    pub fn is_installed(&self, name: &str) -> bool {
        self.installed.contains_key(name)
    }

    /// Installed `(name, version)` pairs, sorted by name
    pub fn installed(&self) -> Vec<(String, String)> {
        self.installed
            .iter()
            .map(|(name, version)| (name.clone(), version.clone()))
            .collect()
    }
}
