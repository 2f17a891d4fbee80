//! # Tessera Core Localization
//!
//! Every user-facing string an extension contributes is declared once, in a
//! table mapping message keys to default English text, and registered under a
//! namespace with [`I18n::register_ui_strings`]. The returned [`UiStrings`]
//! handle binds keys to [`LocalizedString`] thunks which are resolved only
//! when the host actually displays them, so switching the active locale
//! after registration is reflected on the next read.
//!
//! Translations are optional. When the active locale has no entry for a
//! `(namespace, key)` pair the registered default text is returned.
pub mod error;

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, RwLock};

use log::{debug, warn};

use crate::config::ConfigFormat;
use crate::kernel::constants::DEFAULT_LOCALE;
pub use error::I18nError;

/// Translations for one locale: namespace -> message key -> text
pub type Catalog = HashMap<String, HashMap<String, String>>;

/// A string computed on demand from a fixed message table
#[derive(Clone)]
pub struct LocalizedString {
    key: String,
    resolver: Arc<dyn Fn() -> String + Send + Sync>,
}

impl LocalizedString {
    /// Wraps an arbitrary resolver under the given message key
    pub fn new<F>(key: impl Into<String>, resolver: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            resolver: Arc::new(resolver),
        }
    }

    /// A fixed string that is never translated
    pub fn literal(text: impl Into<String>) -> Self {
        let text = text.into();
        let key = text.clone();
        Self::new(key, move || text.clone())
    }

    /// The message key this string was bound to
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Computes the string for the currently active locale
    pub fn resolve(&self) -> String {
        (self.resolver)()
    }
}

impl fmt::Debug for LocalizedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalizedString")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for LocalizedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resolve())
    }
}

/// Localization registry shared by the host and all extensions
#[derive(Debug)]
pub struct I18n {
    locale: RwLock<String>,
    /// Registered default tables, keyed by namespace
    tables: RwLock<HashMap<String, Arc<HashMap<String, String>>>>,
    /// Loaded translations, keyed by locale
    catalogs: RwLock<HashMap<String, Catalog>>,
}

impl I18n {
    /// Create a registry with the given active locale
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: RwLock::new(locale.into()),
            tables: RwLock::new(HashMap::new()),
            catalogs: RwLock::new(HashMap::new()),
        }
    }

    /// The active locale tag
    pub fn locale(&self) -> String {
        match self.locale.read() {
            Ok(locale) => locale.clone(),
            Err(_) => DEFAULT_LOCALE.to_string(),
        }
    }

    /// Switch the active locale; already-bound strings follow on their next read
    pub fn set_locale(&self, locale: impl Into<String>) -> Result<(), I18nError> {
        let locale = locale.into();
        debug!("Switching active locale to '{}'", locale);
        *self.locale.write().map_err(|_| I18nError::Poisoned("locale"))? = locale;
        Ok(())
    }

    /// Register a namespace's message table and return a handle for binding keys
    pub fn register_ui_strings(
        self: &Arc<Self>,
        namespace: &str,
        messages: &[(&str, &str)],
    ) -> Result<UiStrings, I18nError> {
        let mut table = HashMap::with_capacity(messages.len());
        for (key, text) in messages {
            if table.insert(key.to_string(), text.to_string()).is_some() {
                return Err(I18nError::DuplicateMessage {
                    namespace: namespace.to_string(),
                    key: key.to_string(),
                });
            }
        }

        let mut tables = self.tables.write().map_err(|_| I18nError::Poisoned("tables"))?;
        if tables.contains_key(namespace) {
            return Err(I18nError::DuplicateNamespace(namespace.to_string()));
        }
        let table = Arc::new(table);
        tables.insert(namespace.to_string(), Arc::clone(&table));
        debug!("Registered {} UI strings under '{}'", table.len(), namespace);

        Ok(UiStrings {
            namespace: namespace.to_string(),
            defaults: table,
            i18n: Arc::clone(self),
        })
    }

    /// Drop a namespace's message table. Strings already bound keep their defaults.
    pub fn unregister_ui_strings(&self, namespace: &str) -> Result<bool, I18nError> {
        let mut tables = self.tables.write().map_err(|_| I18nError::Poisoned("tables"))?;
        let removed = tables.remove(namespace).is_some();
        if removed {
            debug!("Unregistered UI strings under '{}'", namespace);
        }
        Ok(removed)
    }

    /// Check whether a namespace has been registered
    pub fn has_namespace(&self, namespace: &str) -> bool {
        self.tables
            .read()
            .map(|tables| tables.contains_key(namespace))
            .unwrap_or(false)
    }

    /// Merge translations for a locale into the registry
    pub fn add_translations(&self, locale: &str, catalog: Catalog) -> Result<(), I18nError> {
        let mut catalogs = self.catalogs.write().map_err(|_| I18nError::Poisoned("catalogs"))?;
        let entry = catalogs.entry(locale.to_string()).or_default();
        for (namespace, messages) in catalog {
            entry.entry(namespace).or_default().extend(messages);
        }
        Ok(())
    }

    /// Load a translation catalog file (`{namespace: {key: text}}`) for a locale
    pub fn load_catalog(&self, locale: &str, path: &Path) -> Result<(), I18nError> {
        let catalog: Catalog = ConfigFormat::read_file(path).map_err(|source| I18nError::CatalogLoad {
            locale: locale.to_string(),
            source,
        })?;
        debug!("Loaded translation catalog for '{}' from {}", locale, path.display());
        self.add_translations(locale, catalog)
    }

    /// Look up a translation for the active locale
    fn translate(&self, namespace: &str, key: &str) -> Option<String> {
        let locale = self.locale();
        let catalogs = match self.catalogs.read() {
            Ok(catalogs) => catalogs,
            Err(_) => {
                warn!("Translation catalogs are poisoned, falling back to default text");
                return None;
            }
        };
        catalogs
            .get(&locale)
            .and_then(|catalog| catalog.get(namespace))
            .and_then(|messages| messages.get(key))
            .cloned()
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

/// Handle to one registered message table
#[derive(Debug, Clone)]
pub struct UiStrings {
    namespace: String,
    defaults: Arc<HashMap<String, String>>,
    i18n: Arc<I18n>,
}

impl UiStrings {
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Message keys declared by this table
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.defaults.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Bind a key to a lazily resolved string
    pub fn lazy(&self, key: &str) -> Result<LocalizedString, I18nError> {
        let default = self
            .defaults
            .get(key)
            .cloned()
            .ok_or_else(|| I18nError::UnknownMessage {
                namespace: self.namespace.clone(),
                key: key.to_string(),
            })?;
        let i18n = Arc::clone(&self.i18n);
        let namespace = self.namespace.clone();
        let bound_key = key.to_string();
        Ok(LocalizedString::new(key, move || {
            i18n.translate(&namespace, &bound_key)
                .unwrap_or_else(|| default.clone())
        }))
    }

    /// Resolve a key immediately
    pub fn get(&self, key: &str) -> Result<String, I18nError> {
        self.lazy(key).map(|s| s.resolve())
    }
}

#[cfg(test)]
mod tests;
