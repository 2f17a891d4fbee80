//! # Tessera Core Settings
//!
//! Extensions declare user settings with a [`SettingDescriptor`]: a storage
//! key, a value type with a default, a category, a localized title, search
//! tags and optionally an enumerated list of labelled values. The
//! [`SettingsRegistry`] validates descriptors when they are registered and
//! owns the current values; a [`SettingsStore`] can persist user values to a
//! configuration file.
pub mod error;
pub mod registry;
pub mod store;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::i18n::LocalizedString;
pub use error::SettingsError;
pub use registry::SettingsRegistry;
pub use store::SettingsStore;

/// Settings screen grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingCategory {
    Global,
    Appearance,
    Sources,
    Network,
    Console,
    Debugger,
    Persistence,
}

impl SettingCategory {
    pub fn label(&self) -> &'static str {
        match self {
            SettingCategory::Global => "Global",
            SettingCategory::Appearance => "Appearance",
            SettingCategory::Sources => "Sources",
            SettingCategory::Network => "Network",
            SettingCategory::Console => "Console",
            SettingCategory::Debugger => "Debugger",
            SettingCategory::Persistence => "Persistence",
        }
    }
}

impl fmt::Display for SettingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Declared type of a setting's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingType {
    Boolean,
    /// A text value restricted to the descriptor's options
    Enum,
    Text,
    Number,
}

impl fmt::Display for SettingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SettingType::Boolean => "boolean",
            SettingType::Enum => "enum",
            SettingType::Text => "text",
            SettingType::Number => "number",
        };
        f.write_str(name)
    }
}

/// A setting value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl SettingValue {
    /// Whether this value is a valid instance of `setting_type`
    pub fn matches(&self, setting_type: SettingType) -> bool {
        matches!(
            (self, setting_type),
            (SettingValue::Bool(_), SettingType::Boolean)
                | (SettingValue::Number(_), SettingType::Number)
                | (SettingValue::Text(_), SettingType::Text | SettingType::Enum)
        )
    }

    /// Parse user input as a value of `setting_type`
    pub fn parse(setting_type: SettingType, raw: &str) -> Option<Self> {
        match setting_type {
            SettingType::Boolean => match raw.trim().to_lowercase().as_str() {
                "true" | "on" | "1" => Some(SettingValue::Bool(true)),
                "false" | "off" | "0" => Some(SettingValue::Bool(false)),
                _ => None,
            },
            SettingType::Number => raw.trim().parse().ok().map(SettingValue::Number),
            SettingType::Text | SettingType::Enum => Some(SettingValue::Text(raw.to_string())),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(b) => write!(f, "{}", b),
            SettingValue::Number(n) => write!(f, "{}", n),
            SettingValue::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}

/// One labelled entry of a setting's option list
#[derive(Debug, Clone)]
pub struct SettingOption {
    pub value: SettingValue,
    pub title: LocalizedString,
}

/// Static description of a setting extension
#[derive(Debug, Clone)]
pub struct SettingDescriptor {
    pub category: SettingCategory,
    pub title: LocalizedString,
    /// Storage key, unique within the registry
    pub setting_name: String,
    pub setting_type: SettingType,
    pub default_value: SettingValue,
    pub tags: Vec<LocalizedString>,
    pub options: Vec<SettingOption>,
}

impl SettingDescriptor {
    /// Check the descriptor's internal consistency
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |reason: String| SettingsError::InvalidDescriptor(self.setting_name.clone(), reason);

        if self.setting_name.trim().is_empty() {
            return Err(invalid("storage key is empty".to_string()));
        }
        if !self.default_value.matches(self.setting_type) {
            return Err(invalid(format!(
                "default value {} is not a valid {}",
                self.default_value, self.setting_type
            )));
        }
        if let Some(option) = self.options.iter().find(|o| !o.value.matches(self.setting_type)) {
            return Err(invalid(format!(
                "option value {} is not a valid {}",
                option.value, self.setting_type
            )));
        }
        if self.setting_type == SettingType::Enum && !self.is_option(&self.default_value) {
            return Err(invalid(format!(
                "default value {} is not one of the options",
                self.default_value
            )));
        }
        Ok(())
    }

    /// Whether `value` is acceptable with respect to the option list
    pub fn is_option(&self, value: &SettingValue) -> bool {
        self.options.is_empty() || self.options.iter().any(|o| &o.value == value)
    }

    /// Label of the option holding `value`, if any
    pub fn option_title(&self, value: &SettingValue) -> Option<String> {
        self.options
            .iter()
            .find(|o| &o.value == value)
            .map(|o| o.title.resolve())
    }

    /// Case-insensitive match against the title and search tags
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        std::iter::once(&self.title)
            .chain(self.tags.iter())
            .any(|s| s.resolve().to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests;
