use std::collections::BTreeSet;
use std::sync::RwLock;

use log::debug;

/// Named experiments known to the host and the subset currently enabled
#[derive(Debug, Default)]
pub struct ExperimentSet {
    known: RwLock<BTreeSet<String>>,
    enabled: RwLock<BTreeSet<String>>,
}

impl ExperimentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an experiment; it starts disabled
    pub fn register(&self, name: &str) {
        if let Ok(mut known) = self.known.write() {
            known.insert(name.to_string());
        }
    }

    /// Enable an experiment, declaring it if needed
    pub fn enable(&self, name: &str) {
        self.register(name);
        if let Ok(mut enabled) = self.enabled.write() {
            debug!("Enabling experiment '{}'", name);
            enabled.insert(name.to_string());
        }
    }

    pub fn disable(&self, name: &str) {
        if let Ok(mut enabled) = self.enabled.write() {
            enabled.remove(name);
        }
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.known.read().map(|k| k.contains(name)).unwrap_or(false)
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled.read().map(|e| e.contains(name)).unwrap_or(false)
    }

    /// Enabled experiment names, sorted
    pub fn enabled(&self) -> Vec<String> {
        self.enabled
            .read()
            .map(|e| e.iter().cloned().collect())
            .unwrap_or_default()
    }
}
