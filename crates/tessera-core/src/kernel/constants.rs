/// Application name
pub const APP_NAME: &str = "Tessera";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Current extension API version
pub const API_VERSION: &str = "0.1.0";

/// Locale used when no configuration selects one
pub const DEFAULT_LOCALE: &str = "en-US";

/// Default name of the host configuration file
pub const DEFAULT_CONFIG_FILE: &str = "tessera.toml";
