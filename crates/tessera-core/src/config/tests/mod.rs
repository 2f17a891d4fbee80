use std::collections::HashMap;
use std::path::Path;

use tempfile::tempdir;

use crate::config::{ConfigData, ConfigError, ConfigFormat, HostConfig};
use crate::kernel::constants::DEFAULT_LOCALE;

#[test]
fn test_config_format_from_path() {
    assert_eq!(ConfigFormat::from_path(Path::new("a.json")), Some(ConfigFormat::Json));
    assert_eq!(ConfigFormat::from_path(Path::new("a.JSON")), Some(ConfigFormat::Json));
    #[cfg(feature = "yaml-config")]
    assert_eq!(ConfigFormat::from_path(Path::new("a.yml")), Some(ConfigFormat::Yaml));
    #[cfg(feature = "toml-config")]
    assert_eq!(ConfigFormat::from_path(Path::new("a.toml")), Some(ConfigFormat::Toml));
    assert_eq!(ConfigFormat::from_path(Path::new("a.ini")), None);
    assert_eq!(ConfigFormat::from_path(Path::new("no_extension")), None);
}

#[test]
fn test_config_data_basic() -> Result<(), ConfigError> {
    let mut config = ConfigData::new();
    config.set("string_value", "hello")?;
    config.set("bool_value", true)?;
    config.set("number", 42)?;

    assert_eq!(config.get::<String>("string_value").as_deref(), Some("hello"));
    assert_eq!(config.get::<bool>("bool_value"), Some(true));
    assert_eq!(config.get::<u32>("missing"), None);
    // Wrong type reads as missing
    assert_eq!(config.get::<bool>("string_value"), None);

    assert!(config.remove("number").is_some());
    assert_eq!(config.get::<u32>("number"), None);
    assert_eq!(config.keys(), vec!["bool_value".to_string(), "string_value".to_string()]);
    Ok(())
}

#[test]
fn test_write_and_read_file_each_format() -> Result<(), ConfigError> {
    let dir = tempdir().expect("tempdir");
    let mut config = ConfigData::new();
    config.set("persistenceNetworkOverridesEnabled", true)?;
    config.set("label", "x")?;

    let mut names = vec!["values.json"];
    #[cfg(feature = "yaml-config")]
    names.push("values.yaml");
    #[cfg(feature = "toml-config")]
    names.push("values.toml");

    for name in names {
        let path = dir.path().join("nested").join(name);
        ConfigFormat::write_file(&path, &config)?;
        let loaded: ConfigData = ConfigFormat::read_file(&path)?;
        assert_eq!(loaded, config, "round trip through {}", name);
    }
    Ok(())
}

#[test]
fn test_unsupported_format_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("values.ini");
    let err = ConfigFormat::write_file(&path, &ConfigData::new()).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedConfigFormat(p) if p == path));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().expect("tempdir");
    let err = ConfigFormat::read_file::<ConfigData>(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { ref operation, .. } if operation == "read"));
}

#[test]
fn test_host_config_defaults() {
    let config = HostConfig::default();
    assert_eq!(config.locale, DEFAULT_LOCALE);
    assert!(config.experiments.is_empty());
    assert!(config.settings_path.is_none());
}

#[test]
fn test_host_config_load_resolves_relative_paths() -> Result<(), ConfigError> {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("host.json");
    std::fs::write(
        &path,
        r#"{ "locale": "de-DE", "settings_path": "state/settings.json", "catalogs": { "de-DE": "de.json" } }"#,
    )
    .expect("write config");

    let config = HostConfig::load(&path)?;
    assert_eq!(config.locale, "de-DE");
    assert!(config.experiments.is_empty(), "missing fields fall back to defaults");
    assert_eq!(config.settings_path, Some(dir.path().join("state/settings.json")));
    let mut expected = HashMap::new();
    expected.insert("de-DE".to_string(), dir.path().join("de.json"));
    assert_eq!(config.catalogs, expected);
    Ok(())
}
