use tempfile::tempdir;

use crate::config::{ConfigData, ConfigFormat};
use crate::i18n::LocalizedString;
use crate::settings::{
    SettingCategory, SettingDescriptor, SettingOption, SettingType, SettingValue, SettingsError,
    SettingsRegistry, SettingsStore,
};

const OVERRIDES: &str = "persistenceNetworkOverridesEnabled";

fn boolean_setting(name: &str) -> SettingDescriptor {
    SettingDescriptor {
        category: SettingCategory::Persistence,
        title: LocalizedString::literal("Enable Local Overrides"),
        setting_name: name.to_string(),
        setting_type: SettingType::Boolean,
        default_value: SettingValue::Bool(false),
        tags: vec![
            LocalizedString::literal("interception"),
            LocalizedString::literal("override"),
        ],
        options: vec![
            SettingOption {
                value: SettingValue::Bool(true),
                title: LocalizedString::literal("Enable override network requests"),
            },
            SettingOption {
                value: SettingValue::Bool(false),
                title: LocalizedString::literal("Disable override network requests"),
            },
        ],
    }
}

fn enum_setting(name: &str, default: &str) -> SettingDescriptor {
    SettingDescriptor {
        category: SettingCategory::Appearance,
        title: LocalizedString::literal("Theme"),
        setting_name: name.to_string(),
        setting_type: SettingType::Enum,
        default_value: SettingValue::Text(default.to_string()),
        tags: vec![],
        options: ["light", "dark"]
            .iter()
            .map(|v| SettingOption {
                value: SettingValue::Text(v.to_string()),
                title: LocalizedString::literal(v.to_string()),
            })
            .collect(),
    }
}

#[test]
fn test_value_matches_type() {
    assert!(SettingValue::Bool(true).matches(SettingType::Boolean));
    assert!(!SettingValue::Bool(true).matches(SettingType::Number));
    assert!(SettingValue::Number(1.5).matches(SettingType::Number));
    assert!(SettingValue::Text("a".into()).matches(SettingType::Enum));
    assert!(SettingValue::Text("a".into()).matches(SettingType::Text));
    assert!(!SettingValue::Text("true".into()).matches(SettingType::Boolean));
}

#[test]
fn test_value_parse() {
    assert_eq!(SettingValue::parse(SettingType::Boolean, "TRUE"), Some(SettingValue::Bool(true)));
    assert_eq!(SettingValue::parse(SettingType::Boolean, "off"), Some(SettingValue::Bool(false)));
    assert_eq!(SettingValue::parse(SettingType::Boolean, "maybe"), None);
    assert_eq!(SettingValue::parse(SettingType::Number, " 2.5 "), Some(SettingValue::Number(2.5)));
    assert_eq!(
        SettingValue::parse(SettingType::Enum, "dark"),
        Some(SettingValue::Text("dark".to_string()))
    );
}

#[test]
fn test_default_read_before_any_write() {
    let registry = SettingsRegistry::new();
    registry.register_setting_extension(boolean_setting(OVERRIDES)).expect("register");

    assert_eq!(registry.get(OVERRIDES).expect("get"), SettingValue::Bool(false));
    assert!(!registry.get_bool(OVERRIDES).expect("get_bool"));
}

#[test]
fn test_duplicate_storage_key_rejected() {
    let registry = SettingsRegistry::new();
    registry.register_setting_extension(boolean_setting(OVERRIDES)).expect("register");
    let err = registry.register_setting_extension(boolean_setting(OVERRIDES)).unwrap_err();
    assert!(matches!(err, SettingsError::DuplicateSetting(ref n) if n == OVERRIDES));
    assert_eq!(registry.descriptors().expect("descriptors").len(), 1);
}

#[test]
fn test_unregister_drops_descriptor_and_value() {
    let registry = SettingsRegistry::new();
    registry.register_setting_extension(boolean_setting(OVERRIDES)).expect("register");
    registry.set(OVERRIDES, SettingValue::Bool(true)).expect("set");

    assert!(registry.unregister_setting_extension(OVERRIDES).expect("unregister"));
    assert!(matches!(registry.get(OVERRIDES), Err(SettingsError::SettingNotFound(_))));
    assert!(!registry.unregister_setting_extension(OVERRIDES).expect("unregister"));

    registry.register_setting_extension(boolean_setting(OVERRIDES)).expect("register again");
    assert!(!registry.get_bool(OVERRIDES).expect("back to default"));
}

#[test]
fn test_invalid_descriptors_rejected() {
    let registry = SettingsRegistry::new();

    let mut wrong_default = boolean_setting("a");
    wrong_default.default_value = SettingValue::Text("false".to_string());
    assert!(matches!(
        registry.register_setting_extension(wrong_default),
        Err(SettingsError::InvalidDescriptor(..))
    ));

    let mut wrong_option = boolean_setting("b");
    wrong_option.options[0].value = SettingValue::Number(1.0);
    assert!(matches!(
        registry.register_setting_extension(wrong_option),
        Err(SettingsError::InvalidDescriptor(..))
    ));

    assert!(matches!(
        registry.register_setting_extension(enum_setting("theme", "solarized")),
        Err(SettingsError::InvalidDescriptor(..))
    ));

    assert!(registry.descriptors().expect("descriptors").is_empty());
}

#[test]
fn test_set_validates_type_and_options() {
    let registry = SettingsRegistry::new();
    registry.register_setting_extension(boolean_setting(OVERRIDES)).expect("register");
    registry.register_setting_extension(enum_setting("theme", "light")).expect("register");

    registry.set(OVERRIDES, SettingValue::Bool(true)).expect("set");
    assert!(registry.get_bool(OVERRIDES).expect("get"));

    let err = registry.set(OVERRIDES, SettingValue::Number(1.0)).unwrap_err();
    assert!(matches!(err, SettingsError::TypeMismatch { expected: SettingType::Boolean, .. }));

    let err = registry.set("theme", SettingValue::Text("neon".into())).unwrap_err();
    assert!(matches!(err, SettingsError::NotAnOption { .. }));
    registry.set("theme", SettingValue::Text("dark".into())).expect("set");

    registry.reset(OVERRIDES).expect("reset");
    assert!(!registry.get_bool(OVERRIDES).expect("get"));

    assert!(matches!(registry.get("unknown"), Err(SettingsError::SettingNotFound(_))));
    assert!(matches!(
        registry.set("unknown", SettingValue::Bool(true)),
        Err(SettingsError::SettingNotFound(_))
    ));
}

#[test]
fn test_search_and_category() {
    let registry = SettingsRegistry::new();
    registry.register_setting_extension(boolean_setting(OVERRIDES)).expect("register");
    registry.register_setting_extension(enum_setting("theme", "light")).expect("register");

    let by_tag = registry.search("INTERCEPT").expect("search");
    assert_eq!(by_tag.len(), 1);
    assert_eq!(by_tag[0].setting_name, OVERRIDES);
    assert_eq!(registry.search("theme").expect("search").len(), 1);
    assert!(registry.search("nothing").expect("search").is_empty());

    let persistence = registry.by_category(SettingCategory::Persistence).expect("category");
    assert_eq!(persistence.len(), 1);
    assert_eq!(
        persistence[0].option_title(&SettingValue::Bool(true)).as_deref(),
        Some("Enable override network requests")
    );
}

#[test]
fn test_store_write_through_and_reload() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");

    {
        let registry = SettingsRegistry::with_store(SettingsStore::new(&path).expect("store")).expect("registry");
        registry.register_setting_extension(boolean_setting(OVERRIDES)).expect("register");
        registry.set(OVERRIDES, SettingValue::Bool(true)).expect("set");
    }

    let persisted: ConfigData = ConfigFormat::read_file(&path).expect("read");
    assert_eq!(persisted.get::<bool>(OVERRIDES), Some(true));

    let registry = SettingsRegistry::with_store(SettingsStore::new(&path).expect("store")).expect("registry");
    registry.register_setting_extension(boolean_setting(OVERRIDES)).expect("register");
    assert!(registry.get_bool(OVERRIDES).expect("get"));

    registry.reset(OVERRIDES).expect("reset");
    let persisted: ConfigData = ConfigFormat::read_file(&path).expect("read");
    assert!(!persisted.keys().contains(&OVERRIDES.to_string()));
}

#[test]
fn test_invalid_persisted_value_is_ignored_and_unknown_keys_kept() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");
    std::fs::write(&path, format!(r#"{{ "{}": "yes", "otherExtension": 3 }}"#, OVERRIDES)).expect("write");

    let registry = SettingsRegistry::with_store(SettingsStore::new(&path).expect("store")).expect("registry");
    registry.register_setting_extension(boolean_setting(OVERRIDES)).expect("register");
    assert!(!registry.get_bool(OVERRIDES).expect("falls back to default"));

    registry.set(OVERRIDES, SettingValue::Bool(true)).expect("set");
    let persisted: ConfigData = ConfigFormat::read_file(&path).expect("read");
    assert_eq!(persisted.get::<f64>("otherExtension"), Some(3.0));
}

#[test]
fn test_failed_write_through_keeps_previous_value() {
    let dir = tempdir().expect("tempdir");
    // A plain file where the store expects its parent directory
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").expect("write blocker");
    let path = blocker.join("settings.json");

    let registry = SettingsRegistry::with_store(SettingsStore::new(&path).expect("store")).expect("registry");
    registry.register_setting_extension(boolean_setting(OVERRIDES)).expect("register");

    let err = registry.set(OVERRIDES, SettingValue::Bool(true)).unwrap_err();
    assert!(matches!(err, SettingsError::Store(_)));
    assert!(!registry.get_bool(OVERRIDES).expect("get"), "value not committed");

    let err = registry.reset(OVERRIDES).unwrap_err();
    assert!(matches!(err, SettingsError::Store(_)));
    assert!(!registry.get_bool(OVERRIDES).expect("get"));
}

#[test]
fn test_store_requires_known_format() {
    assert!(SettingsStore::new("settings.ini").is_err());
}
