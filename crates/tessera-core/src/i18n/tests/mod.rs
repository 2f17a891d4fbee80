use std::collections::HashMap;
use std::sync::Arc;

use tempfile::tempdir;

use crate::i18n::{Catalog, I18n, I18nError, LocalizedString};

const NAMESPACE: &str = "models/test/test-meta";
const MESSAGES: &[(&str, &str)] = &[
    ("workspace", "Workspace"),
    ("showWorkspace", "Show Workspace"),
    ("network", "network"),
];

fn german_catalog() -> Catalog {
    let mut messages = HashMap::new();
    messages.insert("workspace".to_string(), "Arbeitsbereich".to_string());
    let mut catalog = HashMap::new();
    catalog.insert(NAMESPACE.to_string(), messages);
    catalog
}

#[test]
fn test_every_key_resolves_to_default_text() {
    let i18n = Arc::new(I18n::default());
    let strings = i18n.register_ui_strings(NAMESPACE, MESSAGES).expect("register");

    for (key, text) in MESSAGES {
        let lazy = strings.lazy(key).expect("bind");
        assert_eq!(lazy.key(), *key);
        assert_eq!(lazy.resolve(), *text);
        assert_eq!(lazy.to_string(), *text);
    }
    assert_eq!(strings.keys().len(), MESSAGES.len());
}

#[test]
fn test_unregister_frees_namespace() {
    let i18n = Arc::new(I18n::default());
    let strings = i18n.register_ui_strings(NAMESPACE, MESSAGES).expect("register");
    let bound = strings.lazy("workspace").expect("bind");

    assert!(i18n.unregister_ui_strings(NAMESPACE).expect("unregister"));
    assert!(!i18n.has_namespace(NAMESPACE));
    assert!(!i18n.unregister_ui_strings(NAMESPACE).expect("unregister"));
    assert_eq!(bound.resolve(), "Workspace");

    i18n.register_ui_strings(NAMESPACE, MESSAGES).expect("register again");
}

#[test]
fn test_unknown_key_fails_at_bind_time() {
    let i18n = Arc::new(I18n::default());
    let strings = i18n.register_ui_strings(NAMESPACE, MESSAGES).expect("register");

    let err = strings.lazy("missing").unwrap_err();
    assert!(matches!(
        err,
        I18nError::UnknownMessage { ref namespace, ref key } if namespace == NAMESPACE && key == "missing"
    ));
}

#[test]
fn test_duplicate_namespace_and_message_rejected() {
    let i18n = Arc::new(I18n::default());
    i18n.register_ui_strings(NAMESPACE, MESSAGES).expect("register");
    assert!(i18n.has_namespace(NAMESPACE));

    let err = i18n.register_ui_strings(NAMESPACE, MESSAGES).unwrap_err();
    assert!(matches!(err, I18nError::DuplicateNamespace(ref ns) if ns == NAMESPACE));

    let err = i18n
        .register_ui_strings("other", &[("a", "A"), ("a", "B")])
        .unwrap_err();
    assert!(matches!(err, I18nError::DuplicateMessage { ref key, .. } if key == "a"));
    assert!(!i18n.has_namespace("other"));
}

#[test]
fn test_lazy_string_follows_locale_switch() {
    let i18n = Arc::new(I18n::default());
    let strings = i18n.register_ui_strings(NAMESPACE, MESSAGES).expect("register");
    i18n.add_translations("de-DE", german_catalog()).expect("translations");

    // Bound before the switch, resolved after it
    let title = strings.lazy("workspace").expect("bind");
    let command = strings.lazy("showWorkspace").expect("bind");
    assert_eq!(title.resolve(), "Workspace");

    i18n.set_locale("de-DE").expect("locale");
    assert_eq!(i18n.locale(), "de-DE");
    assert_eq!(title.resolve(), "Arbeitsbereich");
    // No translation for this key, default text is used
    assert_eq!(command.resolve(), "Show Workspace");
}

#[test]
fn test_load_catalog_from_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("de.json");
    std::fs::write(
        &path,
        format!(r#"{{ "{}": {{ "network": "Netzwerk" }} }}"#, NAMESPACE),
    )
    .expect("write catalog");

    let i18n = Arc::new(I18n::new("de-DE"));
    let strings = i18n.register_ui_strings(NAMESPACE, MESSAGES).expect("register");
    i18n.load_catalog("de-DE", &path).expect("load");
    assert_eq!(strings.get("network").expect("get"), "Netzwerk");
}

#[test]
fn test_load_catalog_reports_locale() {
    let i18n = I18n::default();
    let err = i18n
        .load_catalog("fr-FR", std::path::Path::new("/nonexistent/fr.json"))
        .unwrap_err();
    assert!(matches!(err, I18nError::CatalogLoad { ref locale, .. } if locale == "fr-FR"));
}

#[test]
fn test_literal_string() {
    let literal = LocalizedString::literal("Plain");
    assert_eq!(literal.resolve(), "Plain");
    assert_eq!(literal.key(), "Plain");
}
