use super::*;
use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn from_lookup_defaults_when_nothing_is_set() {
    let cfg = UiConfig::from_lookup(|_| None).unwrap();
    assert_eq!(cfg, UiConfig::default());
    assert_eq!(cfg.event_channel, bridge::DEFAULT_EVENT_CHANNEL);
    assert!(!cfg.notify_failures);
    assert_eq!(cfg.toast_ms, DEFAULT_TOAST_MS);
    assert_eq!(cfg.log_level, log::Level::Info);
    assert_eq!(cfg.fallback_lang, "en");
}

#[test]
fn from_lookup_parses_overrides() {
    let cfg = UiConfig::from_lookup(lookup_from(&[
        ("BOOKSHELF_EVENT_CHANNEL", "custom://events"),
        ("BOOKSHELF_NOTIFY_FAILURES", "true"),
        ("BOOKSHELF_TOAST_MS", "1500"),
        ("BOOKSHELF_LOG_LEVEL", "DEBUG"),
        ("BOOKSHELF_FALLBACK_LANG", "DE"),
    ]))
    .unwrap();
    assert_eq!(cfg.event_channel, "custom://events");
    assert!(cfg.notify_failures);
    assert_eq!(cfg.toast_ms, 1500);
    assert_eq!(cfg.log_level, log::Level::Debug);
    assert_eq!(cfg.fallback_lang, "de");
}

#[test]
fn from_lookup_blank_channel_uses_default() {
    let cfg = UiConfig::from_lookup(lookup_from(&[("BOOKSHELF_EVENT_CHANNEL", "   ")])).unwrap();
    assert_eq!(cfg.event_channel, bridge::DEFAULT_EVENT_CHANNEL);
}

#[test]
fn from_lookup_invalid_toast_ms_falls_back() {
    let cfg = UiConfig::from_lookup(lookup_from(&[("BOOKSHELF_TOAST_MS", "soon")])).unwrap();
    assert_eq!(cfg.toast_ms, DEFAULT_TOAST_MS);
}

#[test]
fn from_lookup_rejects_unknown_log_level() {
    let err = UiConfig::from_lookup(lookup_from(&[("BOOKSHELF_LOG_LEVEL", "loud")])).unwrap_err();
    assert_eq!(err, ConfigError::LogLevel("loud".to_owned()));
}

#[test]
fn from_lookup_rejects_bad_boolean() {
    let err = UiConfig::from_lookup(lookup_from(&[("BOOKSHELF_NOTIFY_FAILURES", "maybe")])).unwrap_err();
    assert_eq!(err, ConfigError::Bool { key: "BOOKSHELF_NOTIFY_FAILURES", value: "maybe".to_owned() });
}

#[test]
fn from_lookup_rejects_long_fallback_lang() {
    let err = UiConfig::from_lookup(lookup_from(&[("BOOKSHELF_FALLBACK_LANG", "eng")])).unwrap_err();
    assert_eq!(err, ConfigError::FallbackLang("eng".to_owned()));
}
