use super::*;

const SAMPLE: &str = r#"{
    "en": { "greeting": "Hello", "farewell": "Bye" },
    "de": { "greeting": "Hallo" }
}"#;

#[test]
fn normalize_lang_keeps_primary_subtag() {
    assert_eq!(normalize_lang("de-CH"), "de");
    assert_eq!(normalize_lang("EN_us"), "en");
    assert_eq!(normalize_lang(" fr "), "fr");
    assert_eq!(normalize_lang(""), "");
}

#[test]
fn translate_uses_requested_language() {
    let catalog = Catalog::from_json(SAMPLE, "en").unwrap();
    assert_eq!(catalog.translate("de", "greeting"), "Hallo");
    assert_eq!(catalog.translate("de-AT", "greeting"), "Hallo");
}

#[test]
fn translate_falls_back_to_fallback_then_key() {
    let catalog = Catalog::from_json(SAMPLE, "en").unwrap();
    assert_eq!(catalog.translate("de", "farewell"), "Bye");
    assert_eq!(catalog.translate("xx", "greeting"), "Hello");
    assert_eq!(catalog.translate("de", "missing.key"), "missing.key");
}

#[test]
fn missing_fallback_section_is_rejected() {
    let err = Catalog::from_json(SAMPLE, "it").unwrap_err();
    assert!(matches!(err, CatalogError::MissingFallback(ref l) if l == "it"));
}

#[test]
fn malformed_json_is_rejected() {
    assert!(matches!(Catalog::from_json("{ nope", "en"), Err(CatalogError::Parse(_))));
}

#[test]
fn languages_are_sorted() {
    let catalog = Catalog::from_json(SAMPLE, "en").unwrap();
    assert_eq!(catalog.languages(), vec!["de", "en"]);
}

#[test]
fn bundled_catalog_ships_english_and_german() {
    let catalog = Catalog::bundled("en").unwrap();
    assert_eq!(catalog.languages(), vec!["de", "en"]);
    assert_eq!(catalog.translate("de", "menu.settings"), "Einstellungen");
    assert_eq!(catalog.translate("de", "settings.current_theme"), "Aktuelles Farbschema");
    assert_eq!(catalog.translate("fr", "settings.loading"), "Loading settings...");
}

#[test]
fn global_translation_is_available() {
    assert_eq!(t("en", "app.title"), "Bookshelf");
}
