use super::*;

#[test]
fn known_theme_has_label() {
    assert_eq!(theme_label("dark", THEMES), Some("theme.dark"));
    assert_eq!(theme_label("light", THEMES), Some("theme.light"));
}

#[test]
fn unknown_theme_has_no_label() {
    assert_eq!(theme_label("solarized", THEMES), None);
    assert_eq!(theme_label("dark", &[]), None);
}

#[test]
fn resolve_falls_back_to_first_entry() {
    assert_eq!(resolve_theme("dark", THEMES), "dark");
    assert_eq!(resolve_theme("solarized", THEMES), "light");
    assert_eq!(resolve_theme("solarized", &[]), "solarized");
}

#[cfg(not(feature = "csr"))]
#[test]
fn apply_is_noop_but_callable() {
    apply_theme("dark");
    apply_theme("light");
}
