//! Theme table and the `data-theme` attribute on `<html>`.
//!
//! The host persists the selected theme id; this module only knows which ids
//! exist and how to show them. Applying a theme requires a browser
//! environment and is a no-op elsewhere.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeOption {
    pub id: &'static str,
    /// Message key of the display name.
    pub label_key: &'static str,
}

pub const THEMES: &[ThemeOption] = &[
    ThemeOption { id: "light", label_key: "theme.light" },
    ThemeOption { id: "dark", label_key: "theme.dark" },
];

/// Label key for `current`, or `None` when the id is not in `table`.
pub fn theme_label(current: &str, table: &[ThemeOption]) -> Option<&'static str> {
    table.iter().find(|t| t.id == current).map(|t| t.label_key)
}

/// Theme id actually applied: unknown ids fall back to the first entry.
pub fn resolve_theme<'a>(current: &'a str, table: &'a [ThemeOption]) -> &'a str {
    if table.iter().any(|t| t.id == current) {
        current
    } else {
        table.first().map_or(current, |t| t.id)
    }
}

/// Set the `data-theme` attribute on the `<html>` element.
pub fn apply_theme(id: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
            if let Some(el) = doc.document_element() {
                if el.set_attribute("data-theme", resolve_theme(id, THEMES)).is_err() {
                    log::warn!("could not apply theme `{id}`");
                }
            }
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = id;
    }
}
