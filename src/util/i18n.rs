//! Localized UI messages.
//!
//! Messages live in `locales/messages.json`, keyed first by two-letter
//! language code and then by message key. The file is parsed once per
//! process. A lookup falls back to the fallback language, then to the key.

#[cfg(test)]
#[path = "i18n_test.rs"]
mod i18n_test;

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::config::DEFAULT_FALLBACK_LANG;

const BUNDLED_MESSAGES: &str = include_str!("../../locales/messages.json");

static GLOBAL: OnceLock<Catalog> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("message catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("message catalog has no '{0}' section")]
    MissingFallback(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    messages: HashMap<String, HashMap<String, String>>,
    fallback: String,
}

impl Catalog {
    /// Parse a catalog; `fallback` must be one of its languages.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Parse`] for malformed JSON, [`CatalogError::MissingFallback`]
    /// when the fallback language has no section.
    pub fn from_json(text: &str, fallback: &str) -> Result<Self, CatalogError> {
        let messages: HashMap<String, HashMap<String, String>> = serde_json::from_str(text)?;
        let fallback = normalize_lang(fallback);
        if !messages.contains_key(&fallback) {
            return Err(CatalogError::MissingFallback(fallback));
        }
        Ok(Self { messages, fallback })
    }

    /// Catalog bundled into the binary.
    ///
    /// # Errors
    ///
    /// As [`Catalog::from_json`].
    pub fn bundled(fallback: &str) -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_MESSAGES, fallback)
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Language codes with a section, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut langs: Vec<&str> = self.messages.keys().map(String::as_str).collect();
        langs.sort_unstable();
        langs
    }

    /// Message for `key` in `lang`, else in the fallback language, else `key`.
    pub fn translate<'a>(&'a self, lang: &str, key: &'a str) -> &'a str {
        let lang = normalize_lang(lang);
        [lang.as_str(), self.fallback.as_str()]
            .into_iter()
            .find_map(|l| self.messages.get(l).and_then(|m| m.get(key)))
            .map_or(key, String::as_str)
    }
}

/// Reduce a language tag to its lowercase primary subtag: `"de-CH"` -> `"de"`.
pub fn normalize_lang(tag: &str) -> String {
    tag.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// Install the bundled catalog with `fallback` as the process-wide catalog.
///
/// Only the first call has an effect. A fallback without a section is
/// replaced by the default one.
pub fn init_global(fallback: &str) -> &'static Catalog {
    GLOBAL.get_or_init(|| load_bundled(fallback))
}

/// Process-wide catalog, installed with the default fallback if needed.
pub fn global() -> &'static Catalog {
    GLOBAL.get_or_init(|| load_bundled(DEFAULT_FALLBACK_LANG))
}

fn load_bundled(fallback: &str) -> Catalog {
    Catalog::bundled(fallback)
        .or_else(|e| {
            log::warn!("{e}; falling back to '{DEFAULT_FALLBACK_LANG}'");
            Catalog::bundled(DEFAULT_FALLBACK_LANG)
        })
        .unwrap_or_else(|e| {
            log::warn!("bundled messages unusable, showing keys: {e}");
            Catalog { messages: HashMap::new(), fallback: DEFAULT_FALLBACK_LANG.to_owned() }
        })
}

/// Translate with the process-wide catalog.
pub fn t(lang: &str, key: &str) -> String {
    global().translate(lang, key).to_owned()
}
