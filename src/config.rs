//! Client configuration parsed from key/value lookups.
//!
//! Webview builds read the keys from the build-time environment because the
//! WASM module has no process environment of its own.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

pub const DEFAULT_TOAST_MS: u64 = 5_000;
pub const DEFAULT_LOG_LEVEL: log::Level = log::Level::Info;
pub const DEFAULT_FALLBACK_LANG: &str = "en";

/// Error returned when a configuration value cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown log level '{0}' (expected error, warn, info, debug or trace)")]
    LogLevel(String),
    #[error("invalid boolean '{value}' for {key}")]
    Bool { key: &'static str, value: String },
    #[error("fallback language must be a two-letter code, got '{0}'")]
    FallbackLang(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
    /// Push-event channel carrying database set changes.
    pub event_channel: String,
    /// Surface every failed backend call as a toast.
    pub notify_failures: bool,
    /// Toast lifetime before auto-dismiss.
    pub toast_ms: u64,
    pub log_level: log::Level,
    /// Language used when a message is missing in the active language.
    pub fallback_lang: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            event_channel: bridge::DEFAULT_EVENT_CHANNEL.to_owned(),
            notify_failures: false,
            toast_ms: DEFAULT_TOAST_MS,
            log_level: DEFAULT_LOG_LEVEL,
            fallback_lang: DEFAULT_FALLBACK_LANG.to_owned(),
        }
    }
}

impl UiConfig {
    /// Build typed config from a key lookup.
    ///
    /// Optional keys:
    /// - `BOOKSHELF_EVENT_CHANNEL`: default `bookshelf://db-events`
    /// - `BOOKSHELF_NOTIFY_FAILURES`: `true`/`false`, default `false`
    /// - `BOOKSHELF_TOAST_MS`: default 5000
    /// - `BOOKSHELF_LOG_LEVEL`: default `info`
    /// - `BOOKSHELF_FALLBACK_LANG`: default `en`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for unparseable log levels, booleans and
    /// fallback languages. Unparseable numbers fall back to their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let event_channel = lookup("BOOKSHELF_EVENT_CHANNEL")
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| bridge::DEFAULT_EVENT_CHANNEL.to_owned());
        let notify_failures = parse_bool("BOOKSHELF_NOTIFY_FAILURES", lookup("BOOKSHELF_NOTIFY_FAILURES").as_deref())?;
        let toast_ms = lookup("BOOKSHELF_TOAST_MS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TOAST_MS);
        let log_level = parse_log_level(lookup("BOOKSHELF_LOG_LEVEL").as_deref())?;
        let fallback_lang = parse_fallback_lang(lookup("BOOKSHELF_FALLBACK_LANG").as_deref())?;

        Ok(Self { event_channel, notify_failures, toast_ms, log_level, fallback_lang })
    }

    /// Build config from values captured at compile time.
    ///
    /// # Errors
    ///
    /// See [`UiConfig::from_lookup`].
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| {
            let value = match key {
                "BOOKSHELF_EVENT_CHANNEL" => option_env!("BOOKSHELF_EVENT_CHANNEL"),
                "BOOKSHELF_NOTIFY_FAILURES" => option_env!("BOOKSHELF_NOTIFY_FAILURES"),
                "BOOKSHELF_TOAST_MS" => option_env!("BOOKSHELF_TOAST_MS"),
                "BOOKSHELF_LOG_LEVEL" => option_env!("BOOKSHELF_LOG_LEVEL"),
                "BOOKSHELF_FALLBACK_LANG" => option_env!("BOOKSHELF_FALLBACK_LANG"),
                _ => None,
            };
            value.map(str::to_owned)
        })
    }
}

fn parse_bool(key: &'static str, raw: Option<&str>) -> Result<bool, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(false),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(ConfigError::Bool { key, value: other.to_owned() }),
    }
}

fn parse_log_level(raw: Option<&str>) -> Result<log::Level, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_LOG_LEVEL),
        Some(other) => log::Level::from_str(other).map_err(|_| ConfigError::LogLevel(other.to_owned())),
    }
}

fn parse_fallback_lang(raw: Option<&str>) -> Result<String, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_FALLBACK_LANG.to_owned()),
        Some(code) if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) => {
            Ok(code.to_ascii_lowercase())
        }
        Some(other) => Err(ConfigError::FallbackLang(other.to_owned())),
    }
}
