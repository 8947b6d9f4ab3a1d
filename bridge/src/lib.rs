//! Shared wire schema for the backend command/event bridge.
//!
//! This crate owns the names and payload shapes exchanged with the native
//! host process: command identifiers, argument objects, the structured error
//! the backend returns, the book record, and the push-event envelope.
//! Payloads stay `serde_json::Value` at the transport seam so the client can
//! type-check them before applying anything to local state.


use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Backend command identifiers.
pub mod commands {
    pub const SET_CURRENT_DB: &str = "set_current_db";
    pub const GET_BOOK: &str = "get_book";
    pub const GET_HISTORY: &str = "get_history";
    pub const REMOVE_HISTORY: &str = "remove_history";
    pub const CURRENT_LANG: &str = "current_lang";
    pub const SET_LANG: &str = "set_lang";
    pub const CURRENT_THEME: &str = "current_theme";
    pub const SET_THEME: &str = "set_theme";
    pub const SET_MENU_EXPANDED: &str = "set_menu_expanded";
    pub const GET_MENU_EXPANDED: &str = "get_menu_expanded";
    pub const SET_MENU_AUTO_EXPAND: &str = "set_menu_auto_expand";
    pub const GET_MENU_AUTO_EXPAND: &str = "get_menu_auto_expand";
    pub const CREATE_BOOK_DB: &str = "create_book_db";
    pub const SHUTDOWN: &str = "shutdown";
}

/// Channel the backend emits database set changes on.
pub const DEFAULT_EVENT_CHANNEL: &str = "bookshelf://db-events";

/// Arguments for `set_current_db`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetCurrentDbArgs {
    pub db: String,
}

/// Arguments for `get_book`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetBookArgs {
    pub id: i64,
}

/// Arguments for `remove_history`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveHistoryArgs {
    pub path: String,
}

/// Structured error returned by every failing backend command.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("backend error {code}: {error}")]
pub struct ApiError {
    /// Human-readable message (may be a debug rendering of the backend error).
    #[serde(default)]
    pub error: String,
    /// Machine-readable error code.
    pub code: i64,
}

impl ApiError {
    #[must_use]
    pub fn new(code: i64, error: impl Into<String>) -> Self {
        Self { error: error.into(), code }
    }

    /// Classify the numeric code.
    #[must_use]
    pub fn kind(&self) -> ErrorCode {
        ErrorCode::from_code(self.code)
    }

    /// Parse a raw rejection value. Returns `None` when it does not carry a code.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

/// Error codes emitted by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    /// The user dismissed a native dialog.
    UserAborted,
    DatabaseAlreadyOpen,
    DatabaseNotFound,
    NoCurrentDatabase,
    ConversionFailed,
    BookGeneric,
    BookNotFound,
    BookDatabase,
    EmptyAuthors,
    Unknown(i64),
}

impl ErrorCode {
    #[must_use]
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::UserAborted,
            20 => Self::DatabaseAlreadyOpen,
            21 => Self::DatabaseNotFound,
            22 => Self::NoCurrentDatabase,
            23 => Self::ConversionFailed,
            40 => Self::BookGeneric,
            41 => Self::BookNotFound,
            42 => Self::BookDatabase,
            43 => Self::EmptyAuthors,
            other => Self::Unknown(other),
        }
    }

    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::UserAborted => 1,
            Self::DatabaseAlreadyOpen => 20,
            Self::DatabaseNotFound => 21,
            Self::NoCurrentDatabase => 22,
            Self::ConversionFailed => 23,
            Self::BookGeneric => 40,
            Self::BookNotFound => 41,
            Self::BookDatabase => 42,
            Self::EmptyAuthors => 43,
            Self::Unknown(code) => code,
        }
    }
}

/// A catalogued book as returned by `get_book`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub sub_title: Option<String>,
    pub authors: Vec<String>,
    pub isbn: String,
    pub lang: String,
    pub description: Option<String>,
    pub publisher: Option<String>,
    pub tags: Option<Vec<String>>,
    /// RFC 3339 timestamp.
    pub created: Option<String>,
    /// RFC 3339 timestamp.
    pub updated: Option<String>,
}

/// Push notification about the set of open book databases.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum BackendEvent {
    /// The active database changed; carries its identifier.
    #[serde(rename = "CurrentDBChanged")]
    CurrentDbChanged(String),
    /// The set of open databases changed; carries the complete new set.
    #[serde(rename = "OpenDBChanged")]
    OpenDbChanged(Vec<String>),
}

/// Error returned by [`decode_event`].
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// The payload is not an object with a string `type` field.
    #[error("event payload has no `type` tag")]
    MissingTag,
    /// The `type` tag names an event this client does not know.
    #[error("unknown event type: {0}")]
    UnknownType(String),
    /// The tag is known but `content` has the wrong shape.
    #[error("malformed `{kind}` event: {source}")]
    Malformed {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}

const KNOWN_EVENT_TYPES: [&str; 2] = ["CurrentDBChanged", "OpenDBChanged"];

/// Decode a raw push payload into a typed event.
///
/// # Errors
///
/// Returns [`EventError::MissingTag`] when there is no string `type`,
/// [`EventError::UnknownType`] for unrecognised tags, and
/// [`EventError::Malformed`] when `content` does not match the tag.
pub fn decode_event(payload: &Value) -> Result<BackendEvent, EventError> {
    let kind = payload
        .get("type")
        .and_then(Value::as_str)
        .ok_or(EventError::MissingTag)?;
    if !KNOWN_EVENT_TYPES.contains(&kind) {
        return Err(EventError::UnknownType(kind.to_owned()));
    }
    serde_json::from_value(payload.clone()).map_err(|source| EventError::Malformed { kind: kind.to_owned(), source })
}
