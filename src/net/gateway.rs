//! Remote call gateway: the single chokepoint for host commands.
//!
//! Every command goes through [`Gateway`], which invokes the bridge, decodes
//! the result, and normalizes all failure shapes into [`RemoteError`] with a
//! machine-readable code and a human message.
//!
//! ERROR HANDLING
//! ==============
//! Failures are returned, never panicked. Each failure is logged with its
//! command and code; it is additionally forwarded to the [`Notifier`] when the
//! call (or the gateway default) asks for user-facing notification. Callers
//! that want to propagate a failure do so with `?` on the returned result.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::bridge::{Bridge, BridgeFailure};
use bridge::{ApiError, ErrorCode, commands};

/// Code reported when the bridge produced no structured error.
pub const TRANSPORT_ERROR_CODE: i64 = -1;
/// Code reported when a response did not match the expected type.
pub const DECODE_ERROR_CODE: i64 = -2;
/// Code reported when arguments could not be serialized.
pub const ENCODE_ERROR_CODE: i64 = -3;

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Normalized failure of a host command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    #[error("{message} (code {code})")]
    Backend { code: i64, message: String },
    #[error("bridge unavailable: {0}")]
    Transport(String),
    #[error("unexpected response to `{command}`: {reason}")]
    Decode { command: String, reason: String },
    #[error("could not encode arguments for `{command}`: {reason}")]
    Encode { command: String, reason: String },
}

impl RemoteError {
    pub fn code(&self) -> i64 {
        match self {
            Self::Backend { code, .. } => *code,
            Self::Transport(_) => TRANSPORT_ERROR_CODE,
            Self::Decode { .. } => DECODE_ERROR_CODE,
            Self::Encode { .. } => ENCODE_ERROR_CODE,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Backend { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Host error classification, for backend failures only.
    pub fn kind(&self) -> Option<ErrorCode> {
        match self {
            Self::Backend { code, .. } => Some(ErrorCode::from_code(*code)),
            _ => None,
        }
    }

    /// The user dismissed a native dialog; not worth a notification.
    pub fn is_user_abort(&self) -> bool {
        self.kind() == Some(ErrorCode::UserAborted)
    }
}

impl From<ApiError> for RemoteError {
    fn from(err: ApiError) -> Self {
        Self::Backend { code: err.code, message: err.error }
    }
}

impl From<BridgeFailure> for RemoteError {
    fn from(failure: BridgeFailure) -> Self {
        match failure {
            BridgeFailure::Api(err) => err.into(),
            BridgeFailure::Transport(message) => Self::Transport(message),
        }
    }
}

/// Sink for user-facing failure notifications.
pub trait Notifier: Send + Sync {
    fn notify_failure(&self, command: &str, error: &RemoteError);
}

/// Per-call behavior switches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallOptions {
    /// Forward a failure to the notifier in addition to logging it.
    pub notify: bool,
}

impl CallOptions {
    pub const fn notify() -> Self {
        Self { notify: true }
    }

    pub const fn quiet() -> Self {
        Self { notify: false }
    }
}

#[derive(Clone)]
pub struct Gateway {
    bridge: Arc<dyn Bridge>,
    notifier: Option<Arc<dyn Notifier>>,
    defaults: CallOptions,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("notifier", &self.notifier.is_some())
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

impl Gateway {
    pub fn new(bridge: Arc<dyn Bridge>) -> Self {
        Self { bridge, notifier: None, defaults: CallOptions::default() }
    }

    /// Attach a notifier; `notify_by_default` turns notification on for plain calls.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>, notify_by_default: bool) -> Self {
        self.notifier = Some(notifier);
        self.defaults = CallOptions { notify: notify_by_default };
        self
    }

    pub fn bridge(&self) -> &Arc<dyn Bridge> {
        &self.bridge
    }

    pub fn defaults(&self) -> CallOptions {
        self.defaults
    }

    /// Invoke a command that takes no arguments.
    ///
    /// # Errors
    ///
    /// Any [`RemoteError`]; the failure has already been logged.
    pub async fn call<T: DeserializeOwned>(&self, command: &str) -> RemoteResult<T> {
        self.call_with_options(command, None, self.defaults).await
    }

    /// Invoke a command with a serializable argument object.
    ///
    /// # Errors
    ///
    /// Any [`RemoteError`]; the failure has already been logged.
    pub async fn call_with_args<A, T>(&self, command: &str, args: &A) -> RemoteResult<T>
    where
        A: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = match serde_json::to_value(args) {
            Ok(payload) => payload,
            Err(e) => {
                let error = RemoteError::Encode { command: command.to_owned(), reason: e.to_string() };
                self.report(command, &error, self.defaults);
                return Err(error);
            }
        };
        self.call_with_options(command, Some(payload), self.defaults).await
    }

    /// Invoke a command with an optional raw payload and explicit options.
    ///
    /// # Errors
    ///
    /// Any [`RemoteError`]; the failure has already been logged.
    pub async fn call_with_options<T: DeserializeOwned>(
        &self,
        command: &str,
        args: Option<Value>,
        options: CallOptions,
    ) -> RemoteResult<T> {
        let args = args.unwrap_or_else(|| Value::Object(Map::new()));
        log::debug!("invoking `{command}`");
        let outcome = match self.bridge.invoke(command, args).await {
            Ok(value) => serde_json::from_value::<T>(value)
                .map_err(|e| RemoteError::Decode { command: command.to_owned(), reason: e.to_string() }),
            Err(failure) => Err(RemoteError::from(failure)),
        };
        if let Err(error) = &outcome {
            self.report(command, error, options);
        }
        outcome
    }

    /// Ask the host to shut down; sent on a window-close request.
    ///
    /// # Errors
    ///
    /// Any [`RemoteError`].
    pub async fn shutdown(&self) -> RemoteResult<()> {
        self.call(commands::SHUTDOWN).await
    }

    fn report(&self, command: &str, error: &RemoteError, options: CallOptions) {
        log::warn!("command `{command}` failed: code={} message={}", error.code(), error.message());
        if !options.notify || error.is_user_abort() {
            return;
        }
        if let Some(notifier) = &self.notifier {
            notifier.notify_failure(command, error);
        }
    }
}
