//! Transport seam between the client and the native host.
//!
//! The webview implementation lives in `net::tauri`; tests drive the same
//! trait through an in-memory double. Futures are local (`!Send`) because
//! the webview runs everything on one event loop.

#[cfg(test)]
#[path = "bridge_test.rs"]
mod bridge_test;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use serde_json::Value;

use bridge::ApiError;

/// Failure reported by a transport before any client-side interpretation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeFailure {
    /// The host rejected the command with its structured error.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The call never produced a structured answer (bridge missing, JS exception, ...).
    #[error("bridge transport failure: {0}")]
    Transport(String),
}

pub type BridgeFuture<T> = LocalBoxFuture<'static, Result<T, BridgeFailure>>;

/// Callback invoked with the raw payload of every event on a channel.
pub type EventHandler = Box<dyn Fn(Value) + Send + Sync>;

/// Request/response and publish/subscribe access to the host.
pub trait Bridge: Send + Sync {
    /// Invoke `command` with an argument object and resolve with its raw result.
    fn invoke(&self, command: &str, args: Value) -> BridgeFuture<Value>;

    /// Register `handler` for every event emitted on `channel`.
    ///
    /// The registration lasts for the lifetime of the application.
    fn listen(&self, channel: &str, handler: EventHandler) -> BridgeFuture<()>;
}

/// Bridge used when no host is attached, e.g. a native build of the views.
///
/// Every command fails with a transport error; listeners are accepted and
/// never called.
#[derive(Clone, Copy, Debug, Default)]
pub struct DetachedBridge;

impl Bridge for DetachedBridge {
    fn invoke(&self, command: &str, _args: Value) -> BridgeFuture<Value> {
        let failure = BridgeFailure::Transport(format!("no host attached to run `{command}`"));
        futures::future::ready(Err(failure)).boxed_local()
    }

    fn listen(&self, _channel: &str, _handler: EventHandler) -> BridgeFuture<()> {
        futures::future::ready(Ok(())).boxed_local()
    }
}
