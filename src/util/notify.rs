//! Non-blocking toast notifications.
//!
//! The gateway reports failures through the [`Notifier`] trait; [`ToastQueue`]
//! is the implementation the application uses. The `ToastStack` component
//! renders the queue and schedules auto-dismissal.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::net::gateway::{Notifier, RemoteError};
use crate::state::observable::{ObservableValue, Subscription};

/// Maximum toasts kept on screen; the oldest is dropped first.
pub const MAX_TOASTS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

#[derive(Clone)]
pub struct ToastQueue {
    toasts: ObservableValue<Vec<Toast>>,
    next_id: Arc<AtomicU64>,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ToastQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastQueue").field("toasts", &self.toasts.get()).finish()
    }
}

impl ToastQueue {
    pub fn new() -> Self {
        Self { toasts: ObservableValue::new(Vec::new()), next_id: Arc::new(AtomicU64::new(1)) }
    }

    /// Queue a toast and return its id.
    pub fn push(&self, level: ToastLevel, message: impl Into<String>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let toast = Toast { id, level, message: message.into() };
        self.toasts.update(|toasts| {
            toasts.push(toast);
            if toasts.len() > MAX_TOASTS {
                let overflow = toasts.len() - MAX_TOASTS;
                toasts.drain(..overflow);
            }
        });
        id
    }

    /// Remove a toast; unknown ids are ignored.
    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }

    pub fn current(&self) -> Vec<Toast> {
        self.toasts.get()
    }

    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, listener: impl Fn(&Vec<Toast>) + Send + Sync + 'static) -> Subscription {
        self.toasts.subscribe(listener)
    }

    pub fn observable(&self) -> &ObservableValue<Vec<Toast>> {
        &self.toasts
    }
}

/// Ids of toasts newer than `last_seen`, oldest first.
///
/// Toast ids only grow, so a consumer that remembers the highest id it has
/// handled can pick up exactly the new ones.
pub fn toasts_after(toasts: &[Toast], last_seen: u64) -> Vec<u64> {
    toasts.iter().map(|t| t.id).filter(|id| *id > last_seen).collect()
}

impl Notifier for ToastQueue {
    fn notify_failure(&self, command: &str, error: &RemoteError) {
        log::debug!("surfacing failure of `{command}` as toast");
        self.push(ToastLevel::Error, error.message());
    }
}
