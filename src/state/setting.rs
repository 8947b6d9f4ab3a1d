//! Observable store mirroring one host-held preference.
//!
//! DESIGN
//! ======
//! The local value only moves after the host confirms: `reload` adopts what
//! the getter returns, `set` commits after the setter succeeds, and a push
//! event is applied after it type-checks. A failed call leaves the value
//! where it was, so a control bound to the store snaps back on its own.
//!
//! Concurrent `set`/`reload` calls on the same store are not serialized; the
//! last one to resolve decides the local value. The load state is `Loading`
//! while any reload is in flight, then `Settled` once the host has confirmed a
//! value at least once, else `Uninitialized`.

#[cfg(test)]
#[path = "setting_test.rs"]
mod setting_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::net::gateway::{Gateway, RemoteError, RemoteResult};
use crate::state::observable::{ObservableValue, Subscription};

/// Static description of one setting and the commands that persist it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingEntry<T> {
    /// Stable identifier, e.g. `"menu-auto-expand"`.
    pub id: &'static str,
    /// Value used until the first successful reload.
    pub default: T,
    /// Command returning the persisted value.
    pub getter: &'static str,
    /// Command persisting a new value.
    pub setter: &'static str,
    /// Field name of the value in the setter's argument object.
    pub arg: &'static str,
    /// Push channel carrying out-of-band updates, if the host emits any.
    pub event: Option<&'static str>,
}

/// Lifecycle of a store's value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Still holding the default.
    #[default]
    Uninitialized,
    /// A reload is in flight.
    Loading,
    /// Holding a value confirmed by the host.
    Settled,
}

/// Serializes as `{ <key>: <value> }`.
struct SingleArg<'a, T> {
    key: &'static str,
    value: &'a T,
}

impl<T: Serialize> Serialize for SingleArg<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key, self.value)?;
        map.end()
    }
}

pub struct SettingStore<T> {
    entry: Arc<SettingEntry<T>>,
    gateway: Gateway,
    value: ObservableValue<T>,
    state: ObservableValue<LoadState>,
    lifecycle: Arc<Lifecycle>,
}

/// Bookkeeping behind [`LoadState`], shared by clones of a store.
#[derive(Debug, Default)]
struct Lifecycle {
    pending_reloads: AtomicUsize,
    settled_once: AtomicBool,
}

struct ReloadGuard<'a>(&'a Lifecycle);

impl Drop for ReloadGuard<'_> {
    fn drop(&mut self) {
        self.0.pending_reloads.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Lifecycle {
    /// Count a reload as in flight until the guard drops, even if its future is abandoned.
    fn begin_reload(&self) -> ReloadGuard<'_> {
        self.pending_reloads.fetch_add(1, Ordering::SeqCst);
        ReloadGuard(self)
    }

    fn confirm(&self) {
        self.settled_once.store(true, Ordering::SeqCst);
    }

    fn current(&self) -> LoadState {
        if self.pending_reloads.load(Ordering::SeqCst) > 0 {
            LoadState::Loading
        } else if self.settled_once.load(Ordering::SeqCst) {
            LoadState::Settled
        } else {
            LoadState::Uninitialized
        }
    }
}

impl<T> Clone for SettingStore<T> {
    fn clone(&self) -> Self {
        Self {
            entry: Arc::clone(&self.entry),
            gateway: self.gateway.clone(),
            value: self.value.clone(),
            state: self.state.clone(),
            lifecycle: Arc::clone(&self.lifecycle),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for SettingStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingStore")
            .field("id", &self.entry.id)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl<T> SettingStore<T>
where
    T: Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    pub fn new(entry: SettingEntry<T>, gateway: Gateway) -> Self {
        let value = ObservableValue::new(entry.default.clone());
        Self {
            entry: Arc::new(entry),
            gateway,
            value,
            state: ObservableValue::new(LoadState::Uninitialized),
            lifecycle: Arc::default(),
        }
    }

    pub fn id(&self) -> &'static str {
        self.entry.id
    }

    pub fn entry(&self) -> &SettingEntry<T> {
        &self.entry
    }

    /// Last value known locally.
    pub fn current_value(&self) -> T {
        self.value.get()
    }

    pub fn load_state(&self) -> LoadState {
        self.state.get()
    }

    /// Listen to the value: called now with the current value and after every change.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        self.value.subscribe(listener)
    }

    pub fn observable(&self) -> &ObservableValue<T> {
        &self.value
    }

    pub fn state_observable(&self) -> &ObservableValue<LoadState> {
        &self.state
    }

    fn publish_state(&self) {
        self.state.set(self.lifecycle.current());
    }

    /// Adopt the value the host currently holds.
    ///
    /// # Errors
    ///
    /// The getter's [`RemoteError`]; the local value is left untouched.
    pub async fn reload(&self) -> RemoteResult<()> {
        let in_flight = self.lifecycle.begin_reload();
        self.publish_state();
        let outcome = self.gateway.call::<T>(self.entry.getter).await;
        drop(in_flight);
        if let Ok(value) = &outcome {
            self.lifecycle.confirm();
            if self.value.set(value.clone()) {
                log::debug!("setting `{}` reloaded with a new value", self.entry.id);
            }
        }
        self.publish_state();
        outcome.map(|_| ())
    }

    /// Persist `value` and commit it locally once the host accepted it.
    ///
    /// # Errors
    ///
    /// The setter's [`RemoteError`]; the local value is left untouched.
    pub async fn set(&self, value: T) -> RemoteResult<()> {
        let args = SingleArg { key: self.entry.arg, value: &value };
        self.gateway.call_with_args::<_, ()>(self.entry.setter, &args).await?;
        if self.value.set(value) {
            log::debug!("setting `{}` updated", self.entry.id);
        }
        self.lifecycle.confirm();
        self.publish_state();
        Ok(())
    }

    /// Apply an out-of-band value pushed by the host.
    ///
    /// Payloads that do not decode as `T` are ignored. Returns `true` if the
    /// local value changed.
    pub fn apply_push(&self, payload: &Value) -> bool {
        match serde_json::from_value::<T>(payload.clone()) {
            Ok(value) => {
                let changed = self.value.set(value);
                self.lifecycle.confirm();
                self.publish_state();
                changed
            }
            Err(e) => {
                log::warn!("ignoring malformed push for setting `{}`: {e}", self.entry.id);
                false
            }
        }
    }

    /// Route the entry's push channel, if any, into [`SettingStore::apply_push`].
    ///
    /// # Errors
    ///
    /// The bridge failure if the subscription could not be registered.
    pub async fn listen(&self) -> RemoteResult<()> {
        let Some(channel) = self.entry.event else {
            return Ok(());
        };
        let store = self.clone();
        self.gateway
            .bridge()
            .listen(channel, Box::new(move |payload: Value| {
                store.apply_push(&payload);
            }))
            .await
            .map_err(|failure| {
                let error = RemoteError::from(failure);
                log::warn!("could not listen on `{channel}`: {error}");
                error
            })
    }
}

impl SettingStore<bool> {
    /// Persist the inverse of the current local value.
    ///
    /// Returns the new value on success.
    ///
    /// # Errors
    ///
    /// The setter's [`RemoteError`]; the local value is left untouched.
    pub async fn toggle(&self) -> RemoteResult<bool> {
        let next = !self.current_value();
        self.set(next).await?;
        Ok(next)
    }
}
