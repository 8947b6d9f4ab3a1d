//! Observable value holder with scoped subscriptions.
//!
//! DESIGN
//! ======
//! A value plus an ordered listener list. Listeners run synchronously on the
//! caller of `set`, after the internal lock is released, so a listener may
//! read the value, subscribe, or unsubscribe without deadlocking.
//!
//! The lock only exists because Leptos context values and cleanup callbacks
//! must be `Send + Sync`; the webview itself is single-threaded.

#[cfg(test)]
#[path = "observable_test.rs"]
mod observable_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Inner<T> {
    value: T,
    listeners: Vec<(u64, Listener<T>)>,
    next_id: u64,
}

/// Shared, observable value. Clones share the same value and listeners.
pub struct ObservableValue<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for ObservableValue<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ObservableValue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = lock(&self.inner);
        f.debug_struct("ObservableValue")
            .field("value", &inner.value)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

fn lock<T>(inner: &Mutex<Inner<T>>) -> MutexGuard<'_, Inner<T>> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T> ObservableValue<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(value: T) -> Self {
        Self { inner: Arc::new(Mutex::new(Inner { value, listeners: Vec::new(), next_id: 0 })) }
    }

    /// Clone of the current value.
    pub fn get(&self) -> T {
        lock(&self.inner).value.clone()
    }

    /// Borrow the current value without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&lock(&self.inner).value)
    }

    /// Replace the value. Listeners are notified only when it changed.
    ///
    /// Returns `true` if the value changed.
    pub fn set(&self, value: T) -> bool {
        let notify = {
            let mut inner = lock(&self.inner);
            if inner.value == value {
                return false;
            }
            inner.value = value;
            (inner.value.clone(), listeners_of(&inner))
        };
        dispatch(&notify.0, &notify.1);
        true
    }

    /// Mutate the value in place. Listeners are notified only when it changed.
    pub fn update(&self, f: impl FnOnce(&mut T)) -> bool {
        let mut next = self.get();
        f(&mut next);
        self.set(next)
    }

    /// Register a listener. It is called immediately with the current value
    /// and again after every change until the returned guard is dropped or
    /// unsubscribed.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let listener: Listener<T> = Arc::new(listener);
        let (id, current) = {
            let mut inner = lock(&self.inner);
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, Arc::clone(&listener)));
            (id, inner.value.clone())
        };
        listener(&current);

        let weak: Weak<Mutex<Inner<T>>> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                lock(&inner).listeners.retain(|(lid, _)| *lid != id);
            }
        })
    }

    /// Number of live listeners.
    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner).listeners.len()
    }
}

fn listeners_of<T>(inner: &Inner<T>) -> Vec<Listener<T>> {
    inner.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
}

fn dispatch<T>(value: &T, listeners: &[Listener<T>]) {
    for listener in listeners {
        listener(value);
    }
}

/// Guard for a registered listener.
///
/// Dropping the guard removes the listener, so a view that is torn down on any
/// path (including a panic during mount) releases its subscriptions.
pub struct Subscription {
    remove: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    fn new(remove: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self { remove: Some(Box::new(remove)) }
    }

    /// Remove the listener. Calling this more than once is a no-op.
    pub fn unsubscribe(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }

    /// Whether the listener is still registered through this guard.
    pub fn is_active(&self) -> bool {
        self.remove.is_some()
    }

    /// Keep the listener for the lifetime of the observed value.
    pub fn detach(mut self) {
        self.remove = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("active", &self.is_active()).finish()
    }
}
