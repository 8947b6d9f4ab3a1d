//! Bridges observable stores into Leptos signals.

#[cfg(test)]
#[path = "reactive_test.rs"]
mod reactive_test;

use leptos::prelude::*;

use crate::state::observable::ObservableValue;

/// Read-only signal tracking `observable` for the lifetime of the current owner.
///
/// The subscription is released when the owner is cleaned up.
pub fn use_observable<T>(observable: &ObservableValue<T>) -> ReadSignal<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    let signal = RwSignal::new(observable.get());
    let subscription = observable.subscribe(move |value: &T| signal.set(value.clone()));
    on_cleanup(move || drop(subscription));
    signal.read_only()
}
