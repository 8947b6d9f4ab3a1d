//! Host push events: decode, then apply to the database store.
//!
//! ERROR HANDLING
//! ==============
//! A payload that fails to decode is logged and dropped; it never reaches
//! the store and never interrupts the subscription.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::sync::Arc;

use serde_json::Value;

use super::bridge::Bridge;
use super::gateway::{RemoteError, RemoteResult};
use crate::state::databases::DatabaseStore;

/// Decode one raw payload and apply it. Returns `true` if the store changed.
pub fn handle_event_payload(payload: &Value, store: &DatabaseStore) -> bool {
    match bridge::decode_event(payload) {
        Ok(event) => store.apply_event(event),
        Err(e) => {
            log::warn!("ignoring host event: {e}");
            false
        }
    }
}

/// Route every payload on `channel` into `store` for the rest of the session.
///
/// # Errors
///
/// The bridge failure if the listener could not be registered.
pub async fn subscribe(bridge: &Arc<dyn Bridge>, channel: &str, store: DatabaseStore) -> RemoteResult<()> {
    bridge
        .listen(channel, Box::new(move |payload: Value| {
            handle_event_payload(&payload, &store);
        }))
        .await
        .map_err(RemoteError::from)?;
    log::debug!("listening for host events on `{channel}`");
    Ok(())
}
