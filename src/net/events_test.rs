use super::*;
use crate::net::fake_bridge::FakeBridge;
use crate::net::gateway::Gateway;
use futures::executor::block_on;
use serde_json::json;

fn store() -> (Arc<FakeBridge>, DatabaseStore) {
    let bridge = FakeBridge::new();
    let store = DatabaseStore::new(Gateway::new(bridge.clone()));
    (bridge, store)
}

#[test]
fn current_db_payload_sets_active() {
    let (_bridge, store) = store();
    assert!(handle_event_payload(&json!({ "type": "CurrentDBChanged", "content": "a.db" }), &store));
    assert_eq!(store.active().as_deref(), Some("a.db"));
}

#[test]
fn open_db_payload_replaces_set() {
    let (_bridge, store) = store();
    let payload = json!({ "type": "OpenDBChanged", "content": ["a.db", "b.db"] });
    assert!(handle_event_payload(&payload, &store));
    assert_eq!(store.open(), vec!["a.db".to_owned(), "b.db".to_owned()]);
}

#[test]
fn malformed_payloads_are_ignored() {
    let (_bridge, store) = store();
    assert!(!handle_event_payload(&json!({ "content": "a.db" }), &store));
    assert!(!handle_event_payload(&json!({ "type": "Renamed", "content": "a.db" }), &store));
    assert!(!handle_event_payload(&json!({ "type": "OpenDBChanged", "content": "a.db" }), &store));
    assert!(!handle_event_payload(&json!("CurrentDBChanged"), &store));
    assert_eq!(store.snapshot(), crate::state::databases::BookDatabaseSet::default());
}

#[test]
fn subscribe_wires_channel_to_store() {
    let (bridge, store) = store();
    let dyn_bridge: Arc<dyn Bridge> = bridge.clone();
    block_on(subscribe(&dyn_bridge, "bookshelf://db-events", store.clone())).unwrap();
    assert_eq!(bridge.listener_count("bookshelf://db-events"), 1);

    bridge.emit("bookshelf://db-events", json!({ "type": "CurrentDBChanged", "content": "b.db" }));
    bridge.emit("bookshelf://db-events", json!({ "type": "bogus" }));

    assert_eq!(store.active().as_deref(), Some("b.db"));
}
