use super::*;
use crate::net::fake_bridge::FakeBridge;
use crate::state::context::ContextError;
use bridge::commands;
use futures::executor::block_on;
use serde_json::json;

fn script_startup(bridge: &FakeBridge) {
    bridge.respond(commands::CURRENT_LANG, json!("de"));
    bridge.respond(commands::CURRENT_THEME, json!("dark"));
    bridge.respond(commands::GET_MENU_EXPANDED, json!(true));
    bridge.respond(commands::GET_MENU_AUTO_EXPAND, json!(false));
    bridge.respond(commands::GET_HISTORY, json!(["/tmp/a.db"]));
}

#[test]
fn publish_registers_every_key() {
    let services = Services::new(FakeBridge::new(), UiConfig::default());
    let scope = Scope::root();
    services.publish(&scope);

    assert!(scope.read(&ui::GATEWAY).is_initialized());
    assert!(scope.read(&ui::TOASTS).is_initialized());
    assert!(scope.read(&ui::MENU).is_initialized());
    assert!(scope.read(&ui::THEME).is_initialized());
    assert!(scope.read(&ui::LANGUAGE).is_initialized());
    assert!(scope.read(&ui::DATABASES).is_initialized());
    assert!(scope.read(&ui::HISTORY).is_initialized());
    assert_eq!(scope.read(&ui::CONFIG).value().unwrap(), UiConfig::default());
}

#[test]
fn unpublished_scope_reports_missing_key() {
    let scope = Scope::root();
    let err = scope.read(&ui::DATABASES).value().unwrap_err();
    assert_eq!(err, ContextError::NotInitialized { token: "databases" });
}

#[test]
fn published_stores_share_state_with_services() {
    let bridge = FakeBridge::new();
    script_startup(&bridge);
    let services = Services::new(bridge, UiConfig::default());
    let scope = Scope::root();
    services.publish(&scope);

    block_on(services.initialize()).unwrap();

    let language = scope.read(&ui::LANGUAGE).value().unwrap();
    assert_eq!(language.current_value(), "de");
    let history = scope.read(&ui::HISTORY).value().unwrap();
    assert_eq!(history.entries(), vec!["/tmp/a.db".to_owned()]);
}

#[test]
fn initialize_subscribes_configured_channel() {
    let bridge = FakeBridge::new();
    script_startup(&bridge);
    let config = UiConfig { event_channel: "test://events".to_owned(), ..UiConfig::default() };
    let services = Services::new(bridge.clone(), config);

    block_on(services.initialize()).unwrap();
    bridge.emit("test://events", json!({ "type": "OpenDBChanged", "content": ["a.db"] }));

    assert_eq!(bridge.listener_count("test://events"), 1);
    assert_eq!(services.databases.open(), vec!["a.db".to_owned()]);
}

#[test]
fn initialize_continues_past_failures() {
    let bridge = FakeBridge::new();
    script_startup(&bridge);
    bridge.reject(commands::CURRENT_THEME, 40, "theme unreadable");
    let services = Services::new(bridge.clone(), UiConfig::default());

    let err = block_on(services.initialize()).unwrap_err();

    assert_eq!(err.message(), "theme unreadable");
    assert_eq!(services.history.entries().len(), 1);
    assert_eq!(bridge.listener_count(bridge::DEFAULT_EVENT_CHANNEL), 1);
}

#[test]
fn notify_failures_config_routes_errors_to_toasts() {
    let bridge = FakeBridge::new();
    bridge.reject(commands::SET_LANG, 42, "disk full");
    let config = UiConfig { notify_failures: true, ..UiConfig::default() };
    let services = Services::new(bridge, config);

    assert!(block_on(services.preferences.language.set("fr".to_owned())).is_err());

    let toasts = services.toasts.current();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].message, "disk full");
}

#[test]
fn failures_stay_silent_by_default() {
    let bridge = FakeBridge::new();
    bridge.reject(commands::SET_LANG, 42, "disk full");
    let services = Services::new(bridge, UiConfig::default());
    let _ = block_on(services.preferences.language.set("fr".to_owned()));
    assert!(services.toasts.current().is_empty());
}
