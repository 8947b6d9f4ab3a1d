use super::*;
use crate::net::fake_bridge::FakeBridge;
use crate::state::setting::LoadState;
use futures::executor::block_on;
use serde_json::{Value, json};

fn preferences() -> (std::sync::Arc<FakeBridge>, Preferences) {
    let bridge = FakeBridge::new();
    let prefs = Preferences::new(&Gateway::new(bridge.clone()));
    (bridge, prefs)
}

#[test]
fn defaults_before_first_reload() {
    let (_bridge, prefs) = preferences();
    assert_eq!(prefs.language.current_value(), "en");
    assert_eq!(prefs.theme.current_value(), "light");
    assert!(prefs.menu.expanded.current_value());
    assert!(!prefs.menu.auto_expand.current_value());
}

#[test]
fn entries_use_host_argument_names() {
    assert_eq!(language_entry().arg, "lang");
    assert_eq!(theme_entry().arg, "theme");
    assert_eq!(MENU_EXPANDED.arg, "expanded");
    assert_eq!(MENU_AUTO_EXPAND.arg, "autoExpand");
}

#[test]
fn reload_all_adopts_every_value() {
    let (bridge, prefs) = preferences();
    bridge.respond(commands::CURRENT_LANG, json!("de"));
    bridge.respond(commands::CURRENT_THEME, json!("dark"));
    bridge.respond(commands::GET_MENU_EXPANDED, json!(false));
    bridge.respond(commands::GET_MENU_AUTO_EXPAND, json!(true));

    block_on(prefs.reload_all()).unwrap();

    assert_eq!(prefs.language.current_value(), "de");
    assert_eq!(prefs.theme.current_value(), "dark");
    assert!(!prefs.menu.expanded.current_value());
    assert!(prefs.menu.auto_expand.current_value());
}

#[test]
fn reload_all_attempts_everything_and_returns_first_failure() {
    let (bridge, prefs) = preferences();
    bridge.reject(commands::CURRENT_LANG, 40, "lang unreadable");
    bridge.respond(commands::CURRENT_THEME, json!("dark"));
    bridge.reject(commands::GET_MENU_EXPANDED, 40, "menu unreadable");
    bridge.respond(commands::GET_MENU_AUTO_EXPAND, json!(true));

    let err = block_on(prefs.reload_all()).unwrap_err();

    assert_eq!(err.message(), "lang unreadable");
    assert_eq!(prefs.theme.current_value(), "dark");
    assert!(prefs.menu.auto_expand.current_value());
    assert_eq!(prefs.language.load_state(), LoadState::Uninitialized);
    assert_eq!(prefs.theme.load_state(), LoadState::Settled);
}

#[test]
fn menu_toggles_persist_inverse() {
    let (bridge, prefs) = preferences();
    bridge.respond(commands::SET_MENU_EXPANDED, Value::Null);
    bridge.respond(commands::SET_MENU_AUTO_EXPAND, Value::Null);

    assert!(!block_on(prefs.menu.toggle_expanded()).unwrap());
    assert!(block_on(prefs.menu.toggle_auto_expand()).unwrap());

    assert_eq!(bridge.calls_to(commands::SET_MENU_EXPANDED), vec![json!({ "expanded": false })]);
    assert_eq!(bridge.calls_to(commands::SET_MENU_AUTO_EXPAND), vec![json!({ "autoExpand": true })]);
}

#[test]
fn clones_share_state() {
    let (bridge, prefs) = preferences();
    bridge.respond(commands::SET_THEME, Value::Null);
    let copy = prefs.clone();
    block_on(copy.theme.set("dark".to_owned())).unwrap();
    assert_eq!(prefs.theme.current_value(), "dark");
}

#[test]
fn listen_all_without_channels_registers_nothing() {
    let (bridge, prefs) = preferences();
    block_on(prefs.listen_all()).unwrap();
    assert!(bridge.calls().is_empty());
}
