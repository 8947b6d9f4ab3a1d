use super::*;

const MENU_OPEN: ContextKey<bool> = ContextKey::new("menu-open");
const THEME: ContextKey<String> = ContextKey::new("theme");
const THEME_AS_NUMBER: ContextKey<u8> = ContextKey::new("theme");

// =============================================================
// Not-initialized contract
// =============================================================

#[test]
fn read_before_publish_fails_with_token() {
    let root = Scope::root();
    let handle = root.read(&MENU_OPEN);
    let err = handle.value().unwrap_err();
    assert_eq!(err, ContextError::NotInitialized { token: "menu-open" });
    assert!(err.to_string().contains("menu-open"));
    assert!(!handle.is_initialized());
}

#[test]
fn reading_without_using_does_not_fail() {
    let root = Scope::root();
    let handle = root.read(&THEME);
    assert_eq!(handle.token(), "theme");
}

#[test]
#[should_panic(expected = "context `theme` is not initialized")]
fn expect_value_panics_when_unpublished() {
    let root = Scope::root();
    let _ = root.read(&THEME).expect_value();
}

#[test]
fn handle_resolves_lazily_after_later_publish() {
    let root = Scope::root();
    let handle = root.read(&THEME);
    assert!(handle.value().is_err());
    root.publish(&THEME, "dark".to_owned());
    assert_eq!(handle.value().unwrap(), "dark");
}

#[test]
fn handle_publish_binds_in_its_scope() {
    let root = Scope::root();
    let handle = root.read(&MENU_OPEN);
    handle.publish(true);
    assert!(root.read(&MENU_OPEN).expect_value());
    assert!(root.binds_locally(&MENU_OPEN));
}

#[test]
fn type_mismatch_is_reported() {
    let root = Scope::root();
    root.publish(&THEME, "dark".to_owned());
    let err = root.read(&THEME_AS_NUMBER).value().unwrap_err();
    assert_eq!(err, ContextError::TypeMismatch { token: "theme" });
}

// =============================================================
// Scope chain
// =============================================================

#[test]
fn descendants_see_ancestor_values() {
    let root = Scope::root();
    root.publish(&THEME, "light".to_owned());
    let grandchild = root.child().child();
    assert_eq!(grandchild.read(&THEME).value().unwrap(), "light");
    assert_eq!(grandchild.depth(), 2);
    assert!(!grandchild.binds_locally(&THEME));
}

#[test]
fn child_publish_shadows_without_mutating_ancestor() {
    let root = Scope::root();
    root.publish(&THEME, "light".to_owned());
    let child = root.child();
    child.publish(&THEME, "dark".to_owned());
    let sibling = root.child();

    assert_eq!(child.read(&THEME).value().unwrap(), "dark");
    assert_eq!(child.child().read(&THEME).value().unwrap(), "dark");
    assert_eq!(root.read(&THEME).value().unwrap(), "light");
    assert_eq!(sibling.read(&THEME).value().unwrap(), "light");
}

#[test]
fn ancestors_do_not_see_child_values() {
    let root = Scope::root();
    let child = root.child();
    child.publish(&MENU_OPEN, false);
    assert!(root.read(&MENU_OPEN).value().is_err());
}

#[test]
fn republish_replaces_binding_in_same_scope() {
    let root = Scope::root();
    root.publish(&MENU_OPEN, false);
    root.publish(&MENU_OPEN, true);
    assert!(root.read(&MENU_OPEN).expect_value());
}

#[test]
fn dropping_scope_releases_entries() {
    let payload = std::sync::Arc::new(());
    let key: ContextKey<std::sync::Arc<()>> = ContextKey::new("payload");
    let root = Scope::root();
    let child = root.child();
    child.publish(&key, std::sync::Arc::clone(&payload));
    assert_eq!(std::sync::Arc::strong_count(&payload), 2);
    drop(child);
    assert_eq!(std::sync::Arc::strong_count(&payload), 1);
}

#[test]
fn child_keeps_parent_alive() {
    let child = {
        let root = Scope::root();
        root.publish(&THEME, "dark".to_owned());
        root.child()
    };
    assert_eq!(child.read(&THEME).value().unwrap(), "dark");
}
