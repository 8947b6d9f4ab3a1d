//! Context keys for shared client state, plus local menu chrome rules.
//!
//! DESIGN
//! ======
//! Every store is published under one of these keys in the root scope. Views
//! read them through `use_scope()`; a read before publication fails with the
//! key's token in the message.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use crate::config::UiConfig;
use crate::net::gateway::Gateway;
use crate::state::context::ContextKey;
use crate::state::databases::DatabaseStore;
use crate::state::history::HistoryStore;
use crate::state::preferences::MenuPreferences;
use crate::state::setting::SettingStore;
use crate::util::notify::ToastQueue;

pub const CONFIG: ContextKey<UiConfig> = ContextKey::new("config");
pub const GATEWAY: ContextKey<Gateway> = ContextKey::new("gateway");
pub const TOASTS: ContextKey<ToastQueue> = ContextKey::new("toasts");
pub const MENU: ContextKey<MenuPreferences> = ContextKey::new("menu");
pub const THEME: ContextKey<SettingStore<String>> = ContextKey::new("theme");
pub const LANGUAGE: ContextKey<SettingStore<String>> = ContextKey::new("language");
pub const DATABASES: ContextKey<DatabaseStore> = ContextKey::new("databases");
pub const HISTORY: ContextKey<HistoryStore> = ContextKey::new("history");

/// Whether the side menu is shown in full.
///
/// A collapsed menu opens while hovered when auto-expand is on.
pub fn menu_visible(expanded: bool, auto_expand: bool, hovered: bool) -> bool {
    expanded || (auto_expand && hovered)
}
