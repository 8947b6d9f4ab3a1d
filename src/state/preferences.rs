//! The four host-persisted preferences and their store bundle.

#[cfg(test)]
#[path = "preferences_test.rs"]
mod preferences_test;

use bridge::commands;

use crate::net::gateway::{Gateway, RemoteResult};
use crate::state::setting::{SettingEntry, SettingStore};

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_THEME: &str = "light";

pub fn language_entry() -> SettingEntry<String> {
    SettingEntry {
        id: "language",
        default: DEFAULT_LANGUAGE.to_owned(),
        getter: commands::CURRENT_LANG,
        setter: commands::SET_LANG,
        arg: "lang",
        event: None,
    }
}

pub fn theme_entry() -> SettingEntry<String> {
    SettingEntry {
        id: "theme",
        default: DEFAULT_THEME.to_owned(),
        getter: commands::CURRENT_THEME,
        setter: commands::SET_THEME,
        arg: "theme",
        event: None,
    }
}

pub const MENU_EXPANDED: SettingEntry<bool> = SettingEntry {
    id: "menu-expanded",
    default: true,
    getter: commands::GET_MENU_EXPANDED,
    setter: commands::SET_MENU_EXPANDED,
    arg: "expanded",
    event: None,
};

pub const MENU_AUTO_EXPAND: SettingEntry<bool> = SettingEntry {
    id: "menu-auto-expand",
    default: false,
    getter: commands::GET_MENU_AUTO_EXPAND,
    setter: commands::SET_MENU_AUTO_EXPAND,
    arg: "autoExpand",
    event: None,
};

/// Side menu chrome: whether it is open and whether it opens by itself.
#[derive(Clone, Debug)]
pub struct MenuPreferences {
    pub expanded: SettingStore<bool>,
    pub auto_expand: SettingStore<bool>,
}

#[derive(Clone, Debug)]
pub struct Preferences {
    pub language: SettingStore<String>,
    pub theme: SettingStore<String>,
    pub menu: MenuPreferences,
}

impl Preferences {
    pub fn new(gateway: &Gateway) -> Self {
        Self {
            language: SettingStore::new(language_entry(), gateway.clone()),
            theme: SettingStore::new(theme_entry(), gateway.clone()),
            menu: MenuPreferences {
                expanded: SettingStore::new(MENU_EXPANDED, gateway.clone()),
                auto_expand: SettingStore::new(MENU_AUTO_EXPAND, gateway.clone()),
            },
        }
    }

    /// Reload every preference; one failure does not stop the others.
    ///
    /// # Errors
    ///
    /// The first failure encountered, after all reloads were attempted.
    pub async fn reload_all(&self) -> RemoteResult<()> {
        let outcomes = [
            self.language.reload().await,
            self.theme.reload().await,
            self.menu.expanded.reload().await,
            self.menu.auto_expand.reload().await,
        ];
        let failed = outcomes.iter().filter(|o| o.is_err()).count();
        if failed > 0 {
            log::warn!("{failed} of {} preferences failed to reload", outcomes.len());
        }
        outcomes.into_iter().collect::<RemoteResult<Vec<()>>>().map(|_| ())
    }

    /// Subscribe every preference that has a host push channel.
    ///
    /// # Errors
    ///
    /// The first registration failure, after all were attempted.
    pub async fn listen_all(&self) -> RemoteResult<()> {
        let outcomes = [
            self.language.listen().await,
            self.theme.listen().await,
            self.menu.expanded.listen().await,
            self.menu.auto_expand.listen().await,
        ];
        outcomes.into_iter().collect::<RemoteResult<Vec<()>>>().map(|_| ())
    }
}

impl MenuPreferences {
    /// # Errors
    ///
    /// The setter's failure; the menu keeps its state.
    pub async fn toggle_expanded(&self) -> RemoteResult<bool> {
        self.expanded.toggle().await
    }

    /// # Errors
    ///
    /// The setter's failure; the flag keeps its state.
    pub async fn toggle_auto_expand(&self) -> RemoteResult<bool> {
        self.auto_expand.toggle().await
    }
}
