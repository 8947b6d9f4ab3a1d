//! Composition root: builds every shared store around one gateway.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` creates a [`Services`] once, publishes it into the root scope, and
//! spawns [`Services::initialize`]. Tests build it over a fake bridge.

#[cfg(test)]
#[path = "services_test.rs"]
mod services_test;

use std::sync::Arc;

use crate::config::UiConfig;
use crate::net::bridge::Bridge;
use crate::net::events;
use crate::net::gateway::{Gateway, RemoteResult};
use crate::state::context::Scope;
use crate::state::databases::DatabaseStore;
use crate::state::history::HistoryStore;
use crate::state::preferences::Preferences;
use crate::state::ui;
use crate::util::notify::ToastQueue;

#[derive(Clone, Debug)]
pub struct Services {
    pub config: UiConfig,
    pub gateway: Gateway,
    pub toasts: ToastQueue,
    pub preferences: Preferences,
    pub databases: DatabaseStore,
    pub history: HistoryStore,
}

impl Services {
    pub fn new(bridge: Arc<dyn Bridge>, config: UiConfig) -> Self {
        let toasts = ToastQueue::new();
        let gateway = Gateway::new(bridge).with_notifier(Arc::new(toasts.clone()), config.notify_failures);
        Self {
            preferences: Preferences::new(&gateway),
            databases: DatabaseStore::new(gateway.clone()),
            history: HistoryStore::new(gateway.clone()),
            toasts,
            gateway,
            config,
        }
    }

    /// Register every store under its context key.
    pub fn publish(&self, scope: &Scope) {
        scope.publish(&ui::CONFIG, self.config.clone());
        scope.publish(&ui::GATEWAY, self.gateway.clone());
        scope.publish(&ui::TOASTS, self.toasts.clone());
        scope.publish(&ui::MENU, self.preferences.menu.clone());
        scope.publish(&ui::THEME, self.preferences.theme.clone());
        scope.publish(&ui::LANGUAGE, self.preferences.language.clone());
        scope.publish(&ui::DATABASES, self.databases.clone());
        scope.publish(&ui::HISTORY, self.history.clone());
    }

    /// Load host state and start listening for host events.
    ///
    /// Every step is attempted even if an earlier one failed.
    ///
    /// # Errors
    ///
    /// The first failure, in the order preference reloads, preference push
    /// channels, history, database event channel.
    pub async fn initialize(&self) -> RemoteResult<()> {
        let preferences = self.preferences.reload_all().await;
        let pushes = self.preferences.listen_all().await;
        let history = self.history.reload().await;
        let listen = events::subscribe(self.gateway.bridge(), &self.config.event_channel, self.databases.clone()).await;
        log::info!(
            "client initialized: language={} theme={}",
            self.preferences.language.current_value(),
            self.preferences.theme.current_value()
        );
        preferences.and(pushes).and(history).and(listen)
    }
}
