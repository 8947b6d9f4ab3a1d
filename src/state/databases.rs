//! Open book databases and the active one.
//!
//! DESIGN
//! ======
//! The host owns the set; this store mirrors it. It moves on three inputs:
//! a successful `set_current_db`, a successful `create_book_db`, and the
//! host's push events. `OpenDbChanged` replaces the open list wholesale and
//! clears the active database when it is no longer part of it, matching the
//! host dropping its current pool on removal. The active database is cleared
//! before the open list changes, so `open` listeners never see an active
//! database outside the new list.
//!
//! `CurrentDbChanged` may arrive before the `OpenDbChanged` that lists the
//! database; the store accepts it and the set is briefly inconsistent.

#[cfg(test)]
#[path = "databases_test.rs"]
mod databases_test;

use bridge::{BackendEvent, SetCurrentDbArgs, commands};

use crate::net::gateway::{Gateway, RemoteResult};
use crate::state::observable::{ObservableValue, Subscription};

/// Point-in-time copy of the database set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookDatabaseSet {
    pub open: Vec<String>,
    pub active: Option<String>,
}

impl BookDatabaseSet {
    pub fn contains(&self, db: &str) -> bool {
        self.open.iter().any(|d| d == db)
    }

    /// The active database, if any, is one of the open ones.
    pub fn is_consistent(&self) -> bool {
        self.active.as_deref().is_none_or(|db| self.contains(db))
    }
}

#[derive(Clone, Debug)]
pub struct DatabaseStore {
    gateway: Gateway,
    open: ObservableValue<Vec<String>>,
    active: ObservableValue<Option<String>>,
}

impl DatabaseStore {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway, open: ObservableValue::new(Vec::new()), active: ObservableValue::new(None) }
    }

    pub fn snapshot(&self) -> BookDatabaseSet {
        BookDatabaseSet { open: self.open.get(), active: self.active.get() }
    }

    pub fn open(&self) -> Vec<String> {
        self.open.get()
    }

    pub fn active(&self) -> Option<String> {
        self.active.get()
    }

    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe_open(&self, listener: impl Fn(&Vec<String>) + Send + Sync + 'static) -> Subscription {
        self.open.subscribe(listener)
    }

    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe_active(&self, listener: impl Fn(&Option<String>) + Send + Sync + 'static) -> Subscription {
        self.active.subscribe(listener)
    }

    pub fn open_observable(&self) -> &ObservableValue<Vec<String>> {
        &self.open
    }

    pub fn active_observable(&self) -> &ObservableValue<Option<String>> {
        &self.active
    }

    /// Make `db` the active database once the host accepted the switch.
    ///
    /// # Errors
    ///
    /// The host's failure, e.g. code 21 for an unknown database; the active
    /// database is left unchanged.
    pub async fn switch_to(&self, db: &str) -> RemoteResult<()> {
        let args = SetCurrentDbArgs { db: db.to_owned() };
        self.gateway.call_with_args::<_, ()>(commands::SET_CURRENT_DB, &args).await?;
        if self.active.set(Some(db.to_owned())) {
            log::debug!("active database switched to `{db}`");
        }
        Ok(())
    }

    /// Ask the host to create a database via its save dialog.
    ///
    /// Returns the new database key, which is added to the open set.
    ///
    /// # Errors
    ///
    /// The host's failure; code 1 when the user dismissed the dialog.
    pub async fn create(&self) -> RemoteResult<String> {
        let key: String = self.gateway.call(commands::CREATE_BOOK_DB).await?;
        self.open.update(|open| {
            if !open.contains(&key) {
                open.push(key.clone());
            }
        });
        log::debug!("created database `{key}`");
        Ok(key)
    }

    /// Apply one host push event. Returns `true` if anything changed.
    pub fn apply_event(&self, event: BackendEvent) -> bool {
        match event {
            BackendEvent::CurrentDbChanged(db) => {
                let changed = self.active.set(Some(db));
                if changed {
                    log::debug!("host changed the active database");
                    if !self.snapshot().is_consistent() {
                        log::debug!("active database is not in the open set yet");
                    }
                }
                changed
            }
            BackendEvent::OpenDbChanged(open) => {
                let active_still_open =
                    self.active.with(|active| active.as_ref().is_none_or(|db| open.contains(db)));
                let cleared = !active_still_open && self.active.set(None);
                if cleared {
                    log::debug!("active database is no longer open; cleared");
                }
                let changed = self.open.set(open);
                changed || cleared
            }
        }
    }
}
