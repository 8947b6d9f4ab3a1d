//! Recently opened database files, as recorded by the host.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use bridge::{RemoveHistoryArgs, commands};

use crate::net::gateway::{Gateway, RemoteResult};
use crate::state::observable::{ObservableValue, Subscription};

#[derive(Clone, Debug)]
pub struct HistoryStore {
    gateway: Gateway,
    entries: ObservableValue<Vec<String>>,
}

impl HistoryStore {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway, entries: ObservableValue::new(Vec::new()) }
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.get()
    }

    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, listener: impl Fn(&Vec<String>) + Send + Sync + 'static) -> Subscription {
        self.entries.subscribe(listener)
    }

    pub fn observable(&self) -> &ObservableValue<Vec<String>> {
        &self.entries
    }

    /// # Errors
    ///
    /// The host's failure; the local list is left untouched.
    pub async fn reload(&self) -> RemoteResult<()> {
        let entries: Vec<String> = self.gateway.call(commands::GET_HISTORY).await?;
        self.entries.set(entries);
        Ok(())
    }

    /// Forget `path` on the host, then locally.
    ///
    /// # Errors
    ///
    /// The host's failure; the local list is left untouched.
    pub async fn remove(&self, path: &str) -> RemoteResult<()> {
        let args = RemoveHistoryArgs { path: path.to_owned() };
        self.gateway.call_with_args::<_, ()>(commands::REMOVE_HISTORY, &args).await?;
        self.entries.update(|entries| entries.retain(|p| p != path));
        Ok(())
    }
}
