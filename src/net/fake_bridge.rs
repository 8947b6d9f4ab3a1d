//! In-memory [`Bridge`] for tests: scripted replies, call log, manual events.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use futures::FutureExt;
use futures::channel::oneshot;
use serde_json::Value;

use super::bridge::{Bridge, BridgeFailure, BridgeFuture, EventHandler};
use bridge::ApiError;

type Reply = Result<Value, BridgeFailure>;

#[derive(Default)]
pub(crate) struct FakeBridge {
    sticky: Mutex<HashMap<String, Reply>>,
    queued: Mutex<HashMap<String, VecDeque<Reply>>>,
    held: Mutex<HashMap<String, VecDeque<oneshot::Receiver<Reply>>>>,
    calls: Mutex<Vec<(String, Value)>>,
    handlers: Mutex<HashMap<String, Vec<Arc<EventHandler>>>>,
}

impl FakeBridge {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Reply to every call of `command` with `value`.
    pub(crate) fn respond(&self, command: &str, value: Value) {
        self.sticky.lock().unwrap().insert(command.to_owned(), Ok(value));
    }

    /// Reject every call of `command` with a structured host error.
    pub(crate) fn reject(&self, command: &str, code: i64, message: &str) {
        self.sticky
            .lock()
            .unwrap()
            .insert(command.to_owned(), Err(BridgeFailure::Api(ApiError::new(code, message))));
    }

    /// Reply to the next call of `command` only; takes precedence over sticky replies.
    pub(crate) fn respond_once(&self, command: &str, reply: Reply) {
        self.queued
            .lock()
            .unwrap()
            .entry(command.to_owned())
            .or_default()
            .push_back(reply);
    }

    /// Make the next call of `command` pend until the returned sender fires.
    pub(crate) fn hold(&self, command: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.held
            .lock()
            .unwrap()
            .entry(command.to_owned())
            .or_default()
            .push_back(rx);
        tx
    }

    pub(crate) fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn calls_to(&self, command: &str) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter(|(name, _)| name == command)
            .map(|(_, args)| args)
            .collect()
    }

    pub(crate) fn listener_count(&self, channel: &str) -> usize {
        self.handlers.lock().unwrap().get(channel).map_or(0, Vec::len)
    }

    /// Deliver `payload` to every handler on `channel`, synchronously.
    pub(crate) fn emit(&self, channel: &str, payload: Value) {
        let handlers = self.handlers.lock().unwrap().get(channel).cloned().unwrap_or_default();
        for handler in handlers {
            handler(payload.clone());
        }
    }

    fn next_reply(&self, command: &str) -> Reply {
        if let Some(reply) = self.queued.lock().unwrap().get_mut(command).and_then(VecDeque::pop_front) {
            return reply;
        }
        self.sticky
            .lock()
            .unwrap()
            .get(command)
            .cloned()
            .unwrap_or_else(|| Err(BridgeFailure::Transport(format!("no scripted reply for `{command}`"))))
    }
}

impl Bridge for FakeBridge {
    fn invoke(&self, command: &str, args: Value) -> BridgeFuture<Value> {
        self.calls.lock().unwrap().push((command.to_owned(), args));
        let held = self.held.lock().unwrap().get_mut(command).and_then(VecDeque::pop_front);
        if let Some(rx) = held {
            return async move {
                rx.await
                    .unwrap_or_else(|_| Err(BridgeFailure::Transport("held reply dropped".to_owned())))
            }
            .boxed_local();
        }
        futures::future::ready(self.next_reply(command)).boxed_local()
    }

    fn listen(&self, channel: &str, handler: EventHandler) -> BridgeFuture<()> {
        self.handlers
            .lock()
            .unwrap()
            .entry(channel.to_owned())
            .or_default()
            .push(Arc::new(handler));
        futures::future::ready(Ok(())).boxed_local()
    }
}
