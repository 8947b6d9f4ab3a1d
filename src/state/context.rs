//! Scoped context registry for sharing state across a UI subtree.
//!
//! SYSTEM CONTEXT
//! ==============
//! The application root publishes its stores under typed tokens; nested views
//! read them through the scope chain instead of receiving them as props.
//! A child scope may republish a token to shadow the ancestor value for its
//! own subtree; the ancestor binding is never touched.
//!
//! ERROR HANDLING
//! ==============
//! Reading a token nobody published is a provider-ordering bug. The handle
//! returned by [`Scope::read`] resolves lazily and reports
//! [`ContextError::NotInitialized`] on access instead of inventing a default.

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, PoisonError};

/// Error raised when a context value is accessed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    #[error("context `{token}` is not initialized; publish it in an ancestor scope before reading")]
    NotInitialized { token: &'static str },
    #[error("context `{token}` is bound to a value of a different type")]
    TypeMismatch { token: &'static str },
}

/// Typed token identifying one kind of shared value.
pub struct ContextKey<T> {
    token: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ContextKey<T> {
    pub const fn new(token: &'static str) -> Self {
        Self { token, _marker: PhantomData }
    }

    pub const fn token(&self) -> &'static str {
        self.token
    }
}

impl<T> Clone for ContextKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ContextKey<T> {}

impl<T> fmt::Debug for ContextKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ContextKey").field(&self.token).finish()
    }
}

type Entry = Arc<dyn Any + Send + Sync>;

struct ScopeNode {
    parent: Option<Scope>,
    entries: Mutex<HashMap<&'static str, Entry>>,
}

/// One node of the UI scope tree.
///
/// Cloning a scope yields another handle to the same node. A child keeps its
/// parent alive; entries are dropped with the last handle to their scope.
#[derive(Clone)]
pub struct Scope {
    node: Arc<ScopeNode>,
}

impl Scope {
    /// A fresh scope with no ancestors.
    pub fn root() -> Self {
        Self { node: Arc::new(ScopeNode { parent: None, entries: Mutex::new(HashMap::new()) }) }
    }

    /// A new scope nested under this one.
    #[must_use]
    pub fn child(&self) -> Self {
        Self { node: Arc::new(ScopeNode { parent: Some(self.clone()), entries: Mutex::new(HashMap::new()) }) }
    }

    /// Bind `value` to `key` for this scope and all of its descendants.
    ///
    /// Publishing again in the same scope replaces the earlier binding.
    pub fn publish<T: Send + Sync + 'static>(&self, key: &ContextKey<T>, value: T) {
        let previous = self
            .node
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.token, Arc::new(value));
        if previous.is_some() {
            log::debug!("context `{}` republished in the same scope", key.token);
        }
    }

    /// Handle for `key` in this scope. Resolution happens when the value is used.
    pub fn read<T>(&self, key: &ContextKey<T>) -> ContextHandle<T> {
        ContextHandle { scope: self.clone(), key: *key }
    }

    /// Whether this scope itself (not an ancestor) binds `key`.
    #[cfg(test)]
    pub(crate) fn binds_locally<T>(&self, key: &ContextKey<T>) -> bool {
        self.node
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key.token)
    }

    /// Number of ancestors between this scope and the root.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.node.parent.as_ref();
        while let Some(scope) = current {
            depth += 1;
            current = scope.node.parent.as_ref();
        }
        depth
    }

    fn lookup(&self, token: &'static str) -> Option<Entry> {
        let mut current = Some(self);
        while let Some(scope) = current {
            let found = scope
                .node
                .entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .get(token)
                .cloned();
            if found.is_some() {
                return found;
            }
            current = scope.node.parent.as_ref();
        }
        None
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<&'static str> = self
            .node
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        f.debug_struct("Scope").field("depth", &self.depth()).field("tokens", &tokens).finish()
    }
}

/// Lazily bound access point for one context value.
pub struct ContextHandle<T> {
    scope: Scope,
    key: ContextKey<T>,
}

impl<T> Clone for ContextHandle<T> {
    fn clone(&self) -> Self {
        Self { scope: self.scope.clone(), key: self.key }
    }
}

impl<T> fmt::Debug for ContextHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextHandle").field("token", &self.key.token).finish()
    }
}

impl<T: Clone + Send + Sync + 'static> ContextHandle<T> {
    /// Resolve the nearest published value.
    ///
    /// # Errors
    ///
    /// [`ContextError::NotInitialized`] if no scope in the chain published the
    /// token, [`ContextError::TypeMismatch`] if it was published with another type.
    pub fn value(&self) -> Result<T, ContextError> {
        let token = self.key.token;
        let entry = self.scope.lookup(token).ok_or(ContextError::NotInitialized { token })?;
        entry
            .downcast_ref::<T>()
            .cloned()
            .ok_or(ContextError::TypeMismatch { token })
    }

    /// Resolve the nearest published value, failing fast if there is none.
    ///
    /// # Panics
    ///
    /// Panics with the [`ContextError`] message when the value cannot be
    /// resolved; an unpublished context is a provider-ordering bug.
    pub fn expect_value(&self) -> T {
        match self.value() {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }

    #[cfg(test)]
    pub(crate) fn is_initialized(&self) -> bool {
        self.value().is_ok()
    }

    /// Publish `value` into the scope this handle was read from.
    pub fn publish(&self, value: T) {
        self.scope.publish(&self.key, value);
    }

    pub fn token(&self) -> &'static str {
        self.key.token
    }
}

/// Store `scope` as the current scope for the Leptos owner subtree.
pub fn provide_scope(scope: Scope) {
    leptos::prelude::provide_context(scope);
}

/// Nearest scope provided by an ancestor component.
///
/// # Panics
///
/// Panics when no ancestor called [`provide_scope`].
pub fn use_scope() -> Scope {
    match leptos::prelude::use_context::<Scope>() {
        Some(scope) => scope,
        None => panic!("no context scope provided; mount views under the application root"),
    }
}
