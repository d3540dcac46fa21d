//! Persisted session state.
//!
//! The browser keeps the session in its key-value storage under [`TOKEN_KEY`]
//! and [`ROLE_KEY`]. That storage can change out-of-band (another tab logs out),
//! so a [`Session`] is a snapshot read fresh from the store on every decision,
//! never cached.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use clinic_core::ValueObject;

use crate::Role;

pub const TOKEN_KEY: &str = "token";
pub const ROLE_KEY: &str = "role";

/// Client-side persisted key-value storage.
///
/// Each single read or write is atomic; no multi-key transactions exist.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

impl<T: SessionStore + ?Sized> SessionStore for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// In-process store (tests, console, non-browser hosts).
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    inner: Mutex<HashMap<String, String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A panic mid-write cannot leave a HashMap entry half-updated.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries().remove(key);
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Authenticated,
    Unauthenticated,
}

/// Snapshot of the persisted session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub role: Option<Role>,
}

impl ValueObject for Session {}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(token: impl Into<String>, role: Option<Role>) -> Self {
        Self {
            token: Some(token.into()),
            role,
        }
    }

    /// Read the current session from `store`.
    ///
    /// Empty values, and the literal strings `"undefined"`/`"null"` that a
    /// browser writes when handed a missing value, count as absent.
    pub fn load<S: SessionStore + ?Sized>(store: &S) -> Self {
        Self {
            token: read_present(store, TOKEN_KEY),
            role: read_present(store, ROLE_KEY).map(Role::new),
        }
    }

    pub fn state(&self) -> SessionState {
        if self.is_authenticated() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }
}

fn read_present<S: SessionStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    store
        .get(key)
        .filter(|v| !v.is_empty() && v != "undefined" && v != "null")
}
