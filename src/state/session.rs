//! Authenticated-user session: profile, token, and `localStorage` persistence.
//!
//! VALIDATION POLICY
//! =================
//! Setters here are *lenient*: an input of the wrong JSON type logs a
//! diagnostic and leaves state unchanged instead of failing hard. Payloads
//! arrive straight from server envelopes as `serde_json::Value`, and a bad
//! profile must not take the whole UI down. Contrast with the toast layer,
//! which rejects an unknown severity with a hard error.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `localStorage` key holding the serialized session.
pub const STORAGE_KEY: &str = "userInfo";

/// The current user's profile and token.
///
/// `profile` is an arbitrary key-value map (whatever the login endpoint
/// returned); `token` is tracked separately so it survives profile resets.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    profile: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

impl Session {
    /// Replace the profile wholesale. Anything but a JSON object is rejected
    /// with a logged diagnostic, leaving the prior profile in place.
    pub fn set_user(&mut self, profile: Value) {
        match profile {
            Value::Object(map) => self.profile = map,
            other => {
                leptos::logging::error!(
                    "session: set_user expects an object, got {}",
                    json_kind(&other)
                );
            }
        }
    }

    /// The current profile. Empty map if no user is set.
    pub fn user(&self) -> &Map<String, Value> {
        &self.profile
    }

    /// Reset the profile to an empty map. The token is left in place; logout
    /// flows drop it separately via `set_token`.
    pub fn clear_user(&mut self) {
        self.profile = Map::new();
    }

    /// The current token, if one was ever set.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Replace the token. Anything but a JSON string is rejected with a
    /// logged diagnostic, leaving the prior token in place.
    pub fn set_token(&mut self, token: Value) {
        match token {
            Value::String(value) => self.token = Some(value),
            other => {
                leptos::logging::error!(
                    "session: set_token expects a string, got {}",
                    json_kind(&other)
                );
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Reactive handle to the session, shared via context.
///
/// Every mutation writes the whole session back to `localStorage`, so state
/// survives a page reload; `load` reads it back exactly once at startup.
#[derive(Clone, Copy)]
pub struct SessionStore(RwSignal<Session>);

impl SessionStore {
    /// Create the store from persisted state (empty session on the server or
    /// when nothing was stored).
    pub fn load() -> Self {
        #[cfg(feature = "hydrate")]
        let session = read_storage().unwrap_or_default();
        #[cfg(not(feature = "hydrate"))]
        let session = Session::default();

        Self(RwSignal::new(session))
    }

    pub fn set_user(&self, profile: Value) {
        self.0.update(|session| session.set_user(profile));
        self.persist();
    }

    pub fn user(&self) -> Map<String, Value> {
        self.0.with_untracked(|session| session.user().clone())
    }

    pub fn clear_user(&self) {
        self.0.update(Session::clear_user);
        self.persist();
    }

    pub fn token(&self) -> Option<String> {
        self.0
            .with_untracked(|session| session.token().map(ToOwned::to_owned))
    }

    pub fn set_token(&self, token: Value) {
        self.0.update(|session| session.set_token(token));
        self.persist();
    }

    fn persist(&self) {
        #[cfg(feature = "hydrate")]
        self.0.with_untracked(write_storage);
    }
}

/// Read the stored session from `localStorage`. Unreadable entries are
/// discarded rather than propagated.
#[cfg(feature = "hydrate")]
fn read_storage() -> Option<Session> {
    let window = web_sys::window()?;
    let storage = window.local_storage().ok()??;
    let raw = storage.get_item(STORAGE_KEY).ok()??;

    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(err) => {
            leptos::logging::warn!("session: discarding unreadable stored session: {err}");
            None
        }
    }
}

/// Write the session to `localStorage` under [`STORAGE_KEY`].
#[cfg(feature = "hydrate")]
fn write_storage(session: &Session) {
    let Ok(raw) = serde_json::to_string(session) else {
        return;
    };

    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(STORAGE_KEY, &raw);
        }
    }
}
