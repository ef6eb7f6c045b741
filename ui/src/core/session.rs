//! Name-only session backed by durable client storage.
//!
//! Identity is not verified: a stored display name is the whole session.
//! Launchers install one `Signal<Session>` at the root with
//! [`use_session_provider`]; everything else reads it through [`use_session`].

use dioxus::prelude::*;

use super::storage::{self, KeyValueStore};

/// Storage key holding the display name.
pub const SESSION_KEY: &str = "username";

pub struct Session {
    store: Box<dyn KeyValueStore>,
    username: Option<String>,
}

impl Session {
    /// Load whatever name a previous visit left behind.
    pub fn restore(store: Box<dyn KeyValueStore>) -> Self {
        let username = match store.get(SESSION_KEY) {
            Ok(value) => value.filter(|name| !name.trim().is_empty()),
            Err(err) => {
                tracing::warn!("could not read stored session: {err}");
                None
            }
        };
        Self { store, username }
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.username.is_some()
    }

    /// Returns `false` (and changes nothing) for blank input.
    pub fn login(&mut self, name: &str) -> bool {
        if name.trim().is_empty() {
            return false;
        }
        if let Err(err) = self.store.set(SESSION_KEY, name) {
            tracing::warn!("session name not persisted: {err}");
        }
        tracing::info!("session started");
        self.username = Some(name.to_string());
        true
    }

    pub fn logout(&mut self) {
        if let Err(err) = self.store.remove(SESSION_KEY) {
            tracing::warn!("stored session not cleared: {err}");
        }
        tracing::info!("session ended");
        self.username = None;
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Where a route guard should send the user, if anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    ToLogin,
    ToWorkspace,
}

/// Protected pages need a session; the login page is pointless with one.
pub fn route_guard(session_active: bool, on_login_page: bool) -> Option<Redirect> {
    match (session_active, on_login_page) {
        (false, false) => Some(Redirect::ToLogin),
        (true, true) => Some(Redirect::ToWorkspace),
        _ => None,
    }
}

/// Install the root session signal, restored from the platform store.
pub fn use_session_provider() -> Signal<Session> {
    use_context_provider(|| Signal::new(Session::restore(storage::platform_store())))
}

pub fn use_session() -> Signal<Session> {
    use_context::<Signal<Session>>()
}
