//! Session context: the signed-in identity, persisted through `agora-core`.
//!
//! Views never touch storage directly; they read and write the session
//! through [`SessionContext`].

use agora_core::{ApiClient, ClientConfig, PlatformStorage, Session, SessionStore};
use dioxus::prelude::*;

/// Session context provided to the app
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub session: Signal<Option<Session>>,
    config: Signal<ClientConfig>,
}

fn store() -> SessionStore<PlatformStorage> {
    SessionStore::new(PlatformStorage)
}

/// Provider component that loads the stored session and sets up the context
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let session = use_signal(|| store().get_session());
    let config = use_signal(ClientConfig::from_env);

    use_context_provider(|| SessionContext { session, config });

    children
}

impl SessionContext {
    pub fn get_session(&self) -> Option<Session> {
        self.session.read().clone()
    }

    /// Persist a freshly issued session and make it current.
    pub fn set_session(&mut self, session: Session) {
        if !store().set_session(&session) {
            crate::log_warn!("session for {} will not survive a reload", session.username);
        }
        self.session.set(Some(session));
    }

    /// Logout: forget the session everywhere.
    pub fn clear_session(&mut self) {
        store().clear_session();
        self.session.set(None);
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_some()
    }

    pub fn user_id(&self) -> Option<agora_shared::Id> {
        self.session.read().as_ref().map(|s| s.user_id)
    }

    pub fn username(&self) -> Option<String> {
        self.session.read().as_ref().map(|s| s.username.clone())
    }

    pub fn config(&self) -> ClientConfig {
        self.config.read().clone()
    }

    /// Create an API client carrying the current session's token
    pub fn api(&self) -> ApiClient {
        ApiClient::new(&self.config.read()).with_session(self.session.read().as_ref())
    }
}
