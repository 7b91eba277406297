//! Signed-in identity and its persistence.

use agora_shared::{Id, LoginResponse};
use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStore;

pub const TOKEN_KEY: &str = "token";
pub const USERNAME_KEY: &str = "username";
pub const USER_ID_KEY: &str = "userId";

/// The locally held identity and credential of the signed-in user.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: Id,
    pub username: String,
    pub auth_token: String,
}

impl From<LoginResponse> for Session {
    fn from(resp: LoginResponse) -> Self {
        Self {
            user_id: resp.user.id,
            username: resp.user.username,
            auth_token: resp.token,
        }
    }
}

/// Reads and writes the session under the `token`, `username` and `userId`
/// keys. A session only loads when all three are present and well formed.
#[derive(Debug, Clone, Default)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn get_session(&self) -> Option<Session> {
        let auth_token = self.storage.get(TOKEN_KEY)?;
        let username = self.storage.get(USERNAME_KEY)?;
        let user_id = self.storage.get(USER_ID_KEY)?.trim().parse().ok()?;
        if auth_token.is_empty() || username.is_empty() {
            return None;
        }
        Some(Session {
            user_id,
            username,
            auth_token,
        })
    }

    /// Persist a session. Returns `false` if any key failed to write, in
    /// which case nothing is left behind.
    pub fn set_session(&self, session: &Session) -> bool {
        let ok = self.storage.set(TOKEN_KEY, &session.auth_token)
            && self.storage.set(USERNAME_KEY, &session.username)
            && self.storage.set(USER_ID_KEY, &session.user_id.to_string());
        if !ok {
            crate::log_warn!("failed to persist session for {}", session.username);
            self.clear_session();
        }
        ok
    }

    pub fn clear_session(&self) {
        for key in [TOKEN_KEY, USERNAME_KEY, USER_ID_KEY] {
            self.storage.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn sample() -> Session {
        Session {
            user_id: 42,
            username: "ana".into(),
            auth_token: "tok".into(),
        }
    }

    #[test]
    fn persists_under_the_documented_keys() {
        let storage = MemoryStorage::new();
        let store = SessionStore::new(storage.clone());
        assert!(store.set_session(&sample()));

        assert_eq!(storage.get("token").as_deref(), Some("tok"));
        assert_eq!(storage.get("username").as_deref(), Some("ana"));
        assert_eq!(storage.get("userId").as_deref(), Some("42"));
        assert_eq!(store.get_session(), Some(sample()));
    }

    #[test]
    fn clear_removes_everything() {
        let storage = MemoryStorage::new();
        let store = SessionStore::new(storage.clone());
        store.set_session(&sample());
        store.clear_session();
        assert!(storage.is_empty());
        assert_eq!(store.get_session(), None);
    }

    #[test]
    fn partial_or_corrupt_state_is_no_session() {
        let storage = MemoryStorage::new();
        let store = SessionStore::new(storage.clone());
        storage.set("token", "tok");
        storage.set("username", "ana");
        assert_eq!(store.get_session(), None);

        storage.set("userId", "not-a-number");
        assert_eq!(store.get_session(), None);
    }

    #[test]
    fn session_from_login_response() {
        let resp: LoginResponse =
            serde_json::from_str(r#"{"user": {"id": "3", "username": "bob"}, "token": "t"}"#)
                .unwrap();
        let session = Session::from(resp);
        assert_eq!(session.user_id, 3);
        assert_eq!(session.auth_token, "t");
    }
}
