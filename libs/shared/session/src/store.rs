use std::sync::RwLock;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};

use shared_models::auth::{TokenPair, UserProfile};

use crate::backend::SessionBackend;
use crate::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user: UserProfile,
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Process-wide session state with an explicit lifecycle: `init` at startup,
/// `set` on login, `clear` on logout or corruption. Interested parties
/// subscribe to a watch channel instead of polling the backing store.
pub struct SessionStore {
    backend: Box<dyn SessionBackend>,
    current: RwLock<Option<Session>>,
    tx: watch::Sender<Option<Session>>,
}

impl SessionStore {
    pub fn new(backend: Box<dyn SessionBackend>) -> Self {
        let (tx, _) = watch::channel(None);
        Self {
            backend,
            current: RwLock::new(None),
            tx,
        }
    }

    /// Restores a previously persisted session. Any corruption (a `user`
    /// entry that does not parse as a profile) wipes all three keys and
    /// leaves the store logged out.
    pub fn init(&self) -> Result<Option<Session>, SessionError> {
        let access_token = self.backend.get(ACCESS_TOKEN_KEY)?;
        let refresh_token = self.backend.get(REFRESH_TOKEN_KEY)?;
        let raw_user = self.backend.get(USER_KEY)?;

        let session = match (access_token, raw_user) {
            (Some(access_token), Some(raw_user)) => {
                match serde_json::from_str::<UserProfile>(&raw_user) {
                    Ok(user) => Some(Session {
                        access_token,
                        refresh_token,
                        user,
                    }),
                    Err(err) => {
                        warn!("Stored user profile is corrupt ({}), clearing session", err);
                        self.remove_all()?;
                        None
                    }
                }
            }
            (Some(_), None) | (None, Some(_)) => {
                warn!("Partial session data found, clearing session");
                self.remove_all()?;
                None
            }
            (None, None) => None,
        };

        *self.current.write().unwrap() = session.clone();
        let _ = self.tx.send(session.clone());

        if session.is_some() {
            debug!("Session restored from storage");
        }

        Ok(session)
    }

    /// Persists and publishes a fresh session (login).
    pub fn set(&self, tokens: TokenPair, user: UserProfile) -> Result<Session, SessionError> {
        self.backend.set(ACCESS_TOKEN_KEY, &tokens.access)?;
        self.backend.set(REFRESH_TOKEN_KEY, &tokens.refresh)?;
        self.backend.set(USER_KEY, &serde_json::to_string(&user)?)?;

        let session = Session {
            access_token: tokens.access,
            refresh_token: Some(tokens.refresh),
            user,
        };

        *self.current.write().unwrap() = Some(session.clone());
        let _ = self.tx.send(Some(session.clone()));

        debug!("Session established for user {}", session.user.id);
        Ok(session)
    }

    /// Drops the session and removes every persisted key (logout).
    pub fn clear(&self) -> Result<(), SessionError> {
        self.remove_all()?;
        *self.current.write().unwrap() = None;
        let _ = self.tx.send(None);
        debug!("Session cleared");
        Ok(())
    }

    pub fn current(&self) -> Option<Session> {
        self.current.read().unwrap().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.read().unwrap().is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }

    fn remove_all(&self) -> Result<(), SessionError> {
        self.backend.remove(ACCESS_TOKEN_KEY)?;
        self.backend.remove(REFRESH_TOKEN_KEY)?;
        self.backend.remove(USER_KEY)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{FileBackend, MemoryBackend};
    use shared_models::auth::UserRole;
    use uuid::Uuid;

    fn test_user() -> UserProfile {
        UserProfile {
            id: Uuid::new_v4(),
            email: "owner@example.com".to_string(),
            name: "Test Owner".to_string(),
            role: UserRole::CattleOwner,
            phone_number: None,
            created_at: None,
        }
    }

    fn test_tokens() -> TokenPair {
        TokenPair {
            access: "access-abc".to_string(),
            refresh: "refresh-def".to_string(),
        }
    }

    #[test]
    fn init_with_empty_storage_is_logged_out() {
        let store = SessionStore::new(Box::new(MemoryBackend::new()));
        assert!(store.init().unwrap().is_none());
        assert!(!store.is_logged_in());
    }

    #[test]
    fn set_then_init_restores_session() {
        let backend = MemoryBackend::new();
        backend.set(ACCESS_TOKEN_KEY, "access-abc").unwrap();
        backend.set(REFRESH_TOKEN_KEY, "refresh-def").unwrap();
        backend
            .set(USER_KEY, &serde_json::to_string(&test_user()).unwrap())
            .unwrap();

        let store = SessionStore::new(Box::new(backend));
        let session = store.init().unwrap().expect("session restored");
        assert_eq!(session.access_token, "access-abc");
        assert_eq!(session.refresh_token.as_deref(), Some("refresh-def"));
    }

    #[test]
    fn corrupt_user_entry_wipes_all_keys() {
        let backend = MemoryBackend::new();
        backend.set(ACCESS_TOKEN_KEY, "access-abc").unwrap();
        backend.set(REFRESH_TOKEN_KEY, "refresh-def").unwrap();
        backend.set(USER_KEY, "not json at all").unwrap();

        let store = SessionStore::new(Box::new(backend));
        assert!(store.init().unwrap().is_none());
        assert!(!store.is_logged_in());

        // All three keys must be gone, not just the corrupt one.
        let store2 = store;
        assert!(store2.backend.get(ACCESS_TOKEN_KEY).unwrap().is_none());
        assert!(store2.backend.get(REFRESH_TOKEN_KEY).unwrap().is_none());
        assert!(store2.backend.get(USER_KEY).unwrap().is_none());
    }

    #[test]
    fn partial_session_is_treated_as_corrupt() {
        let backend = MemoryBackend::new();
        backend.set(ACCESS_TOKEN_KEY, "access-abc").unwrap();

        let store = SessionStore::new(Box::new(backend));
        assert!(store.init().unwrap().is_none());
        assert!(store.backend.get(ACCESS_TOKEN_KEY).unwrap().is_none());
    }

    #[tokio::test]
    async fn subscribers_observe_set_and_clear() {
        let store = SessionStore::new(Box::new(MemoryBackend::new()));
        let mut rx = store.subscribe();

        store.set(test_tokens(), test_user()).unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_some());

        store.clear().unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
    }

    #[test]
    fn file_backend_round_trips_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        {
            let store = SessionStore::new(Box::new(FileBackend::open(&path).unwrap()));
            store.set(test_tokens(), test_user()).unwrap();
        }

        let store = SessionStore::new(Box::new(FileBackend::open(&path).unwrap()));
        let session = store.init().unwrap().expect("session restored from disk");
        assert_eq!(session.access_token, "access-abc");
    }
}
