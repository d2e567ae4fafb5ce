//! Session store: the signed-in user's token, role and email, mirrored to
//! persistent storage under fixed keys.

pub mod storage;

use tracing::{info, warn};

use crate::models::session::{Role, Session};
use storage::{SessionStorage, StorageError};

pub const TOKEN_KEY: &str = "token";
pub const ROLE_KEY: &str = "role";
pub const EMAIL_KEY: &str = "email";

pub struct SessionStore {
    storage: Box<dyn SessionStorage>,
    session: Option<Session>,
}

impl SessionStore {
    pub fn new(storage: Box<dyn SessionStorage>) -> Self {
        Self {
            storage,
            session: None,
        }
    }

    /// Loads persisted credentials. Token and role must both be present for
    /// the session to count as authenticated; the token is not validated.
    pub fn restore(&mut self) -> bool {
        let read = |key: &str| match self.storage.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                warn!("Failed to read session key '{key}': {e}");
                None
            }
        };
        let token = read(TOKEN_KEY);
        let role = read(ROLE_KEY);
        let email = read(EMAIL_KEY);

        self.session = match (token, role.as_deref().and_then(Role::parse)) {
            (Some(token), Some(role)) => Some(Session {
                token,
                role,
                email: email.unwrap_or_default(),
            }),
            _ => None,
        };

        if let Some(session) = &self.session {
            info!("Restored session for '{}' ({})", session.email, session.role);
        }
        self.session.is_some()
    }

    /// Records a successful sign-in/sign-up. The in-memory session is set even
    /// if persisting it fails; the error is returned so the caller can report it.
    pub fn commit(&mut self, token: &str, role: Role, email: &str) -> Result<(), StorageError> {
        self.session = Some(Session {
            token: token.to_string(),
            role,
            email: email.to_string(),
        });
        info!("Session committed for '{email}' ({role})");
        self.storage.set_all(&[
            (TOKEN_KEY, token),
            (ROLE_KEY, role.as_str()),
            (EMAIL_KEY, email),
        ])
    }

    /// Signs out. The in-memory session is always dropped.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        if let Some(session) = self.session.take() {
            info!("Session cleared for '{}'", session.email);
        }
        self.storage.remove_all(&[TOKEN_KEY, ROLE_KEY, EMAIL_KEY])
    }

    pub fn current(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_recruiter(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_recruiter)
    }

    /// Persisted email of the signed-in user, if any.
    pub fn email(&self) -> Option<&str> {
        self.session
            .as_ref()
            .map(|s| s.email.as_str())
            .filter(|e| !e.is_empty())
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::storage::MemoryStorage;
    use super::*;

    fn store_with(entries: &[(&str, &str)]) -> (SessionStore, MemoryStorage) {
        let handle = MemoryStorage::with_entries(entries);
        (SessionStore::new(Box::new(handle.clone())), handle)
    }

    #[test]
    fn test_restore_requires_token_and_role() {
        let (mut store, _) = store_with(&[(TOKEN_KEY, "t"), (EMAIL_KEY, "a@b.io")]);
        assert!(!store.restore());
        assert!(!store.is_authenticated());

        let (mut store, _) = store_with(&[(TOKEN_KEY, "t"), (ROLE_KEY, "recruiter")]);
        assert!(store.restore());
        assert!(store.is_recruiter());
        assert_eq!(store.email(), None);
    }

    #[test]
    fn test_restore_rejects_unparseable_role() {
        let (mut store, _) = store_with(&[(TOKEN_KEY, "t"), (ROLE_KEY, "admin")]);
        assert!(!store.restore());
    }

    #[test]
    fn test_restore_accepts_any_token() {
        let (mut store, _) = store_with(&[
            (TOKEN_KEY, "definitely-expired"),
            (ROLE_KEY, "user"),
            (EMAIL_KEY, "u@x.io"),
        ]);
        assert!(store.restore());
        assert_eq!(store.token(), Some("definitely-expired"));
        assert_eq!(store.email(), Some("u@x.io"));
    }

    #[test]
    fn test_commit_persists_all_fields() {
        let (mut store, handle) = store_with(&[]);
        store.commit("tok-9", Role::Recruiter, "r@x.io").unwrap();

        assert!(store.is_authenticated());
        assert_eq!(handle.get(TOKEN_KEY).unwrap().as_deref(), Some("tok-9"));
        assert_eq!(handle.get(ROLE_KEY).unwrap().as_deref(), Some("recruiter"));
        assert_eq!(handle.get(EMAIL_KEY).unwrap().as_deref(), Some("r@x.io"));
    }

    #[test]
    fn test_clear_removes_all_fields() {
        let (mut store, handle) = store_with(&[]);
        store.commit("tok", Role::User, "u@x.io").unwrap();
        store.clear().unwrap();

        assert!(!store.is_authenticated());
        for key in [TOKEN_KEY, ROLE_KEY, EMAIL_KEY] {
            assert_eq!(handle.get(key).unwrap(), None, "{key} should be cleared");
        }
    }

    #[test]
    fn test_committed_session_survives_restore() {
        let (mut store, handle) = store_with(&[]);
        store.commit("tok", Role::User, "u@x.io").unwrap();

        let mut reloaded = SessionStore::new(Box::new(handle));
        assert!(reloaded.restore());
        assert_eq!(reloaded.current(), store.current());
    }
}
