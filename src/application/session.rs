//! Session state: bearer token and current user id.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::error::Result;
use crate::port::outbound::token::TokenStore;

#[derive(Default)]
struct SessionState {
    token: Option<String>,
    user_id: Option<String>,
}

/// In-memory session backed by a durable [`TokenStore`].
///
/// The token is loaded from the store once, at construction. Reads are
/// served from memory; writes go to the store first so memory never holds a
/// token that was not persisted.
pub struct Session {
    store: Arc<dyn TokenStore>,
    state: RwLock<SessionState>,
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        let token = match store.load() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Failed to load stored session token");
                None
            }
        };
        debug!(authenticated = token.is_some(), "Session loaded");

        Self {
            store,
            state: RwLock::new(SessionState {
                token,
                user_id: None,
            }),
        }
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.state.read().token.clone()
    }

    #[must_use]
    pub fn user_id(&self) -> Option<String> {
        self.state.read().user_id.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.read().token.is_some()
    }

    /// Persist and adopt a new token.
    ///
    /// # Errors
    ///
    /// Returns the store error; the in-memory token is left unchanged.
    pub fn set_token(&self, token: &str) -> Result<()> {
        self.store.save(token)?;
        self.state.write().token = Some(token.to_string());
        Ok(())
    }

    pub fn set_user_id(&self, user_id: Option<String>) {
        self.state.write().user_id = user_id;
    }

    /// Forget the token and user id.
    ///
    /// Store failures are logged, not returned: the in-memory session is
    /// always cleared.
    pub fn clear(&self) {
        {
            let mut state = self.state.write();
            state.token = None;
            state.user_id = None;
        }
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear stored session token");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::token::MemoryTokenStore;
    use crate::error::Error;

    struct BrokenStore;

    impl TokenStore for BrokenStore {
        fn load(&self) -> Result<Option<String>> {
            Err(Error::Session("unreadable".into()))
        }

        fn save(&self, _token: &str) -> Result<()> {
            Err(Error::Session("read-only".into()))
        }

        fn clear(&self) -> Result<()> {
            Err(Error::Session("read-only".into()))
        }
    }

    #[test]
    fn loads_token_at_construction() {
        let session = Session::new(Arc::new(MemoryTokenStore::with_token("abc123")));
        assert_eq!(session.token().as_deref(), Some("abc123"));
        assert!(session.is_authenticated());
        assert_eq!(session.user_id(), None);
    }

    #[test]
    fn set_token_persists() {
        let store = Arc::new(MemoryTokenStore::new());
        let session = Session::new(store.clone());
        session.set_token("t-1").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("t-1"));
    }

    #[test]
    fn clear_forgets_token_and_user() {
        let store = Arc::new(MemoryTokenStore::with_token("t-1"));
        let session = Session::new(store.clone());
        session.set_user_id(Some("u-1".into()));

        session.clear();

        assert_eq!(session.token(), None);
        assert_eq!(session.user_id(), None);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn broken_store_degrades_gracefully() {
        let session = Session::new(Arc::new(BrokenStore));
        assert_eq!(session.token(), None);

        assert!(session.set_token("t-1").is_err());
        assert_eq!(session.token(), None);

        session.clear();
    }
}
