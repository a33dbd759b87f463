//! In-process session store
//!
//! Maps opaque session tokens to user ids. Tokens live only as long as the
//! process; restarting the server logs everyone out, which is acceptable
//! for an internal tool.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "rosterd_session";

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<Uuid, i64>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for the given user, returning the opaque token.
    pub fn create(&self, user_id: i64) -> Uuid {
        let token = Uuid::new_v4();
        self.inner.lock().unwrap().insert(token, user_id);
        token
    }

    /// Resolve a token to its user id, if the session exists.
    pub fn user_id(&self, token: &Uuid) -> Option<i64> {
        self.inner.lock().unwrap().get(token).copied()
    }

    /// End a session. Unknown tokens are ignored.
    pub fn remove(&self, token: &Uuid) {
        self.inner.lock().unwrap().remove(token);
    }
}
