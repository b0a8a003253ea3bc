use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;

use crate::{types::Token, utils};

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "trackscope_session";

/// Server-side sessions: session id -> access token.
///
/// Cloning is cheap; every clone shares the same table.
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<String, Token>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `token` under a fresh session id and returns the id.
    ///
    /// Sessions whose token has expired are dropped first, so the table only
    /// holds live sessions.
    pub async fn store(&self, token: Token) -> String {
        let id = utils::generate_session_id();
        let mut sessions = self.sessions.lock().await;
        sessions.retain(|_, stored| !stored.is_expired());
        sessions.insert(id.clone(), token);
        id
    }

    pub async fn remove(&self, session_id: &str) {
        self.sessions.lock().await.remove(session_id);
    }

    /// Returns the session's token if it exists and has not expired.
    /// Expired tokens are evicted.
    pub async fn valid_token(&self, session_id: &str) -> Option<Token> {
        let mut sessions = self.sessions.lock().await;
        match sessions.get(session_id) {
            Some(token) if !token.is_expired() => Some(token.clone()),
            Some(_) => {
                sessions.remove(session_id);
                None
            }
            None => None,
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
