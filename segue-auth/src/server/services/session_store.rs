use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::server::models::{Session, TokenPair};

/// In-memory session storage, keyed by the opaque id carried in the
/// session cookie. The store exclusively owns the token pairs; handlers
/// only ever see clones.
pub struct SessionStore {
    sessions: Arc<DashMap<String, Session>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_seconds: u64) -> Self {
        let store = Self {
            sessions: Arc::new(DashMap::new()),
            ttl: Duration::from_secs(ttl_seconds),
        };

        // Spawn background cleanup task
        let sessions_clone = store.sessions.clone();
        let ttl_clone = store.ttl;
        tokio::spawn(async move {
            cleanup_expired_sessions(sessions_clone, ttl_clone).await;
        });

        tracing::info!(
            "Session store initialized with TTL of {} seconds",
            ttl_seconds
        );
        store
    }

    /// Create a new, empty session and return its id.
    pub fn create_session(&self) -> String {
        let session_id = Uuid::new_v4().to_string();
        let session = Session {
            session_id: session_id.clone(),
            created_at: Utc::now(),
            tokens: None,
        };
        self.sessions.insert(session_id.clone(), session);
        tracing::debug!(session_id = %session_id, "Created session");
        session_id
    }

    /// Look up a session by id, cloning it out of the map.
    pub fn get_session(&self, session_id: &str) -> Option<Session> {
        self.sessions.get(session_id).map(|s| s.clone())
    }

    /// Apply an in-place update to a session, if it still exists.
    pub fn update_session<F>(&self, session_id: &str, update_fn: F) -> bool
    where
        F: FnOnce(&mut Session),
    {
        self.sessions
            .get_mut(session_id)
            .map(|mut s| {
                update_fn(&mut s);
                true
            })
            .unwrap_or(false)
    }

    /// Write a token pair into the session (callback success, or a
    /// later refresh overwriting the expired pair).
    pub fn set_tokens(&self, session_id: &str, tokens: TokenPair) -> bool {
        let result = self.update_session(session_id, |s| {
            s.tokens = Some(tokens);
        });
        if result {
            tracing::debug!("Session authenticated: {}", session_id);
        }
        result
    }

    /// Drop a session and the tokens it owns.
    pub fn delete_session(&self, session_id: &str) {
        self.sessions.remove(session_id);
        tracing::debug!("Session deleted: {}", session_id);
    }

    /// Number of live sessions, for monitoring.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

/// Background task that periodically cleans up expired sessions
async fn cleanup_expired_sessions(sessions: Arc<DashMap<String, Session>>, ttl: Duration) {
    let mut interval = tokio::time::interval(Duration::from_secs(60));
    loop {
        interval.tick().await;
        let now = Utc::now();
        let initial_count = sessions.len();

        sessions.retain(|session_id, session| {
            let age = now
                .signed_duration_since(session.created_at)
                .to_std()
                .unwrap_or(Duration::ZERO);

            if age >= ttl {
                tracing::debug!(
                    session_id = %session_id,
                    "Cleaning up expired session"
                );
                false
            } else {
                true
            }
        });

        let cleaned = initial_count.saturating_sub(sessions.len());
        if cleaned > 0 {
            tracing::info!(
                "Cleaned up {} expired sessions, {} remaining",
                cleaned,
                sessions.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, Utc};

    fn tokens(access: &str, refresh: &str) -> TokenPair {
        TokenPair {
            access_token: access.to_string(),
            refresh_token: refresh.to_string(),
            expires_at: Utc::now() + ChronoDuration::hours(1),
        }
    }

    #[tokio::test]
    async fn created_session_starts_without_tokens() {
        let store = SessionStore::new(600);
        let id = store.create_session();

        let session = store.get_session(&id).unwrap();
        assert!(session.tokens.is_none());
        assert_eq!(store.session_count(), 1);
    }

    #[tokio::test]
    async fn set_tokens_populates_the_session() {
        let store = SessionStore::new(600);
        let id = store.create_session();

        assert!(store.set_tokens(&id, tokens("A", "R")));

        let stored = store.get_session(&id).unwrap().tokens.unwrap();
        assert_eq!(stored.access_token, "A");
        assert_eq!(stored.refresh_token, "R");
    }

    #[tokio::test]
    async fn set_tokens_on_unknown_session_is_a_noop() {
        let store = SessionStore::new(600);
        assert!(!store.set_tokens("no-such-session", tokens("A", "R")));
        assert_eq!(store.session_count(), 0);
    }

    #[tokio::test]
    async fn delete_removes_the_session() {
        let store = SessionStore::new(600);
        let id = store.create_session();
        store.delete_session(&id);
        assert!(store.get_session(&id).is_none());
    }
}
