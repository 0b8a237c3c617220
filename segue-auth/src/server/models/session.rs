use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tokens obtained from a code exchange or a refresh grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

impl TokenPair {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Server-side session record. Created empty; populated with tokens
/// after a successful callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub tokens: Option<TokenPair>,
}
