//! Cookie plumbing for the handshake.
//!
//! Two cookies are in play: a short-lived anti-forgery state cookie set
//! at `/login` and checked once at `/callback`, and the opaque session
//! cookie that keys the server-side token store. Both are `HttpOnly`;
//! `SameSite=Lax` so they survive the top-level redirect back from the
//! authorization server.

use axum::http::{header, HeaderMap, HeaderValue};

/// Anti-forgery state, one per login attempt.
pub const STATE_COOKIE_NAME: &str = "spotify_auth_state";

/// State cookie max age in seconds. The authorization round trip should
/// take well under ten minutes.
pub const STATE_COOKIE_MAX_AGE: i64 = 600;

/// Opaque session identifier.
pub const SESSION_COOKIE_NAME: &str = "segue_session";

pub fn create_state_cookie(state: &str) -> String {
    format!(
        "{STATE_COOKIE_NAME}={state}; HttpOnly; SameSite=Lax; Path=/; Max-Age={STATE_COOKIE_MAX_AGE}"
    )
}

/// Expire the state cookie immediately (single-use enforcement).
pub fn clear_state_cookie() -> String {
    format!("{STATE_COOKIE_NAME}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0")
}

/// Browser-session cookie: no Max-Age, the server-side store enforces
/// its own TTL.
pub fn create_session_cookie(session_id: &str) -> String {
    format!("{SESSION_COOKIE_NAME}={session_id}; HttpOnly; SameSite=Lax; Path=/")
}

/// Look up a cookie by name in the request's `Cookie` header.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookie_header = headers.get(header::COOKIE)?;
    let cookie_str = cookie_header.to_str().ok()?;

    // "name1=value1; name2=value2"
    for part in cookie_str.split(';') {
        let part = part.trim();
        if let Some(value) = part.strip_prefix(&format!("{name}=")) {
            return Some(value.trim().to_string());
        }
    }

    None
}

/// Append a `Set-Cookie` header, preserving any already present.
pub fn append_set_cookie(headers: &mut HeaderMap, cookie: &str) {
    if let Ok(value) = HeaderValue::from_str(cookie) {
        headers.append(header::SET_COOKIE, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_headers(cookie_line: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie_line).unwrap());
        headers
    }

    #[test]
    fn extracts_named_cookie_among_many() {
        let headers = request_headers("foo=1; spotify_auth_state=AB12; segue_session=s-1");
        assert_eq!(
            extract_cookie(&headers, STATE_COOKIE_NAME).as_deref(),
            Some("AB12")
        );
        assert_eq!(
            extract_cookie(&headers, SESSION_COOKIE_NAME).as_deref(),
            Some("s-1")
        );
    }

    #[test]
    fn missing_cookie_is_none() {
        let headers = request_headers("foo=1");
        assert_eq!(extract_cookie(&headers, STATE_COOKIE_NAME), None);
        assert_eq!(extract_cookie(&HeaderMap::new(), STATE_COOKIE_NAME), None);
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        assert!(clear_state_cookie().contains("Max-Age=0"));
    }
}
