mod callback;
mod login;
mod track_features;
mod user;

pub use callback::callback;
pub use login::login;
pub use track_features::track_features;
pub use user::get_user;

use axum::http::HeaderMap;
use axum::response::Html;

use crate::server::{cookies, error::ServerError, AppState};

pub async fn index() -> Html<&'static str> {
    Html(r#"Welcome to Segue! <a href="/login">Login with Spotify</a>"#)
}

/// Resolve the caller's access token: session cookie → session → token
/// pair. Any gap in that chain means the caller is unauthenticated and
/// gets bounced back through `/login`. An expired access token is
/// refreshed (and written back to the session) before it is handed out.
pub(crate) async fn authorized_token(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<String, ServerError> {
    let session_id = cookies::extract_cookie(headers, cookies::SESSION_COOKIE_NAME)
        .ok_or(ServerError::Unauthenticated)?;

    let session = state
        .session_store
        .get_session(&session_id)
        .ok_or(ServerError::Unauthenticated)?;

    let tokens = session.tokens.ok_or(ServerError::Unauthenticated)?;

    if !tokens.is_expired() {
        return Ok(tokens.access_token);
    }

    tracing::debug!(session_id = %session_id, "Access token expired, refreshing");
    let refreshed = state
        .oauth_client
        .refresh_access_token(&tokens.refresh_token)
        .await?;

    let access_token = refreshed.access_token.clone();
    state.session_store.set_tokens(&session_id, refreshed);

    Ok(access_token)
}
