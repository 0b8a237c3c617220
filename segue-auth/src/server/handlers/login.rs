use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};

use crate::server::{cookies, services::OAuthClient, AppState};

const STATE_LENGTH: usize = 16;

/// Start the authorization code flow: issue a fresh state token, park
/// it in a short-lived cookie, and send the browser to Spotify.
pub async fn login(State(state): State<AppState>) -> Response {
    let auth_state = OAuthClient::generate_state(STATE_LENGTH);
    let authorize_url = state.oauth_client.build_authorization_url(&auth_state);

    let mut headers = HeaderMap::new();
    cookies::append_set_cookie(&mut headers, &cookies::create_state_cookie(&auth_state));

    tracing::debug!("Redirecting to authorization endpoint");

    (headers, Redirect::to(&authorize_url)).into_response()
}
