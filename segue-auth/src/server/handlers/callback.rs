use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};

use crate::server::{cookies, error::ServerError, models::CallbackParams, AppState};

/// OAuth redirect target. Verifies the anti-forgery state against the
/// cookie issued at `/login`, then exchanges the authorization code for
/// tokens and stores them in the caller's session.
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let stored_state = cookies::extract_cookie(&headers, cookies::STATE_COOKIE_NAME);

    // The state echoed by the authorization server must be exactly the
    // one we issued to this client. Anything else is a forged or stale
    // callback; no token exchange happens.
    match (&params.state, &stored_state) {
        (Some(received), Some(stored)) if received == stored => {}
        _ => {
            tracing::warn!("State mismatch on callback");
            return Err(ServerError::StateMismatch);
        }
    }

    // State is single-use: the cookie is cleared on every path from
    // here on, success or failure.
    let mut response_headers = HeaderMap::new();
    cookies::append_set_cookie(&mut response_headers, &cookies::clear_state_cookie());

    if let Some(error) = params.error {
        tracing::warn!(error = %error, "Authorization server reported an error");
        return Ok((
            response_headers,
            ServerError::TokenExchange(format!("Authorization failed: {}", error)),
        )
            .into_response());
    }

    let code = match params.code {
        Some(code) => code,
        None => {
            return Ok((
                response_headers,
                ServerError::BadRequest("Missing authorization code".to_string()),
            )
                .into_response())
        }
    };

    let tokens = match state.oauth_client.exchange_code_for_token(&code).await {
        Ok(tokens) => tokens,
        Err(err) => {
            tracing::error!(error = %err, "Error getting tokens");
            return Ok((response_headers, err).into_response());
        }
    };

    // Reuse the caller's session when the store still knows it,
    // otherwise start a fresh one.
    let session_id = cookies::extract_cookie(&headers, cookies::SESSION_COOKIE_NAME)
        .filter(|id| state.session_store.get_session(id).is_some())
        .unwrap_or_else(|| state.session_store.create_session());

    state.session_store.set_tokens(&session_id, tokens);

    tracing::info!(session_id = %session_id, "OAuth callback successful");

    cookies::append_set_cookie(
        &mut response_headers,
        &cookies::create_session_cookie(&session_id),
    );

    Ok((response_headers, Redirect::to("/get_user")).into_response())
}
