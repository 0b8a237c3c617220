use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// The `state` echoed to the callback did not match the value we
    /// issued. CSRF check failed; no token exchange was attempted.
    #[error("OAuth state mismatch")]
    StateMismatch,

    /// The authorization-code-for-token exchange failed. Terminal for
    /// this login attempt; no retry.
    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    /// No access token in the session. Recovered by restarting login.
    #[error("No authenticated session")]
    Unauthenticated,

    /// A proxied Spotify call failed; `details` carries the raw
    /// upstream error object.
    #[error("Upstream call failed: {context}")]
    Upstream { context: String, details: Value },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            ServerError::StateMismatch => Redirect::to("/#error=state_mismatch").into_response(),
            ServerError::Unauthenticated => Redirect::to("/login").into_response(),
            ServerError::TokenExchange(msg) => (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": msg })),
            )
                .into_response(),
            ServerError::Upstream { context, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": context, "details": details })),
            )
                .into_response(),
            ServerError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            ServerError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": msg })),
            )
                .into_response(),
        }
    }
}

impl
    From<
        oauth2::RequestTokenError<
            reqwest::Error,
            oauth2::StandardErrorResponse<oauth2::basic::BasicErrorResponseType>,
        >,
    > for ServerError
{
    fn from(
        err: oauth2::RequestTokenError<
            reqwest::Error,
            oauth2::StandardErrorResponse<oauth2::basic::BasicErrorResponseType>,
        >,
    ) -> Self {
        ServerError::TokenExchange(format!("Token request failed: {}", err))
    }
}

impl ServerError {
    pub fn upstream(context: impl Into<String>, err: segue_api::SpotifyApiError) -> Self {
        let details = err
            .detail()
            .cloned()
            .unwrap_or_else(|| json!({ "message": err.to_string() }));
        ServerError::Upstream {
            context: context.into(),
            details,
        }
    }
}
