use axum::{extract::State, http::HeaderMap, Json};
use serde_json::Value;

use crate::server::{error::ServerError, AppState};

/// Proxy the current user's profile, relaying the upstream JSON body
/// verbatim.
pub async fn get_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ServerError> {
    let token = super::authorized_token(&state, &headers).await?;

    let profile = state.spotify.get_current_user(&token).await.map_err(|e| {
        tracing::error!(error = %e, "Error fetching user");
        ServerError::upstream("Error fetching user info", e)
    })?;

    Ok(Json(profile))
}
