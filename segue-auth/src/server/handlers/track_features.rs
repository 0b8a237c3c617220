use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde_json::Value;

use crate::server::{error::ServerError, AppState};

/// Proxy the audio features (BPM, key, energy, ...) for one track.
pub async fn track_features(
    State(state): State<AppState>,
    Path(track_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, ServerError> {
    let token = super::authorized_token(&state, &headers).await?;

    tracing::debug!(track_id = %track_id, "Fetching track features");

    let features = state
        .spotify
        .get_audio_features(&token, &track_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Error fetching track features");
            ServerError::upstream("Error fetching track features", e)
        })?;

    Ok(Json(features))
}
