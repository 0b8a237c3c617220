mod error;

pub use crate::error::SpotifyApiError;

use serde_json::Value;

pub const BASE_URL: &str = "https://api.spotify.com/v1";

/// Client for the slice of the Spotify Web API this backend consumes.
///
/// Holds no credential state: the access token is a parameter of every
/// call, so one client instance can safely serve concurrent requests
/// from different sessions.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// The profile of the user the access token belongs to (`GET /me`).
    pub async fn get_current_user(&self, access_token: &str) -> Result<Value, SpotifyApiError> {
        self.get("/me", access_token).await
    }

    /// Audio features (tempo, key, energy, ...) for a single track
    /// (`GET /audio-features/{id}`).
    pub async fn get_audio_features(
        &self,
        access_token: &str,
        track_id: &str,
    ) -> Result<Value, SpotifyApiError> {
        self.get(&format!("/audio-features/{}", track_id), access_token)
            .await
    }

    async fn get(&self, path: &str, access_token: &str) -> Result<Value, SpotifyApiError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await?;
            Err(SpotifyApiError::from_error_body(status, &body))
        }
    }
}
