use chrono::Utc;
use oauth2::{
    basic::BasicClient, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, HttpRequest,
    HttpResponse, RedirectUrl, RefreshToken, Scope, TokenResponse, TokenUrl,
};
use rand::{distr::Alphanumeric, Rng};

use crate::server::config::OAuthConfiguration;
use crate::server::error::ServerError;
use crate::server::models::TokenPair;

// Simple async HTTP client for OAuth2
async fn http_client(request: HttpRequest) -> Result<HttpResponse, reqwest::Error> {
    let client = reqwest::Client::new();
    let mut builder = client
        .request(request.method().clone(), request.uri().to_string())
        .body(request.body().clone());

    for (name, value) in request.headers() {
        builder = builder.header(name.as_str(), value.as_bytes());
    }

    let response = builder.send().await?;
    let status = response.status();
    let body = response.bytes().await?.to_vec();

    let mut http_response = HttpResponse::new(body);
    *http_response.status_mut() = status;

    Ok(http_response)
}

/// Scopes requested at authorization time: private playlist read and
/// write, public playlist write, saved library read.
const SCOPES: [&str; 4] = [
    "playlist-read-private",
    "playlist-modify-private",
    "playlist-modify-public",
    "user-library-read",
];

pub struct OAuthClient {
    client_id: String,
    client_secret: String,
    auth_url: AuthUrl,
    token_url: TokenUrl,
    redirect_url: RedirectUrl,
}

impl OAuthClient {
    pub fn new(config: &OAuthConfiguration) -> Result<Self, ServerError> {
        let auth_url = AuthUrl::new(config.auth_url.clone())
            .map_err(|e| ServerError::Configuration(format!("Invalid auth URL: {}", e)))?;

        let token_url = TokenUrl::new(config.token_url.clone())
            .map_err(|e| ServerError::Configuration(format!("Invalid token URL: {}", e)))?;

        let redirect_url = RedirectUrl::new(config.redirect_uri.clone())
            .map_err(|e| ServerError::Configuration(format!("Invalid redirect URI: {}", e)))?;

        Ok(Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            auth_url,
            token_url,
            redirect_url,
        })
    }

    /// Build authorization URL with state parameter for CSRF protection
    pub fn build_authorization_url(&self, state: &str) -> String {
        let csrf_token = CsrfToken::new(state.to_string());
        let client = BasicClient::new(ClientId::new(self.client_id.clone()))
            .set_client_secret(ClientSecret::new(self.client_secret.clone()))
            .set_auth_uri(self.auth_url.clone())
            .set_token_uri(self.token_url.clone())
            .set_redirect_uri(self.redirect_url.clone());
        let mut request = client.authorize_url(|| csrf_token);

        for scope in SCOPES {
            request = request.add_scope(Scope::new(scope.to_string()));
        }

        let (auth_url, _) = request.url();
        auth_url.to_string()
    }

    /// Exchange authorization code for access and refresh tokens
    pub async fn exchange_code_for_token(&self, code: &str) -> Result<TokenPair, ServerError> {
        let token_result = BasicClient::new(ClientId::new(self.client_id.clone()))
            .set_client_secret(ClientSecret::new(self.client_secret.clone()))
            .set_auth_uri(self.auth_url.clone())
            .set_token_uri(self.token_url.clone())
            .set_redirect_uri(self.redirect_url.clone())
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&http_client)
            .await?;

        let pair = self.token_pair_from_response(token_result)?;
        if pair.refresh_token.is_empty() {
            return Err(ServerError::TokenExchange(
                "No refresh token in response".to_string(),
            ));
        }
        Ok(pair)
    }

    /// Refresh an expired access token using a refresh token
    pub async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenPair, ServerError> {
        let token_result = BasicClient::new(ClientId::new(self.client_id.clone()))
            .set_client_secret(ClientSecret::new(self.client_secret.clone()))
            .set_auth_uri(self.auth_url.clone())
            .set_token_uri(self.token_url.clone())
            .set_redirect_uri(self.redirect_url.clone())
            .exchange_refresh_token(&RefreshToken::new(refresh_token.to_string()))
            .request_async(&http_client)
            .await?;

        // Spotify may omit the refresh token on a refresh grant; the
        // previous one stays valid in that case.
        let mut pair = self.token_pair_from_response(token_result)?;
        if pair.refresh_token.is_empty() {
            pair.refresh_token = refresh_token.to_string();
        }
        Ok(pair)
    }

    fn token_pair_from_response(
        &self,
        token_result: oauth2::basic::BasicTokenResponse,
    ) -> Result<TokenPair, ServerError> {
        let access_token = token_result.access_token().secret().to_string();
        let refresh_token = token_result
            .refresh_token()
            .map(|t| t.secret().to_string())
            .unwrap_or_default();

        let expires_in = token_result
            .expires_in()
            .ok_or_else(|| ServerError::TokenExchange("No expiration time in response".to_string()))?;

        let expires_at = Utc::now() + expires_in;

        tracing::debug!(
            "Successfully obtained tokens, expires_at: {}",
            expires_at
        );

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_at,
        })
    }

    /// Generate a random alphanumeric state token of exactly `length`
    /// characters. Panics on `length == 0`.
    pub fn generate_state(length: usize) -> String {
        assert!(length > 0, "state length must be positive");
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(length)
            .map(char::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> OAuthConfiguration {
        OAuthConfiguration {
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            redirect_uri: "http://localhost:8888/callback".to_string(),
            auth_url: "https://accounts.spotify.com/authorize".to_string(),
            token_url: "https://accounts.spotify.com/api/token".to_string(),
        }
    }

    #[test]
    fn generated_state_has_requested_length_and_alphabet() {
        for length in [1, 16, 64] {
            let state = OAuthClient::generate_state(length);
            assert_eq!(state.len(), length);
            assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn generated_states_differ_between_calls() {
        assert_ne!(
            OAuthClient::generate_state(16),
            OAuthClient::generate_state(16)
        );
    }

    #[test]
    #[should_panic(expected = "state length must be positive")]
    fn zero_length_state_is_rejected() {
        OAuthClient::generate_state(0);
    }

    #[test]
    fn authorization_url_carries_state_and_scopes() {
        let client = OAuthClient::new(&test_config()).unwrap();
        let url = client.build_authorization_url("AB12");

        assert!(url.starts_with("https://accounts.spotify.com/authorize"));
        assert!(url.contains("state=AB12"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("playlist-read-private"));
        assert!(url.contains("playlist-modify-private"));
        assert!(url.contains("playlist-modify-public"));
        assert!(url.contains("user-library-read"));
    }
}
