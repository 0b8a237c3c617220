use reqwest::StatusCode;
use serde_json::{Value, json};

#[derive(Debug)]
pub enum SpotifyApiError {
    /// Spotify answered with a non-success status. Carries the raw error
    /// body, normally `{"error": {"status": ..., "message": ...}}`.
    Api(StatusCode, Value),
    Http(reqwest::Error),
}

impl SpotifyApiError {
    pub(crate) fn from_error_body(status: StatusCode, body: &str) -> Self {
        let detail =
            serde_json::from_str(body).unwrap_or_else(|_| json!({ "message": body }));
        SpotifyApiError::Api(status, detail)
    }

    /// The upstream error payload, if Spotify produced one.
    pub fn detail(&self) -> Option<&Value> {
        match self {
            SpotifyApiError::Api(_, detail) => Some(detail),
            SpotifyApiError::Http(_) => None,
        }
    }
}

impl From<reqwest::Error> for SpotifyApiError {
    fn from(value: reqwest::Error) -> Self {
        SpotifyApiError::Http(value)
    }
}

impl std::fmt::Display for SpotifyApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpotifyApiError::Api(status, detail) => {
                write!(f, "({}) {}", status, detail)
            }
            SpotifyApiError::Http(e) => write!(f, "Transport error: {}", e),
        }
    }
}

impl std::error::Error for SpotifyApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_structured_error_body() {
        let err = SpotifyApiError::from_error_body(
            StatusCode::NOT_FOUND,
            r#"{"error":{"status":404,"message":"analysis not found"}}"#,
        );
        let detail = err.detail().unwrap();
        assert_eq!(detail["error"]["status"], 404);
        assert_eq!(detail["error"]["message"], "analysis not found");
    }

    #[test]
    fn wraps_non_json_error_body() {
        let err = SpotifyApiError::from_error_body(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(err.detail().unwrap()["message"], "upstream down");
    }
}
