use segue_api::{Client, SpotifyApiError};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn get_current_user_sends_bearer_token_and_relays_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("authorization", "Bearer token-a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "user-1",
            "display_name": "Test User",
            "product": "premium",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(server.uri());
    let profile = client.get_current_user("token-a").await.unwrap();

    assert_eq!(profile["id"], "user-1");
    assert_eq!(profile["display_name"], "Test User");
}

#[tokio::test]
async fn get_audio_features_hits_track_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/audio-features/11dFghVXANMlKmJXsNCbNl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "11dFghVXANMlKmJXsNCbNl",
            "tempo": 118.211,
            "energy": 0.842,
            "key": 5,
        })))
        .mount(&server)
        .await;

    let client = Client::new(server.uri());
    let features = client
        .get_audio_features("token-a", "11dFghVXANMlKmJXsNCbNl")
        .await
        .unwrap();

    assert_eq!(features["tempo"], 118.211);
}

#[tokio::test]
async fn upstream_error_surfaces_status_and_raw_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/audio-features/999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "status": 404, "message": "analysis not found" }
        })))
        .mount(&server)
        .await;

    let client = Client::new(server.uri());
    let err = client
        .get_audio_features("token-a", "999")
        .await
        .unwrap_err();

    match err {
        SpotifyApiError::Api(status, detail) => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(detail["error"]["message"], "analysis not found");
        }
        other => panic!("expected API error, got {other}"),
    }
}
