pub mod config;
pub mod cookies;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::Configuration;
pub use error::ServerError;

use axum::{routing::get, Router};
use services::{OAuthClient, SessionStore};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub session_store: Arc<SessionStore>,
    pub oauth_client: Arc<OAuthClient>,
    pub spotify: Arc<segue_api::Client>,
}

/// Assemble the full route table. Lives in the library so integration
/// tests can drive the router without binding a socket.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/login", get(handlers::login))
        .route("/callback", get(handlers::callback))
        .route("/get_user", get(handlers::get_user))
        .route("/track_features/{track_id}", get(handlers::track_features))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
