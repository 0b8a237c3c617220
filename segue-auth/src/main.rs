use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use segue_auth::server::{
    self,
    config::Configuration,
    services::{OAuthClient, SessionStore},
    AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false),
        )
        .init();

    // Load configuration; fails fast on missing OAuth credentials
    let configuration = Configuration::new()?;
    tracing::info!("Configuration loaded successfully");

    // Initialize services
    let session_store = Arc::new(SessionStore::new(configuration.server.session_ttl_seconds));
    let oauth_client = Arc::new(OAuthClient::new(&configuration.oauth)?);
    let spotify = Arc::new(segue_api::Client::new(
        configuration.spotify.api_base_url.clone(),
    ));

    let app = server::app(AppState {
        session_store,
        oauth_client,
        spotify,
    });

    // Start server
    let addr = format!(
        "{}:{}",
        configuration.server.host, configuration.server.port
    );
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
