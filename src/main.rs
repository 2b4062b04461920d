use anyhow::Result;
use contact_portal::{
    auth::{create_http_client, create_relay_client, SupabaseIdentity},
    config::Config,
    contact::Web3FormsRelay,
    web, AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting contact portal");

    // Load configuration from environment
    let config = Config::load()?;
    tracing::info!(
        environment = ?config.environment,
        supabase_url = %config.supabase_url,
        relay_endpoint = %config.relay_endpoint,
        "Configuration loaded"
    );

    // An unset key is sent as an empty credential; the relay will reject it
    if !config.has_relay_key() {
        tracing::warn!(
            "WEB3FORMS_ACCESS_KEY is not set - contact submissions will carry an empty access key"
        );
    }

    let identity_client = create_http_client(
        config.http_connect_timeout_secs,
        config.http_request_timeout_secs,
    )
    .map_err(|e| anyhow::anyhow!("Failed to build identity HTTP client: {}", e))?;
    let identity = Arc::new(SupabaseIdentity::new(
        config.supabase_url.clone(),
        config.supabase_anon_key.clone(),
        identity_client,
    ));

    let relay_client = create_relay_client(config.http_connect_timeout_secs)
        .map_err(|e| anyhow::anyhow!("Failed to build relay HTTP client: {}", e))?;
    let relay = Arc::new(Web3FormsRelay::new(
        relay_client,
        config.relay_endpoint.clone(),
        config.relay_access_key.clone(),
    ));

    let bind_address = config.bind_address();
    let state = Arc::new(AppState::new(config, identity, relay));
    let app = web::create_router(state);

    // Bind and serve
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Portal listening on {}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
