use tracing_subscriber::EnvFilter;

use folio_api::config::AppConfig;
use folio_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up CRM_BASE_URL, TIKTOK_CLIENT_ID, etc.
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.default_log_filter())),
        )
        .init();

    tracing::info!("Starting Folio API in {:?} mode", config.environment);
    if config.crm.base_url.is_none() {
        tracing::warn!("CRM_BASE_URL not set; CRM routes will answer 500");
    }
    if config.tiktok.client_id.is_none() {
        tracing::warn!("TIKTOK_CLIENT_ID not set; /auth/tiktok will answer 500");
    }

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::from_config(config);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind_addr, e))?;

    tracing::info!("Folio API listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
