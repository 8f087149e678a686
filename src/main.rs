use std::sync::Arc;

use anyhow::Context;
use chat_relay::{build_app, config::AppConfig, run_server, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "chat_relay=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = AppConfig::from_env().context("refusing to start")?;
    info!(
        origin = ?config.allowed_origin,
        upstream = %config.upstream_url,
        model = %config.model,
        "configuration loaded"
    );

    let port = config.port;
    let state = AppState::from_config(config).context("failed to build upstream HTTP client")?;
    let app = build_app(Arc::new(state));

    run_server(app, port)
        .await
        .with_context(|| format!("server on port {port} failed"))
}
