pub mod api;
pub mod config;
pub mod error;
pub mod upstream;

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::upstream::UpstreamClient;

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: AppConfig,
    pub upstream: UpstreamClient,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().build()?;
        let upstream = UpstreamClient::new(http, &config);
        Ok(Self { config, upstream })
    }
}

pub fn build_app(state: Arc<AppState>) -> Router {
    api::router(state)
}

/// Serves `app` on all interfaces until Ctrl-C or SIGTERM.
pub async fn run_server(app: Router, port: u16) -> std::io::Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Server running on port {port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("failed to listen for Ctrl-C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!("failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received, draining connections");
}
