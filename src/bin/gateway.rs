//! ShareIt Gateway
//!
//! Validates incoming calls and forwards the valid ones to the ShareIt server.

use std::net::SocketAddr;

use anyhow::Context;

use shareit::{
    config::AppConfig,
    gateway::{self, client::ServerClient, GatewayState},
    logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let _log_guard = logging::init(&config.logging);

    tracing::info!(
        "Starting ShareIt Gateway v{}, forwarding to {}",
        env!("CARGO_PKG_VERSION"),
        config.gateway.server_url
    );

    let client = ServerClient::new(&config.gateway)?;
    let app = gateway::router(GatewayState { client });

    let addr = SocketAddr::new(
        config.gateway.host.parse().context("Invalid host address")?,
        config.gateway.port,
    );
    tracing::info!("Gateway listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
