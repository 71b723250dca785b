// ABOUTME: HTTP server binary for the marathon training dashboard API
// ABOUTME: Loads configuration, wires cache, providers and routes, then serves until shutdown
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Marathon Dashboard Server Binary

use anyhow::{Context, Result};
use clap::Parser;
use marathon_dashboard::{
    config::ServerConfig,
    logging,
    middleware::setup_cors,
    routes::{router, AppState},
};
use std::future::pending;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Command line arguments
#[derive(Parser)]
#[command(name = "marathon-dashboard")]
#[command(about = "Marathon training dashboard API - Strava training joined with Oura recovery")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    info!("{}", config.summary());

    let state = Arc::new(AppState::from_config(&config).await?);
    let app = router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(setup_cors(&config.frontend_url)),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Marathon dashboard listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        pending::<()>().await;
    }
    info!("Shutdown signal received");
}
