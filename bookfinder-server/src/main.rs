//! BookFinder Server - JSON API over the search controller and favorites

use anyhow::{Context, Result};
use bookfinder_core::Config;
use bookfinder_server::{routes, state};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookfinder_server=debug,bookfinder_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Invalid configuration")?;
    let addr: SocketAddr = std::env::var("BOOKFINDER_BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()
        .context("Invalid BOOKFINDER_BIND_ADDR")?;

    // Create application state
    let state = state::AppState::new(&config).await?;
    tracing::info!(
        "Catalog {}, data in {}",
        config.catalog_url,
        config.data_path.display()
    );

    // Build router
    let app = routes::create_router(state);

    // Start server
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
