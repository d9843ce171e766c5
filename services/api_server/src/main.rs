mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use anyhow::{Context, Result};
use dotenv::dotenv;
use fantera_core::clients::{AlpacaClient, PrivyClient};
use fantera_core::db;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let pool = db::connect(&config.database_url).await?;
    db::run_migrations(&pool).await?;

    let privy = PrivyClient::from_env()?;
    let alpaca = AlpacaClient::from_env()?;

    let state = Arc::new(AppState {
        db: pool,
        privy,
        alpaca,
        config: config.clone(),
    });

    let app = routes::router(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    let addr = config.address();
    info!(address = %addr, "starting API server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind API listener")?;
    axum::serve(listener, app)
        .await
        .context("API server terminated")?;

    Ok(())
}
