mod activity;
mod config;
mod credentials;
mod errors;
mod graph;
mod inbox;
mod models;
mod respond;
mod routes;
mod rules;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::rules::store::JsonFileStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Signalbox API v{}", env!("CARGO_PKG_VERSION"));

    let rule_store = Arc::new(JsonFileStore::new(config.rules_store_path.clone()));
    let state = AppState::new(config.clone(), rule_store);

    info!(
        "Loaded {} automation rule(s) from {}",
        state.rules.read().expect("state lock poisoned").len(),
        config.rules_store_path.display()
    );
    if config.meta_access_token.is_none() {
        info!("No META_ACCESS_TOKEN set; dispatches without a request token run dry");
    }

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
