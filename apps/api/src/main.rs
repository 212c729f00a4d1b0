mod config;
mod enrichment;
mod errors;
mod extraction;
mod gateway;
mod models;
mod repository;
mod routes;
mod state;
mod wizard;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::enrichment::EnrichmentRegistry;
use crate::gateway::GenerationGateway;
use crate::repository::InMemoryArtifactRepository;
use crate::routes::build_router;
use crate::state::AppState;
use crate::wizard::new_session_store;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Scribe API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the generation gateway
    let gateway = GenerationGateway::new(
        config.generation_url.clone(),
        config.generation_provider.clone(),
        config.gateway_timeout_secs,
    );
    info!(
        "Generation gateway initialized (provider: {})",
        config.generation_provider
    );

    // Build app state: session store, enrichment registry, submission backend
    let state = AppState {
        gateway,
        sessions: new_session_store(),
        enrichment: Arc::new(EnrichmentRegistry::new()),
        repository: Arc::new(InMemoryArtifactRepository::new()),
        config: config.clone(),
    };

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
