mod config;
mod db;
mod editor;
mod errors;
mod export;
mod layout;
mod models;
mod persistence;
mod preview;
mod routes;
mod state;
mod templates;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::persistence::{InMemoryResumeStore, PgResumeStore, ResumeStore};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize document store (PostgreSQL when configured)
    let store: Arc<dyn ResumeStore> = match &config.database_url {
        Some(url) => {
            let store = PgResumeStore::new(create_pool(url).await?);
            store.ensure_schema().await?;
            Arc::new(store)
        }
        None => {
            info!("DATABASE_URL not set, documents are kept in memory");
            Arc::new(InMemoryResumeStore::new())
        }
    };

    // Build app state
    let state = AppState::new(store, config.clone());
    let page = state.engine.dimensions();
    info!(
        "Layout: {}mm x {}mm page, {}mm margin, {:.1}px printable height",
        page.width_mm,
        page.height_mm,
        page.margin_mm,
        page.printable_height_px()
    );

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
