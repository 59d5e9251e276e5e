//! storefront HTTP Server
//!
//! Axum-based server providing the pricing data, the checkout session
//! endpoint and the static WASM front end.

mod config;
mod handlers;
mod routes;
mod state;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront_core::checkout::CREATE_CHECKOUT_SESSION_PATH;
use storefront_payments::{CatalogStore, MemoryCatalogStore, StripeClient};

use crate::config::ServerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();
    let config = ServerConfig::from_env();

    // Catalog
    let catalog: Arc<dyn CatalogStore> = match config.catalog_path {
        Some(ref path) => Arc::new(MemoryCatalogStore::from_json_file(path).await?),
        None => {
            tracing::warn!("⚠ CATALOG_PATH not set - serving an empty catalog");
            Arc::new(MemoryCatalogStore::new())
        }
    };

    // Payments
    let stripe = match StripeClient::from_env() {
        Ok(client) => {
            tracing::info!("✓ Stripe configured");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "⚠ Stripe not configured - checkout disabled");
            tracing::warn!("  Set STRIPE_SECRET_KEY in .env");
            None
        }
    };

    let state = AppState { catalog, stripe };
    let app = routes::app(state, &config.static_dir);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("🚀 storefront server running on http://{}", config.bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health");
    tracing::info!("  GET  /api/pricing");
    tracing::info!("  POST {}", CREATE_CHECKOUT_SESSION_PATH);
    tracing::info!("  GET  /*  (static: {})", config.static_dir.display());

    axum::serve(listener, app).await?;

    Ok(())
}
