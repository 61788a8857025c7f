//! HTTP JSON API over the transaction ledger
//!
//! Routes are organized into modules:
//! - routes::transactions: list, add, delete, export
//!
//! Paths outside `/api` are served from the configured public directory.

pub mod error;
pub mod routes;

use axum::{
    routing::{delete, get},
    Router,
};
use ledgerweb_config::Config;
use ledgerweb_core::TransactionStore;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TransactionStore>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::transactions::{
        api_add_transaction, api_delete_transaction, api_export_transactions, api_transactions,
    };

    let public_dir = state.config.server.public_dir.clone();

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/transactions", get(api_transactions).post(api_add_transaction))
        .route("/api/transactions/export", get(api_export_transactions))
        .route("/api/transactions/:id", delete(api_delete_transaction))
        .fallback_service(ServeDir::new(public_dir))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Start the HTTP server
///
/// Binds to the configured address and serves until Ctrl-C.
///
/// # Arguments
///
/// * `config` - The application configuration
/// * `store` - The initialized ledger store
pub async fn start_server(config: Config, store: Arc<dyn TransactionStore>) -> std::io::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let public_dir = config.server.public_dir.clone();
    let router = create_router(AppState { store, config });

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Server running at http://{}", addr);
    log::info!("Serving static files from {}", public_dir.display());

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
