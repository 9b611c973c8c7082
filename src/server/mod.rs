//! HTTP service
//!
//! Routes:
//! - `GET  /health`
//! - `POST /predict`
//! - `POST /retrain`
//! - `POST /retrain/background`, `GET /retrain/jobs/:id`
//! - `GET  /model`
//! - `GET  /stats`

pub mod handlers;
pub mod state;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use tracing::info;

pub use state::AppState;

/// Build the router over a shared state
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/predict", post(handlers::predict))
        .route("/retrain", post(handlers::retrain))
        .route("/retrain/background", post(handlers::retrain_background))
        .route("/retrain/jobs/:id", get(handlers::retrain_job))
        .route("/model", get(handlers::model_info))
        .route("/stats", get(handlers::stats))
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(state: Arc<AppState>, addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(addr = %addr, "Loan approval service listening");

    axum::serve(listener, router(state))
        .await
        .context("HTTP server terminated")?;
    Ok(())
}
