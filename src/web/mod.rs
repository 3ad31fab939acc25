//! Web front-end: an HTML form plus a small JSON API.
//!
//! Routes:
//! - `GET /` and `POST /`: the prediction form and its result page
//! - `GET /api/categories`: known categories
//! - `GET /api/predict`: one prediction as JSON
//! - `GET /api/compare`: one score against every category
//! - `GET /health`: liveness probe
//!
//! The dataset is loaded and validated once before the listener starts and is
//! shared read-only by all requests.

pub mod handlers;
pub mod view;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::domain::{AppConfig, Dataset, ScoreBounds};
use crate::error::AppError;

/// Immutable state shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub bounds: ScoreBounds,
    pub curve_resolution: usize,
}

impl AppState {
    pub fn new(dataset: Dataset, config: &AppConfig) -> Self {
        Self {
            dataset: Arc::new(dataset),
            bounds: config.bounds,
            curve_resolution: config.curve_resolution,
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index_get).post(handlers::index_post))
        .route("/api/categories", get(handlers::categories))
        .route("/api/predict", get(handlers::predict_api))
        .route("/api/compare", get(handlers::compare_api))
        .route("/health", get(handlers::health))
        .with_state(state)
}

/// Serve until Ctrl+C.
///
/// Blocks the calling thread on a dedicated tokio runtime.
pub fn serve(dataset: Dataset, config: &AppConfig, bind: &str) -> Result<(), AppError> {
    let state = AppState::new(dataset, config);
    let app = router(state);

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| AppError::new(4, format!("Failed to create runtime: {e}")))?;

    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(bind)
            .await
            .map_err(|e| AppError::new(2, format!("Failed to bind {bind}: {e}")))?;

        let addr = listener
            .local_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| bind.to_string());
        tracing::info!(%addr, "server listening (Ctrl+C to stop)");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| AppError::new(4, format!("Server error: {e}")))?;

        tracing::info!("server stopped");
        Ok(())
    })
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        // Without a signal handler the server runs until killed.
        tracing::warn!(error = %err, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}
