use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use socialdesk_store::ListQuery;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Configured record store (`http` or `memory`).
    pub backend: &'static str,
    /// Whether the record store answered a one-row probe.
    pub backend_healthy: bool,
}

/// GET /health -- returns service and record store health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let probe = ListQuery::default().limit(1);
    let backend_healthy = match state.store.list("Client", &probe).await {
        Ok(_) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Record store health probe failed");
            false
        }
    };

    let status = if backend_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        backend: state.config.store_backend.as_str(),
        backend_healthy,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
