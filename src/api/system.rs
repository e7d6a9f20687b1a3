//! Health and metrics endpoints.

use axum::{Json, extract::State};
use std::sync::Arc;

use super::auth::StaffUser;
use super::{ApiError, AppState, HealthResponse};

/// `GET /api/health`
///
/// Pings the database before answering, so a 200 means the store is usable.
pub async fn health(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>, ApiError> {
    state
        .store()
        .ping()
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    }))
}

/// `GET /api/metrics`
pub async fn get_metrics(
    State(state): State<Arc<AppState>>,
    _staff: StaffUser,
) -> Result<String, ApiError> {
    state
        .prometheus_handle
        .as_ref()
        .map(metrics_exporter_prometheus::PrometheusHandle::render)
        .ok_or_else(|| ApiError::NotFound("Metrics are not enabled".to_string()))
}
