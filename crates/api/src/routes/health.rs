//! Health check endpoints.

use axum::{http::StatusCode, Json};
use telemetry::{health, HealthReport};

/// GET /health - Full component health report.
pub async fn health_handler() -> Json<HealthReport> {
    Json(health().report())
}

/// GET /health/ready - Readiness probe (store is writable).
pub async fn ready_handler() -> StatusCode {
    if health().is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
