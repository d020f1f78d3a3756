//! API routes.

pub mod health;
pub mod history;
pub mod notification;
pub mod notify;
pub mod status;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

/// Creates the API router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/status", get(status::status_handler))
        .route("/api/history", get(history::history_handler))
        .route(
            "/api/notification",
            get(notification::get_config_handler).post(notification::save_config_handler),
        )
        .route("/api/notification/test", post(notification::test_handler))
        .route("/api/notify", post(notify::notify_handler))
        .route("/health", get(health::health_handler))
        .route("/health/ready", get(health::ready_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
