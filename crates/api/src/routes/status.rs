//! Current detection status.

use axum::{extract::State, Json};
use chrono::Utc;
use sentinel_core::StatusSnapshot;

use crate::state::AppState;

/// GET /api/status - Point-in-time tracker snapshot.
///
/// Never blocks on collection: this reads whatever the last completed poll
/// cycle left behind.
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusSnapshot> {
    let snapshot = state.tracker.read().current_status(Utc::now());
    Json(snapshot)
}
