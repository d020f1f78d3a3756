//! Shell-originated notification events.

use axum::{body::Bytes, extract::State, Json};
use notifier::PolicyEngine;
use serde::Deserialize;
use tracing::info;

use crate::response::{AckResponse, ApiError};
use crate::routes::notification::dispatch_background;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct NotifyRequest {
    #[serde(rename = "type", default)]
    kind: String,
}

/// POST /api/notify - The shell reports a lifecycle event.
///
/// Every event lands in the audit log; only `app_exit` also produces an
/// outbound notification (when notifications are enabled).
pub async fn notify_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AckResponse>, ApiError> {
    let request: NotifyRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::bad_request(format!("invalid notify body: {e}")))?;

    if request.kind.is_empty() {
        return Err(ApiError::bad_request("type must not be empty"));
    }

    state.store.record_audit_event(&request.kind)?;
    info!(kind = %request.kind, "Shell event recorded");

    if request.kind == "app_exit" {
        let config = state.store.load_notification_config()?;
        if config.enabled {
            dispatch_background(&state, config, PolicyEngine::exit_notice());
        }
    }

    Ok(Json(AckResponse::ok()))
}
