//! Notification config endpoints.

use axum::{body::Bytes, extract::State, Json};
use notifier::{Payload, PolicyEngine};
use sentinel_core::NotificationConfig;
use tracing::{info, warn};

use crate::response::ApiError;
use crate::state::AppState;

/// GET /api/notification - Current config (default until first save).
pub async fn get_config_handler(
    State(state): State<AppState>,
) -> Result<Json<NotificationConfig>, ApiError> {
    let config = state.store.load_notification_config()?;
    Ok(Json(config))
}

/// POST /api/notification - Validate and persist a full config.
///
/// Raw-body parse so shape errors (wrong types, unknown channels) come back
/// as our own 400 body rather than the framework's rejection. An invalid
/// config never touches the saved one.
pub async fn save_config_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<NotificationConfig>, ApiError> {
    let config = NotificationConfig::parse(&body)?;
    state.store.save_notification_config(&config)?;

    info!(enabled = config.enabled, channels = config.channels.len(), "Notification config saved");
    Ok(Json(config))
}

/// POST /api/notification/test - Dispatch a sample alert through the
/// *submitted* config without persisting it.
pub async fn test_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Payload>, ApiError> {
    let config = NotificationConfig::parse(&body)?;
    let payload = PolicyEngine::preview(&config);

    // Delivery runs in the background; the response is the payload that
    // went out, not the delivery outcome.
    let dispatcher = state.dispatcher.clone();
    let sent = payload.clone();
    tokio::spawn(async move {
        dispatcher.dispatch(&config, &sent).await;
    });

    Ok(Json(payload))
}

/// Shared helper for endpoints that fire-and-forget against the saved
/// config.
pub(crate) fn dispatch_background(state: &AppState, config: NotificationConfig, payload: Payload) {
    let dispatcher = state.dispatcher.clone();
    tokio::spawn(async move {
        if !config.enabled {
            warn!("Dispatch requested with notifications disabled, dropping");
            return;
        }
        dispatcher.dispatch(&config, &payload).await;
    });
}
