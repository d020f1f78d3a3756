//! Test data builders.

use serde_json::{json, Value};

/// A valid notification config body with desktop delivery only.
pub fn desktop_config() -> Value {
    json!({
        "enabled": true,
        "channels": ["desktop"],
        "min_duration_secs": 0
    })
}

/// A valid config with a generic webhook.
pub fn webhook_config(url: &str) -> Value {
    json!({
        "enabled": true,
        "channels": ["desktop", "webhook"],
        "min_duration_secs": 30,
        "webhook": { "url": url, "provider": "generic" }
    })
}

/// `enabled` carries the wrong type; must be rejected as a whole.
pub fn malformed_config() -> Value {
    json!({
        "enabled": "yes",
        "channels": ["desktop"]
    })
}
