//! Notification configuration.
//!
//! Loaded at startup, mutated only via an explicit save, persisted atomically
//! by the config store. Last write wins; there are no merge semantics.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{Error, Result};

/// A delivery channel identifier. Unknown identifiers fail deserialization,
/// which is how shape validation rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Decision is relayed for the shell to render; the daemon never draws
    /// OS notifications itself.
    Desktop,
    /// Outbound webhook POST.
    Webhook,
}

/// Webhook provider, selecting the request body shape and signing scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebhookProvider {
    #[default]
    Generic,
    Feishu,
    Dingtalk,
}

/// Webhook delivery settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct WebhookConfig {
    #[validate(url(message = "webhook url must be a valid URL"))]
    pub url: String,
    /// Optional HMAC signing secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(default)]
    pub provider: WebhookProvider,
}

/// Notification policy configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NotificationConfig {
    pub enabled: bool,
    #[serde(default)]
    pub channels: Vec<Channel>,
    /// Sessions shorter than this never produce an end-of-session alert.
    #[serde(default)]
    pub min_duration_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub webhook: Option<WebhookConfig>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            channels: vec![Channel::Desktop],
            min_duration_secs: 0,
            webhook: None,
        }
    }
}

impl NotificationConfig {
    /// Parses and validates a config from a raw request body.
    ///
    /// Type mismatches (e.g. `"enabled": "yes"`) and unknown channel
    /// identifiers surface as `InvalidConfig`, leaving any previously saved
    /// config untouched.
    pub fn parse(body: &[u8]) -> Result<Self> {
        let config: Self = serde_json::from_slice(body)
            .map_err(|e| Error::invalid_config(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    /// Validates cross-field shape beyond what serde typing enforces.
    pub fn check(&self) -> Result<()> {
        self.validate()
            .map_err(|e| Error::invalid_config(e.to_string()))?;

        if self.channels.contains(&Channel::Webhook) && self.webhook.is_none() {
            return Err(Error::invalid_config(
                "webhook channel enabled but no webhook settings provided",
            ));
        }

        let mut seen = Vec::new();
        for channel in &self.channels {
            if seen.contains(channel) {
                return Err(Error::invalid_config(format!(
                    "duplicate channel: {:?}",
                    channel
                )));
            }
            seen.push(*channel);
        }

        Ok(())
    }

    pub fn has_channel(&self, channel: Channel) -> bool {
        self.channels.contains(&channel)
    }
}
