//! Delivery channels.

use async_trait::async_trait;
use parking_lot::Mutex;
use sentinel_core::limits::WEBHOOK_TIMEOUT_SECS;
use sentinel_core::{Channel, Error, NotificationConfig, Result, WebhookConfig, WebhookProvider};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::policy::Payload;
use crate::sign::{dingtalk_sign, feishu_sign};

/// One way of delivering a payload.
#[async_trait]
pub trait Notify: Send + Sync {
    fn name(&self) -> &'static str;

    async fn send(&self, payload: &Payload) -> Result<()>;
}

/// Desktop channel: the daemon only relays the decision; the shell polls
/// `/api/status` and renders the OS notification itself.
pub struct DesktopRelay;

#[async_trait]
impl Notify for DesktopRelay {
    fn name(&self) -> &'static str {
        "desktop"
    }

    async fn send(&self, payload: &Payload) -> Result<()> {
        info!(
            title = %payload.title,
            tools = ?payload.tool_names,
            "Desktop notification decision relayed"
        );
        Ok(())
    }
}

/// Webhook channel: POSTs a provider-shaped body, optionally signed.
pub struct WebhookNotifier {
    client: reqwest::Client,
    config: WebhookConfig,
}

impl WebhookNotifier {
    pub fn new(client: reqwest::Client, config: WebhookConfig) -> Self {
        Self { client, config }
    }

    fn feishu_body(&self, payload: &Payload) -> serde_json::Value {
        let mut body = serde_json::json!({
            "msg_type": "text",
            "content": { "text": format!("{}\n{}", payload.title, payload.body) },
        });

        if let Some(secret) = &self.config.secret {
            let timestamp = chrono::Utc::now().timestamp();
            body["timestamp"] = serde_json::Value::String(timestamp.to_string());
            body["sign"] = serde_json::Value::String(feishu_sign(secret, timestamp));
        }

        body
    }

    fn dingtalk_request(&self, payload: &Payload) -> (String, serde_json::Value) {
        let body = serde_json::json!({
            "msgtype": "markdown",
            "markdown": {
                "title": payload.title,
                "text": format!("### {}\n\n{}", payload.title, payload.body),
            },
        });

        let mut url = self.config.url.clone();
        if let Some(secret) = &self.config.secret {
            let timestamp = chrono::Utc::now().timestamp_millis();
            let sign = query_escape(&dingtalk_sign(secret, timestamp));
            let sep = if url.contains('?') { '&' } else { '?' };
            url = format!("{url}{sep}timestamp={timestamp}&sign={sign}");
        }

        (url, body)
    }
}

#[async_trait]
impl Notify for WebhookNotifier {
    fn name(&self) -> &'static str {
        "webhook"
    }

    async fn send(&self, payload: &Payload) -> Result<()> {
        let (url, body) = match self.config.provider {
            WebhookProvider::Feishu => (self.config.url.clone(), self.feishu_body(payload)),
            WebhookProvider::Dingtalk => self.dingtalk_request(payload),
            WebhookProvider::Generic => (
                self.config.url.clone(),
                serde_json::to_value(payload).map_err(Error::from)?,
            ),
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::internal(format!("webhook request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::internal(format!(
                "webhook returned status {}",
                response.status()
            )));
        }

        Ok(())
    }
}

/// Captures payloads instead of delivering them. Backs tests and previews.
#[derive(Clone, Default)]
pub struct PreviewNotifier {
    captured: Arc<Mutex<Vec<Payload>>>,
}

impl PreviewNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn captured(&self) -> Vec<Payload> {
        self.captured.lock().clone()
    }
}

#[async_trait]
impl Notify for PreviewNotifier {
    fn name(&self) -> &'static str {
        "preview"
    }

    async fn send(&self, payload: &Payload) -> Result<()> {
        self.captured.lock().push(payload.clone());
        Ok(())
    }
}

/// Fans a payload out to every channel the config enables. Delivery failures
/// are logged per channel and never propagate into the detection loop.
pub struct Dispatcher {
    client: reqwest::Client,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(WEBHOOK_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
        }
    }

    fn notifiers_for(&self, config: &NotificationConfig) -> Vec<Box<dyn Notify>> {
        let mut notifiers: Vec<Box<dyn Notify>> = Vec::new();

        for channel in &config.channels {
            match channel {
                Channel::Desktop => notifiers.push(Box::new(DesktopRelay)),
                Channel::Webhook => {
                    if let Some(webhook) = &config.webhook {
                        notifiers.push(Box::new(WebhookNotifier::new(
                            self.client.clone(),
                            webhook.clone(),
                        )));
                    }
                }
            }
        }

        notifiers
    }

    pub async fn dispatch(&self, config: &NotificationConfig, payload: &Payload) {
        for notifier in self.notifiers_for(config) {
            match notifier.send(payload).await {
                Ok(()) => info!(channel = notifier.name(), "Notification delivered"),
                Err(e) => warn!(channel = notifier.name(), error = %e, "Notification delivery failed"),
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Percent-encodes the characters base64 can emit that are unsafe in a query.
fn query_escape(raw: &str) -> String {
    raw.replace('+', "%2B").replace('/', "%2F").replace('=', "%3D")
}
