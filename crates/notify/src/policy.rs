//! Notification eligibility decisions.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sentinel_core::{NotificationConfig, Transition};

/// Payload handed to delivery channels (and returned by the test endpoint).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub title: String,
    pub body: String,
    /// Contributing tool names, deduplicated by exact match, first-seen order.
    pub tool_names: Vec<String>,
}

/// Outcome of evaluating a transition against the current config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    pub should_notify: bool,
    pub payload: Payload,
}

/// Stateless policy over the persisted [`NotificationConfig`].
pub struct PolicyEngine;

impl PolicyEngine {
    /// Decides whether `transition` warrants an alert under `config`.
    ///
    /// The minimum-duration threshold applies to session ends only — at
    /// start time there is no duration to compare against.
    pub fn evaluate(config: &NotificationConfig, transition: &Transition) -> Decision {
        let payload = Self::payload_for(transition);

        let eligible = config.enabled && !config.channels.is_empty();
        let should_notify = match transition {
            Transition::Started(_) => eligible,
            Transition::Ended(record) => {
                eligible && record.duration_secs >= config.min_duration_secs as i64
            }
        };

        Decision {
            should_notify,
            payload,
        }
    }

    fn payload_for(transition: &Transition) -> Payload {
        match transition {
            Transition::Started(session) => {
                let tool_names = session.signal_names();
                Payload {
                    title: "Remote control detected".to_string(),
                    body: format!(
                        "A remote-control session is active.\n\nSignals:\n{}\n\nStarted: {}",
                        tool_names.join("\n"),
                        session.start_time.format("%Y-%m-%d %H:%M:%S"),
                    ),
                    tool_names,
                }
            }
            Transition::Ended(record) => {
                let tool_names = record.signals.clone();
                Payload {
                    title: "Remote control ended".to_string(),
                    body: format!(
                        "The remote-control session has ended.\n\nSignals:\n{}\n\nDuration: {}s",
                        tool_names.join("\n"),
                        record.duration_secs,
                    ),
                    tool_names,
                }
            }
        }
    }

    /// Synthesizes a sample payload for config preview. Touches no session
    /// state, no history, and no persisted config.
    pub fn preview(config: &NotificationConfig) -> Payload {
        let channels: Vec<String> = config
            .channels
            .iter()
            .map(|c| format!("{c:?}").to_lowercase())
            .collect();

        Payload {
            title: "Test notification".to_string(),
            body: format!(
                "This is a test notification.\n\nChannels: {}\n\nSent: {}",
                channels.join(", "),
                Utc::now().format("%Y-%m-%d %H:%M:%S"),
            ),
            tool_names: vec!["SampleTool".to_string()],
        }
    }

    /// Payload for the shell's "application is exiting" notice.
    pub fn exit_notice() -> Payload {
        Payload {
            title: "remote-sentinel shell exited".to_string(),
            body: format!(
                "The desktop shell has exited.\n\nTime: {}",
                Utc::now().format("%Y-%m-%d %H:%M:%S"),
            ),
            tool_names: Vec::new(),
        }
    }
}
