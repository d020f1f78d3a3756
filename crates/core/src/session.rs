//! Session types: the single current session and closed history records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::signal::{Signal, SignalName};

/// The one session the tracker may hold at a time.
///
/// Signals are insertion-ordered and deduplicated by exact (case-sensitive)
/// name. Owned exclusively by the session tracker while active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveSession {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub signals: Vec<Signal>,
}

impl ActiveSession {
    /// Opens a session from the first observed signals.
    pub fn open(start_time: DateTime<Utc>, signals: Vec<Signal>) -> Self {
        let mut session = Self {
            id: Uuid::new_v4(),
            start_time,
            signals: Vec::new(),
        };
        session.merge(signals);
        session
    }

    /// Adds signals whose names have not been seen yet. Exact-match dedup,
    /// first-seen order preserved.
    pub fn merge(&mut self, signals: Vec<Signal>) {
        for signal in signals {
            if !self.signals.iter().any(|s| s.name == signal.name) {
                self.signals.push(signal);
            }
        }
    }

    /// Contributing signal names, first-seen order.
    pub fn signal_names(&self) -> Vec<String> {
        self.signals.iter().map(|s| s.name.clone()).collect()
    }

    /// Closes the session, consuming it into an immutable history record.
    pub fn close(self, end_time: DateTime<Utc>) -> HistoryRecord {
        let duration_secs = (end_time - self.start_time).num_seconds();
        HistoryRecord {
            id: self.id,
            start_time: self.start_time,
            end_time,
            duration_secs,
            signals: self.signals.into_iter().map(|s| s.name).collect(),
            created_at: end_time,
        }
    }
}

/// A closed session. Immutable; owned by the history store after handoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Always exactly `end_time - start_time`, whole seconds.
    #[serde(rename = "duration")]
    pub duration_secs: i64,
    /// Contributing signal names, first-seen order.
    pub signals: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Point-in-time view of the tracker, as served by `/api/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub remote_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    /// Live duration in seconds while a session is active; absent otherwise.
    #[serde(rename = "duration", default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<i64>,
    pub signals: Vec<SignalName>,
}

impl StatusSnapshot {
    /// The only valid boot state: no persisted "active" session is assumed
    /// after a restart.
    pub fn idle() -> Self {
        Self {
            remote_active: false,
            start_time: None,
            duration_secs: None,
            signals: Vec::new(),
        }
    }
}

/// Session lifecycle transition handed from the tracker to the notification
/// policy engine. Carries completed, immutable data only.
#[derive(Debug, Clone)]
pub enum Transition {
    Started(ActiveSession),
    Ended(HistoryRecord),
}
