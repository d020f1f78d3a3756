//! Observed indicators of remote-control activity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One observed indicator of remote-control activity (a named tool, process,
/// or protocol). Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    /// Display name of the detected tool (case-sensitive, e.g. "TeamViewer").
    pub name: String,
    /// When the probe observed it.
    pub detected_at: DateTime<Utc>,
    /// Opaque probe-specific identifier (process name, port, window class).
    pub raw_source: String,
}

impl Signal {
    pub fn new(name: impl Into<String>, raw_source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            detected_at: Utc::now(),
            raw_source: raw_source.into(),
        }
    }

    /// Same signal with an explicit observation time (clock-injected paths).
    pub fn observed_at(name: impl Into<String>, raw_source: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            detected_at: at,
            raw_source: raw_source.into(),
        }
    }
}

/// Signal name as exposed by `/api/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalName {
    pub name: String,
}
