//! The poll cycle: run every probe once, bounded, tolerating failures.

use std::time::Duration;

use sentinel_core::limits::{DEFAULT_POLL_INTERVAL_SECS, DEFAULT_PROBE_TIMEOUT_MS};
use sentinel_core::Signal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ports::RdpPortProbe;
use crate::probe::Probe;
use crate::process::ProcessProbe;

/// Collector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Seconds between poll cycles.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// Per-probe deadline in milliseconds.
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_ms: u64,
}

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

fn default_probe_timeout() -> u64 {
    DEFAULT_PROBE_TIMEOUT_MS
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            probe_timeout_ms: default_probe_timeout(),
        }
    }
}

/// Runs all probes once per tick. Restartable and infallible as a whole:
/// a probe error or timeout drops that probe's contribution for the cycle.
pub struct Collector {
    probes: Vec<Box<dyn Probe>>,
    probe_timeout: Duration,
}

impl Collector {
    /// Collector with the built-in OS probes.
    pub fn new(config: &CollectorConfig) -> Self {
        Self::with_probes(
            vec![Box::new(ProcessProbe::new()), Box::new(RdpPortProbe::new())],
            config,
        )
    }

    /// Collector over an explicit probe set (tests inject scripted probes).
    pub fn with_probes(probes: Vec<Box<dyn Probe>>, config: &CollectorConfig) -> Self {
        Self {
            probes,
            probe_timeout: Duration::from_millis(config.probe_timeout_ms),
        }
    }

    /// One poll cycle across all probes.
    pub async fn poll(&self) -> Vec<Signal> {
        let mut signals = Vec::new();
        let mut all_failed = !self.probes.is_empty();

        for probe in &self.probes {
            match tokio::time::timeout(self.probe_timeout, probe.scan()).await {
                Ok(Ok(found)) => {
                    all_failed = false;
                    debug!(probe = probe.name(), count = found.len(), "Probe scan complete");
                    signals.extend(found);
                }
                Ok(Err(e)) => {
                    warn!(probe = probe.name(), error = %e, "Probe failed, skipping cycle");
                }
                Err(_) => {
                    warn!(
                        probe = probe.name(),
                        timeout_ms = self.probe_timeout.as_millis() as u64,
                        "Probe exceeded deadline, skipping cycle"
                    );
                }
            }
        }

        if all_failed {
            telemetry::health().collector.set_unhealthy("all probes failing");
        } else {
            telemetry::health().collector.set_healthy();
        }

        signals
    }
}
