//! Loopback port probe for remote-desktop listeners.
//!
//! A successful connect to a well-known remote-desktop port means a listener
//! is serving on this host. Connection attempts are loopback-only and carry a
//! short timeout so a filtered port cannot stall the cycle.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sentinel_core::{Result, Signal};
use tokio::net::TcpStream;

use crate::probe::Probe;

const CONNECT_TIMEOUT: Duration = Duration::from_millis(400);

const REMOTE_PORTS: &[(u16, &str)] = &[(3389, "RDP"), (5900, "VNC")];

/// Detects remote-desktop listeners by connecting to loopback ports.
pub struct RdpPortProbe {
    ports: &'static [(u16, &'static str)],
}

impl RdpPortProbe {
    pub fn new() -> Self {
        Self {
            ports: REMOTE_PORTS,
        }
    }
}

impl Default for RdpPortProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Probe for RdpPortProbe {
    fn name(&self) -> &'static str {
        "ports"
    }

    async fn scan(&self) -> Result<Vec<Signal>> {
        let now = Utc::now();
        let mut signals = Vec::new();

        for &(port, tool) in self.ports {
            let attempt =
                tokio::time::timeout(CONNECT_TIMEOUT, TcpStream::connect(("127.0.0.1", port)))
                    .await;

            if matches!(attempt, Ok(Ok(_))) {
                signals.push(Signal::observed_at(tool, format!("tcp:{port}"), now));
            }
        }

        Ok(signals)
    }
}
