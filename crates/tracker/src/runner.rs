//! The detection loop: poll, advance the state machine, persist, notify.
//!
//! Single-writer: only this loop mutates the tracker. API handlers read
//! snapshots through the shared lock and never hold it across awaits.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use collector::Collector;
use history_store::Store;
use notifier::{Dispatcher, PolicyEngine};
use parking_lot::RwLock;
use sentinel_core::limits::{DEFAULT_DEBOUNCE_SECS, DEFAULT_POLL_INTERVAL_SECS};
use sentinel_core::Transition;
use serde::{Deserialize, Serialize};
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::state::SessionTracker;

pub type SharedTracker = Arc<RwLock<SessionTracker>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Seconds between poll cycles.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// Seconds of sustained signal absence before a session ends.
    #[serde(default = "default_debounce")]
    pub debounce_secs: u64,
}

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

fn default_debounce() -> u64 {
    DEFAULT_DEBOUNCE_SECS
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            debounce_secs: default_debounce(),
        }
    }
}

impl TrackerConfig {
    pub fn new_tracker(&self) -> SharedTracker {
        Arc::new(RwLock::new(SessionTracker::new(chrono::Duration::seconds(
            self.debounce_secs as i64,
        ))))
    }
}

/// Owns one poll loop. Store or notification failures are logged and the
/// loop keeps running; nothing in here is fatal.
pub struct DetectionLoop {
    collector: Collector,
    tracker: SharedTracker,
    store: Store,
    dispatcher: Arc<Dispatcher>,
    poll_interval: Duration,
}

impl DetectionLoop {
    pub fn new(
        collector: Collector,
        tracker: SharedTracker,
        store: Store,
        dispatcher: Arc<Dispatcher>,
        config: &TrackerConfig,
    ) -> Self {
        Self {
            collector,
            tracker,
            store,
            dispatcher,
            poll_interval: Duration::from_secs(config.poll_interval_secs.max(1)),
        }
    }

    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(self) {
        info!(interval_secs = self.poll_interval.as_secs(), "Detection loop started");

        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let signals = self.collector.poll().await;
            // Lock scope must not cross the awaits below.
            let transitions = self.tracker.write().observe(Utc::now(), signals);

            for transition in transitions {
                self.handle(transition).await;
            }
        }
    }

    async fn handle(&self, transition: Transition) {
        if let Transition::Ended(record) = &transition {
            if let Err(e) = self.store.append(record) {
                telemetry::health().store.set_unhealthy("history append failing");
                error!(session_id = %record.id, error = %e, "Failed to persist session, continuing");
            } else {
                telemetry::health().store.set_healthy();
            }
        }

        let config = match self.store.load_notification_config() {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Could not load notification config, skipping alert");
                return;
            }
        };

        let decision = PolicyEngine::evaluate(&config, &transition);
        if decision.should_notify {
            self.dispatcher.dispatch(&config, &decision.payload).await;
        }
    }
}
