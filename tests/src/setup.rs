//! Common test setup functions.

use std::sync::Arc;

use api::{router, AppState};
use axum::Router;
use chrono::{DateTime, Duration, Utc};
use history_store::Store;
use notifier::Dispatcher;
use sentinel_core::Signal;
use tempfile::TempDir;
use tracker::{SharedTracker, TrackerConfig};

/// Test context over the real router and a throwaway SQLite database.
///
/// The detection loop is not running: tests drive the tracker directly
/// through [`TestContext::observe`], which is the same single-writer path
/// the loop uses in production.
pub struct TestContext {
    _dir: TempDir,
    pub store: Store,
    pub tracker: SharedTracker,
    pub router: Router,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_debounce_secs(10)
    }

    pub fn with_debounce_secs(debounce_secs: u64) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = Store::open(&dir.path().join("sentinel.db")).expect("Failed to open store");

        let config = TrackerConfig {
            debounce_secs,
            ..TrackerConfig::default()
        };
        let tracker = config.new_tracker();

        let state = AppState::new(tracker.clone(), store.clone(), Arc::new(Dispatcher::new()));
        let router = router(state);

        Self {
            _dir: dir,
            store,
            tracker,
            router,
        }
    }

    /// Feeds one poll cycle's worth of signals into the tracker, persisting
    /// any session that ends, exactly as the detection loop would.
    pub fn observe(&self, at: DateTime<Utc>, names: &[&str]) {
        let signals = names
            .iter()
            .map(|n| Signal::observed_at(*n, "test", at))
            .collect();

        let transitions = self.tracker.write().observe(at, signals);
        for transition in transitions {
            if let sentinel_core::Transition::Ended(record) = transition {
                self.store.append(&record).expect("Failed to persist session");
            }
        }
    }

    /// Runs a complete session: signals from `start` for `active_secs`
    /// seconds, then absence until the debounce closes it.
    pub fn run_session(&self, start: DateTime<Utc>, active_secs: i64, names: &[&str]) {
        let mut at = start;
        let end = start + Duration::seconds(active_secs);
        while at < end {
            self.observe(at, names);
            at += Duration::seconds(5);
        }
        // Absence well past any reasonable debounce window.
        self.observe(end, &[]);
        self.observe(end + Duration::seconds(3600), &[]);
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
