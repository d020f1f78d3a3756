//! Application state shared across handlers.

use std::sync::Arc;

use history_store::Store;
use notifier::Dispatcher;
use tracker::SharedTracker;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Read side of the session tracker; the detection loop owns writes.
    pub tracker: SharedTracker,
    /// Durable history, config, and audit storage.
    pub store: Store,
    /// Channel fan-out for test and exit notifications.
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(tracker: SharedTracker, store: Store, dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            tracker,
            store,
            dispatcher,
        }
    }
}
