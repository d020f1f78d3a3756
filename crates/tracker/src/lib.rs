//! Session tracking.
//!
//! [`SessionTracker`] is the single owner of session state: a pure, clock-fed
//! state machine the detection loop advances once per poll cycle. API readers
//! only ever see snapshots.

pub mod runner;
pub mod state;

pub use runner::{DetectionLoop, SharedTracker, TrackerConfig};
pub use state::{SessionTracker, TrackerState};
