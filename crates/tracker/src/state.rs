//! The session state machine.
//!
//! Three states: `Idle` (nothing detected), `Active` (a session is open),
//! `Closing` (signals vanished, waiting out the debounce window). Absence
//! shorter than the debounce window never ends a session; a signal
//! reappearing inside the window cancels the close and the original session
//! continues. Once the window elapses the session is over: it ends at the
//! deadline, not at the tick that noticed it, so durations stay independent
//! of poll jitter, and signals arriving on a later tick open a fresh session.

use chrono::{DateTime, Duration, Utc};
use sentinel_core::{ActiveSession, Signal, SignalName, StatusSnapshot, Transition};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum TrackerState {
    Idle,
    Active(ActiveSession),
    Closing {
        session: ActiveSession,
        deadline: DateTime<Utc>,
    },
}

pub struct SessionTracker {
    state: TrackerState,
    debounce: Duration,
}

impl SessionTracker {
    /// Always boots into `Idle`: an interrupted session is lost, never
    /// resurrected from disk.
    pub fn new(debounce: Duration) -> Self {
        Self {
            state: TrackerState::Idle,
            debounce,
        }
    }

    /// Advances the machine with one poll cycle's signals.
    ///
    /// Usually emits zero or one transition; a tick that lands past an
    /// expired deadline while carrying signals emits two (the old session's
    /// `Ended`, then a fresh `Started`).
    pub fn observe(&mut self, now: DateTime<Utc>, signals: Vec<Signal>) -> Vec<Transition> {
        let mut transitions = Vec::new();
        let seen = !signals.is_empty();

        self.state = match std::mem::replace(&mut self.state, TrackerState::Idle) {
            TrackerState::Idle => {
                if seen {
                    let session = ActiveSession::open(now, signals);
                    info!(session_id = %session.id, signals = ?session.signal_names(), "Remote session started");
                    transitions.push(Transition::Started(session.clone()));
                    TrackerState::Active(session)
                } else {
                    TrackerState::Idle
                }
            }
            TrackerState::Active(mut session) => {
                if seen {
                    session.merge(signals);
                    TrackerState::Active(session)
                } else if self.debounce <= Duration::zero() {
                    let record = session.close(now);
                    info!(session_id = %record.id, duration_secs = record.duration_secs, "Remote session ended");
                    transitions.push(Transition::Ended(record));
                    TrackerState::Idle
                } else {
                    let deadline = now + self.debounce;
                    debug!(session_id = %session.id, %deadline, "Signals vanished, debouncing");
                    TrackerState::Closing { session, deadline }
                }
            }
            TrackerState::Closing { mut session, deadline } => {
                if now >= deadline {
                    // The window elapsed before this tick: the old session is
                    // over regardless of what the tick carries. End at the
                    // deadline itself, not this tick's wall time.
                    let record = session.close(deadline);
                    info!(session_id = %record.id, duration_secs = record.duration_secs, "Remote session ended");
                    transitions.push(Transition::Ended(record));

                    if seen {
                        let session = ActiveSession::open(now, signals);
                        info!(session_id = %session.id, signals = ?session.signal_names(), "Remote session started");
                        transitions.push(Transition::Started(session.clone()));
                        TrackerState::Active(session)
                    } else {
                        TrackerState::Idle
                    }
                } else if seen {
                    debug!(session_id = %session.id, "Signals reappeared, close cancelled");
                    session.merge(signals);
                    TrackerState::Active(session)
                } else {
                    TrackerState::Closing { session, deadline }
                }
            }
        };

        transitions
    }

    /// Point-in-time view for `/api/status`. A session in its debounce
    /// window still reads as active.
    pub fn current_status(&self, now: DateTime<Utc>) -> StatusSnapshot {
        match &self.state {
            TrackerState::Idle => StatusSnapshot::idle(),
            TrackerState::Active(session) | TrackerState::Closing { session, .. } => {
                StatusSnapshot {
                    remote_active: true,
                    start_time: Some(session.start_time),
                    duration_secs: Some((now - session.start_time).num_seconds()),
                    signals: session
                        .signals
                        .iter()
                        .map(|s| SignalName {
                            name: s.name.clone(),
                        })
                        .collect(),
                }
            }
        }
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }
}
