//! Signal collection: OS probes and the bounded poll cycle.
//!
//! Produces a lazy, restartable stream of [`sentinel_core::Signal`]s by
//! polling the OS at a fixed period. A probe failure or hang affects only
//! that probe's contribution for that cycle; the loop never aborts.

pub mod collector;
pub mod ports;
pub mod probe;
pub mod process;

pub use collector::{Collector, CollectorConfig};
pub use ports::RdpPortProbe;
pub use probe::Probe;
pub use process::ProcessProbe;
