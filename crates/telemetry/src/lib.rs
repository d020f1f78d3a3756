//! Structured logging and component health for the daemon.

pub mod health;
pub mod tracing_setup;

pub use health::{health, ComponentHealth, HealthReport, HealthStatus};
pub use tracing_setup::{init_tracing, init_tracing_from_env, TracingConfig};
