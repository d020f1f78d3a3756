//! Durable storage: session history, notification config, audit log.
//!
//! SQLite in WAL mode behind a connection pool. Every write commits before
//! the call returns; a failed write leaves prior durable state untouched.
//! The store holds closed sessions only — the tracker never persists an
//! active session, so a restart always boots into Idle.

pub mod audit;
pub mod config;
pub mod db;
pub mod sessions;

pub use audit::AuditEvent;
pub use db::Store;
