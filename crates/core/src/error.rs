//! Unified error types for the daemon.
//!
//! The taxonomy maps directly onto the API surface:
//! - `TransientCollection`: one failed poll cycle, logged and skipped, never
//!   surfaced to API callers.
//! - `Persistence`: history or config write failure, surfaced as 5xx; writes
//!   are atomic-or-nothing so prior durable state stays intact.
//! - `InvalidArgument` / `InvalidConfig`: caller mistakes, 4xx.
//! - `NotFound`: reserved for future lookups by id.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the daemon.
#[derive(Debug, Error)]
pub enum Error {
    /// A single collection cycle failed. Never fatal.
    #[error("collection error: {0}")]
    TransientCollection(String),

    /// Durable write or read against the history/config store failed.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Bad caller input (pagination bounds, unknown parameters).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Notification config failed shape validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Reserved: no lookup in the current surface returns this.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn collection(msg: impl Into<String>) -> Self {
        Self::TransientCollection(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::TransientCollection(_) => 500,
            Self::Persistence(_) => 500,
            Self::InvalidArgument(_) => 400,
            Self::InvalidConfig(_) => 400,
            Self::NotFound(_) => 404,
            Self::Serialization(_) => 400,
            Self::Internal(_) => 500,
        }
    }
}
