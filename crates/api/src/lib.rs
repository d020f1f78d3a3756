//! HTTP API layer for the detection daemon.
//!
//! Localhost-only, unauthenticated, read-mostly. Handlers never mutate
//! session state; the detection loop is the single writer.

pub mod response;
pub mod routes;
pub mod state;

pub use response::ApiError;
pub use routes::router;
pub use state::AppState;
