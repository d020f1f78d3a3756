//! Core types, error taxonomy, and limits for the remote-sentinel daemon.

pub mod error;
pub mod limits;
pub mod notification;
pub mod session;
pub mod signal;

pub use error::{Error, Result};
pub use notification::*;
pub use session::*;
pub use signal::*;
