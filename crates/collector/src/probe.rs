//! Probe abstraction.

use async_trait::async_trait;
use sentinel_core::{Result, Signal};

/// One source of remote-control signals.
///
/// A scan returns every signal currently observable by this probe. Errors are
/// transient by definition: the collector logs and skips them.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Stable name used in logs.
    fn name(&self) -> &'static str;

    /// Observe the OS once.
    async fn scan(&self) -> Result<Vec<Signal>>;
}
