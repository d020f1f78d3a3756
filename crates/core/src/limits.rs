//! Operational limits and inferred defaults.
//!
//! The debounce window and poll period are inferred defaults, not hard
//! invariants; both are overridable through daemon configuration.

// === Pagination ===

/// Maximum page size accepted by history queries. Larger requests are clamped.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Page size used when a paginated query omits `pageSize`.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

// === Detection loop ===

/// Default collector poll period in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Default per-probe deadline in milliseconds. A probe that blocks past this
/// counts as a failed cycle for that probe, never a stalled loop.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 2_000;

/// Default debounce window in seconds: signal loss shorter than this never
/// closes an active session.
pub const DEFAULT_DEBOUNCE_SECS: u64 = 10;

// === Notification dispatch ===

/// Webhook request timeout in seconds.
pub const WEBHOOK_TIMEOUT_SECS: u64 = 5;
