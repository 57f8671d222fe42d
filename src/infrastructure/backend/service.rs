//! Backend trait and error types.

use async_trait::async_trait;
use std::collections::HashMap;

/// Errors that can occur during backend operations.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The backend reports the key is absent. This is the only backend
    /// failure handlers are allowed to act on; everything else surfaces as
    /// an internal error.
    #[error("key {0} not found")]
    NotFound(String),

    #[error("backend connection error: {0}")]
    Connection(String),

    #[error("backend operation error: {0}")]
    Operation(String),
}

impl BackendError {
    /// Returns true when the error means "the key is absent".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// One step of a cursor scan over the backend keyspace.
///
/// A cursor of `0` in `next_cursor` means the scan is exhausted. Exhaustion
/// is not "all keys seen in one call": a step can legitimately return fewer
/// than the requested count (even zero) while more keys remain; callers must
/// re-issue the scan with the returned cursor for full enumeration.
#[derive(Debug, Default)]
pub struct ScanPage {
    /// Unordered `from` → `to` pairs collected during this step.
    pub pairs: HashMap<String, String>,
    /// Continuation token for the next step; `0` terminates.
    pub next_cursor: u64,
}

/// Capability trait for the key-value store holding redirect mappings.
///
/// Implementations must be thread-safe. Each method maps to a single store
/// call; no implementation performs multi-call sequences, so the store's own
/// per-call atomicity is the only atomicity callers can rely on.
///
/// # Implementations
///
/// - [`crate::infrastructure::backend::RedisBackend`] - Redis over a managed connection
/// - [`crate::infrastructure::backend::MemoryBackend`] - In-memory map with cursor emulation
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedirectBackend: Send + Sync {
    /// Fetches the value stored under `key`.
    ///
    /// # Errors
    ///
    /// [`BackendError::NotFound`] when the key is absent; other variants for
    /// store failures.
    async fn get(&self, key: &str) -> BackendResult<String>;

    /// Unconditionally stores `value` under `key`.
    ///
    /// The store does not report whether the write created or overwrote;
    /// callers needing that distinction must probe first.
    async fn set(&self, key: &str, value: &str) -> BackendResult<()>;

    /// Removes `key`.
    ///
    /// # Errors
    ///
    /// [`BackendError::NotFound`] when the key was absent.
    async fn delete(&self, key: &str) -> BackendResult<()>;

    /// Performs one cursor-scan step returning at most roughly `count`
    /// key-value pairs. `cursor` is `0` to start or a token from a previous
    /// step to continue.
    async fn scan(&self, count: i64, cursor: u64) -> BackendResult<ScanPage>;

    /// Counts all keys in the store. Independent of any in-flight scan and
    /// not consistent with it under concurrent writes.
    async fn count_all(&self) -> BackendResult<i64>;

    /// Checks whether the store is reachable.
    async fn health_check(&self) -> bool;
}
