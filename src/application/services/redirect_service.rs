//! Resource-level access to the redirect store.

use std::sync::Arc;

use crate::infrastructure::backend::{BackendResult, RedirectBackend, ScanPage};

/// Thin façade translating redirect-resource operations into key-value
/// operations on the backend.
///
/// The service owns all key-value interaction; handlers own the
/// request/response lifecycle only. Nothing is cached or held across
/// requests — every call goes to the backend.
pub struct RedirectService {
    backend: Arc<dyn RedirectBackend>,
}

impl RedirectService {
    /// Creates a new redirect service over the given backend.
    pub fn new(backend: Arc<dyn RedirectBackend>) -> Self {
        Self { backend }
    }

    /// Fetches the destination stored for `from`.
    ///
    /// # Errors
    ///
    /// [`crate::infrastructure::backend::BackendError::NotFound`] when no
    /// redirect exists for `from`; other variants for store failures.
    pub async fn get_redirect(&self, from: &str) -> BackendResult<String> {
        self.backend.get(from).await
    }

    /// Unconditionally writes the `from` → `to` mapping.
    ///
    /// The backend's set operation cannot report create-vs-overwrite, so
    /// callers that need the distinction must probe with
    /// [`Self::get_redirect`] first. The probe-then-write sequence is not
    /// atomic: two concurrent upserts to the same key can both observe
    /// "absent" and both report a create, or one write can clobber the
    /// other. This is an accepted trade-off, not an invariant.
    pub async fn upsert_redirect(&self, from: &str, to: &str) -> BackendResult<()> {
        self.backend.set(from, to).await
    }

    /// Removes the redirect stored for `from`.
    ///
    /// # Errors
    ///
    /// [`crate::infrastructure::backend::BackendError::NotFound`] when no
    /// redirect exists for `from`.
    pub async fn delete_redirect(&self, from: &str) -> BackendResult<()> {
        self.backend.delete(from).await
    }

    /// Performs one scan step over stored redirects.
    ///
    /// A single call can return fewer than `count` pairs while more remain;
    /// full enumeration requires re-issuing with the returned cursor until
    /// it comes back as `0`.
    pub async fn list_redirects(&self, count: i64, cursor: u64) -> BackendResult<ScanPage> {
        self.backend.scan(count, cursor).await
    }

    /// Counts all stored redirects.
    ///
    /// Computed independently of any scan; under concurrent writes it can
    /// disagree with the number of items obtainable by full pagination.
    /// Best-effort metric only.
    pub async fn total_count(&self) -> BackendResult<i64> {
        self.backend.count_all().await
    }

    /// Checks whether the backing store is reachable.
    pub async fn health_check(&self) -> bool {
        self.backend.health_check().await
    }
}
