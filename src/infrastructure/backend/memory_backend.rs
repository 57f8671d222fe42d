//! In-memory store implementation.

use super::service::{BackendError, BackendResult, RedirectBackend, ScanPage};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Fallback count applied when a scan is requested with a non-positive
/// count, mirroring Redis behavior when the COUNT argument is omitted.
const DEFAULT_SCAN_COUNT: i64 = 10;

/// An in-memory implementation of the redirect store.
///
/// Used by the test suite and as a development fallback when no Redis
/// address is configured. Data does not survive a restart.
///
/// Cursor emulation: keys are held in an ordered map and the cursor is the
/// index of the next key to visit. A returned cursor of `0` means the scan
/// is exhausted, matching the backend contract. Like a real cursor scan,
/// enumeration is only stable in the absence of concurrent writes.
#[derive(Default)]
pub struct MemoryBackend {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryBackend {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        debug!("Using MemoryBackend (data is not persisted)");
        Self::default()
    }
}

#[async_trait]
impl RedirectBackend for MemoryBackend {
    async fn get(&self, key: &str) -> BackendResult<String> {
        self.entries
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(key.to_string()))
    }

    async fn set(&self, key: &str, value: &str) -> BackendResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> BackendResult<()> {
        match self.entries.write().await.remove(key) {
            Some(_) => Ok(()),
            None => Err(BackendError::NotFound(key.to_string())),
        }
    }

    async fn scan(&self, count: i64, cursor: u64) -> BackendResult<ScanPage> {
        let entries = self.entries.read().await;

        let take = if count > 0 {
            count as usize
        } else {
            DEFAULT_SCAN_COUNT as usize
        };
        let start = cursor as usize;

        let mut page = ScanPage::default();
        for (key, value) in entries.iter().skip(start).take(take) {
            page.pairs.insert(key.clone(), value.clone());
        }

        let next = start.saturating_add(take);
        page.next_cursor = if next >= entries.len() { 0 } else { next as u64 };

        Ok(page)
    }

    async fn count_all(&self) -> BackendResult<i64> {
        Ok(self.entries.read().await.len() as i64)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
