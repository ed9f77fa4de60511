//! Cache Handle Module
//!
//! Cloneable, thread-safe handle to a [`RecordCache`] that stamps every
//! operation with the current wall-clock time.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::cache::{
    CacheStats, IngestReport, Lookup, Record, RecordCache, RecordKey, RecordUpdate, SweepReport,
};
use crate::error::Result;

// == Cache Handle ==
/// Shared access to one cache instance.
///
/// The record map and the expiry index sit behind a single lock, so a
/// mutation or sweep is never observed half done. Lookups only take the
/// read lock and may run side by side.
#[derive(Debug, Clone)]
pub struct CacheHandle {
    inner: Arc<RwLock<RecordCache>>,
}

impl CacheHandle {
    pub fn new(cache: RecordCache) -> Self {
        Self {
            inner: Arc::new(RwLock::new(cache)),
        }
    }

    /// Stores or replaces the record for `(name, record_type)`.
    pub async fn upsert(&self, key: RecordKey, ttl: i64) -> Result<Record> {
        let mut cache = self.inner.write().await;
        cache.upsert(key, ttl, Utc::now()).cloned()
    }

    pub async fn lookup(&self, key: &RecordKey) -> Lookup {
        let cache = self.inner.read().await;
        cache.lookup(key, Utc::now())
    }

    pub async fn remove(&self, key: &RecordKey) -> Option<Record> {
        let mut cache = self.inner.write().await;
        cache.remove(key)
    }

    pub async fn ingest(&self, updates: Vec<RecordUpdate>) -> IngestReport {
        let mut cache = self.inner.write().await;
        cache.ingest(updates, Utc::now())
    }

    pub async fn sweep(&self) -> SweepReport {
        let mut cache = self.inner.write().await;
        cache.sweep(Utc::now())
    }

    pub async fn snapshot(&self) -> Vec<(RecordKey, Record)> {
        let cache = self.inner.read().await;
        cache.snapshot()
    }

    pub async fn stats(&self) -> CacheStats {
        let cache = self.inner.read().await;
        cache.stats()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

impl From<RecordCache> for CacheHandle {
    fn from(cache: RecordCache) -> Self {
        Self::new(cache)
    }
}
