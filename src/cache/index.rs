//! Expiry Index Module
//!
//! Orders record keys by expiration time so sweeps can visit the records
//! that expire soonest without scanning the whole store.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};

use crate::cache::RecordKey;

// == Expiry Index ==
/// Ordered mapping from expiration time to the keys expiring at that time.
///
/// Several keys may share one timestamp; each `(timestamp, key)` pair is an
/// independent entry. Empty buckets are never kept.
#[derive(Debug, Default, Clone)]
pub struct ExpiryIndex {
    buckets: BTreeMap<DateTime<Utc>, BTreeSet<RecordKey>>,
    len: usize,
}

impl ExpiryIndex {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Insert ==
    /// Adds a `(expires_at, key)` pair.
    ///
    /// Returns false if the exact pair was already present.
    pub fn insert(&mut self, expires_at: DateTime<Utc>, key: RecordKey) -> bool {
        let inserted = self.buckets.entry(expires_at).or_default().insert(key);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    // == Remove ==
    /// Removes exactly the `(expires_at, key)` pair, leaving other keys that
    /// share the timestamp untouched.
    ///
    /// Returns false if the pair was not present.
    pub fn remove(&mut self, expires_at: DateTime<Utc>, key: &RecordKey) -> bool {
        let Some(bucket) = self.buckets.get_mut(&expires_at) else {
            return false;
        };

        let removed = bucket.remove(key);
        if bucket.is_empty() {
            self.buckets.remove(&expires_at);
        }
        if removed {
            self.len -= 1;
        }
        removed
    }

    // == Contains ==
    pub fn contains(&self, expires_at: DateTime<Utc>, key: &RecordKey) -> bool {
        self.buckets
            .get(&expires_at)
            .is_some_and(|bucket| bucket.contains(key))
    }

    // == Iteration ==
    /// Iterates all pairs in ascending expiration order.
    pub fn iter(&self) -> impl Iterator<Item = (DateTime<Utc>, &RecordKey)> + '_ {
        self.buckets
            .iter()
            .flat_map(|(expires_at, keys)| keys.iter().map(move |key| (*expires_at, key)))
    }

    // == Snapshot ==
    /// Copies the pairs in ascending expiration order, detached from the
    /// index so the caller may mutate it while walking the copy.
    ///
    /// `limit` caps the number of pairs taken from the front.
    pub fn snapshot(&self, limit: Option<usize>) -> Vec<(DateTime<Utc>, RecordKey)> {
        let pairs = self
            .iter()
            .map(|(expires_at, key)| (expires_at, key.clone()));
        match limit {
            Some(limit) => pairs.take(limit).collect(),
            None => pairs.collect(),
        }
    }

    /// Returns the earliest expiration time, if any.
    pub fn earliest(&self) -> Option<DateTime<Utc>> {
        self.buckets.keys().next().copied()
    }

    // == Length ==
    /// Returns the number of pairs in the index.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
