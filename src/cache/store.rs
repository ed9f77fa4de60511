//! Cache Store Module
//!
//! Main cache engine pairing the record map with the expiry index.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::cache::{
    CacheStats, ExpiryIndex, Observation, Record, RecordKey, RecordUpdate, RefreshJitter,
    SweepOrdering, UniformJitter,
};
use crate::config::Config;
use crate::error::{CacheError, Result};

// == Lookup ==
/// Outcome of a point lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// A live record
    Found(Record),
    /// No record is stored under the key
    Missing,
    /// A record is stored but its TTL has elapsed; it stays until swept
    Stale(Record),
}

impl Lookup {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// Returns the live record, if any.
    pub fn record(&self) -> Option<&Record> {
        match self {
            Lookup::Found(record) => Some(record),
            _ => None,
        }
    }

    /// The expired-on-lookup observation for a stale hit.
    pub fn observation(&self) -> Option<Observation> {
        match self {
            Lookup::Stale(record) => Some(Observation::ExpiredOnLookup {
                key: record.key.clone(),
                expired_at: record.expires_at(),
            }),
            _ => None,
        }
    }

    /// Converts a miss into the matching error.
    pub fn into_result(self, key: &RecordKey) -> Result<Record> {
        match self {
            Lookup::Found(record) => Ok(record),
            Lookup::Missing => Err(CacheError::NotFound(key.to_string())),
            Lookup::Stale(_) => Err(CacheError::Expired(key.to_string())),
        }
    }
}

// == Ingest Report ==
/// A record-source tuple that was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedUpdate {
    pub update: RecordUpdate,
    pub reason: String,
}

/// Outcome of feeding a batch of record-source tuples into the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Keys upserted into the cache
    pub accepted: Vec<RecordKey>,
    /// Keys whose TTL fell outside the configured ingest bounds
    pub skipped: Vec<RecordKey>,
    /// Tuples rejected as invalid
    pub rejected: Vec<RejectedUpdate>,
}

// == Record Cache ==
/// Expiry-indexed record cache.
///
/// Every stored key has exactly one index entry at its record's current
/// expiration time, and the index never references a key that is not
/// stored. All mutating operations keep that true before returning.
#[derive(Debug)]
pub struct RecordCache {
    /// Current record per key
    pub(super) records: HashMap<RecordKey, Record>,
    /// Expiration time -> keys
    pub(super) index: ExpiryIndex,
    /// Refresh window source, drawn per evaluated entry
    pub(super) jitter: Box<dyn RefreshJitter>,
    pub(super) ordering: SweepOrdering,
    /// Cap on entries visited per sweep, None = unlimited
    pub(super) max_records_per_sweep: Option<usize>,
    /// Exclusive (min, max) TTL bounds for record-source tuples, in seconds
    ingest_ttl: Option<(u64, u64)>,
    pub(super) stats: CacheStats,
    stale_lookups: AtomicU64,
}

impl RecordCache {
    // == Constructor ==
    /// Creates an empty cache drawing refresh windows from `jitter`.
    pub fn new(jitter: impl RefreshJitter + 'static) -> Self {
        Self {
            records: HashMap::new(),
            index: ExpiryIndex::new(),
            jitter: Box::new(jitter),
            ordering: SweepOrdering::default(),
            max_records_per_sweep: None,
            ingest_ttl: None,
            stats: CacheStats::new(),
            stale_lookups: AtomicU64::new(0),
        }
    }

    /// Creates a cache configured from `config`.
    pub fn from_config(config: &Config) -> Self {
        let jitter = match config.refresh_seed {
            Some(seed) => UniformJitter::seeded(seed),
            None => UniformJitter::from_entropy(),
        };

        Self::new(jitter)
            .with_ordering(config.sweep_ordering)
            .with_max_records_per_sweep(config.max_records_per_sweep)
            .with_ingest_ttl_bounds(config.min_ingest_ttl, config.max_ingest_ttl)
    }

    /// Sets how a sweep treats entries that are both due and expired.
    pub fn with_ordering(mut self, ordering: SweepOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    /// Caps the entries visited per sweep; 0 means unlimited.
    pub fn with_max_records_per_sweep(mut self, max: usize) -> Self {
        self.max_records_per_sweep = (max > 0).then_some(max);
        self
    }

    /// Restricts [`RecordCache::ingest`] to TTLs strictly between `min`
    /// and `max`.
    pub fn with_ingest_ttl_bounds(mut self, min: u64, max: u64) -> Self {
        self.ingest_ttl = Some((min, max));
        self
    }

    // == Upsert ==
    /// Stores a record for `key` cached at `now`, replacing any previous one.
    ///
    /// The previous record's index entry is removed first; only that exact
    /// `(expires_at, key)` pair is touched. A TTL of zero is accepted and
    /// yields a record that is already expired.
    ///
    /// # Errors
    /// - `InvalidTtl` if `ttl` is negative
    /// - `InvalidRequest` if the name is blank or too long, or the category
    ///   is empty
    ///
    /// The cache is left untouched on error.
    pub fn upsert(&mut self, key: RecordKey, ttl: i64, now: DateTime<Utc>) -> Result<&Record> {
        key.validate()?;
        let ttl = u64::try_from(ttl).map_err(|_| CacheError::InvalidTtl(ttl))?;

        Ok(self.insert_record(key, ttl, now))
    }

    /// Replaces the record and its index entry. The TTL is already validated.
    pub(super) fn insert_record(&mut self, key: RecordKey, ttl: u64, now: DateTime<Utc>) -> &Record {
        if let Some(previous) = self.records.get(&key) {
            let previous_expiry = previous.expires_at();
            self.index.remove(previous_expiry, &key);
        }

        let record = Record::new(key.clone(), ttl, now);
        self.index.insert(record.expires_at(), key.clone());
        debug!(key = %key, ttl, expires_at = %record.expires_at(), "Record upserted");

        self.records.insert(key.clone(), record);
        self.stats.set_total_records(self.records.len());
        &self.records[&key]
    }

    // == Lookup ==
    /// Looks up `key` as of `now`.
    ///
    /// Never mutates the cache: a stale record stays stored until a sweep
    /// evicts it, and is reported as [`Lookup::Stale`].
    pub fn lookup(&self, key: &RecordKey, now: DateTime<Utc>) -> Lookup {
        match self.records.get(key) {
            Some(record) if now < record.expires_at() => Lookup::Found(record.clone()),
            Some(record) => {
                self.stale_lookups.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, expired_at = %record.expires_at(), "Stale record observed on lookup");
                Lookup::Stale(record.clone())
            }
            None => Lookup::Missing,
        }
    }

    // == Remove ==
    /// Removes the record for `key` together with its index entry.
    pub fn remove(&mut self, key: &RecordKey) -> Option<Record> {
        let removed = self.remove_record(key)?;
        self.stats.record_removal();
        Some(removed)
    }

    pub(super) fn remove_record(&mut self, key: &RecordKey) -> Option<Record> {
        let record = self.records.remove(key)?;
        self.index.remove(record.expires_at(), key);
        self.stats.set_total_records(self.records.len());
        debug!(key = %key, "Record removed");
        Some(record)
    }

    // == Ingest ==
    /// Feeds a batch of record-source tuples into the cache at `now`.
    ///
    /// Each tuple is validated on its own; an invalid one is reported and
    /// the rest of the batch still goes through. Tuples with a TTL outside
    /// the ingest bounds are skipped.
    pub fn ingest<I>(&mut self, updates: I, now: DateTime<Utc>) -> IngestReport
    where
        I: IntoIterator<Item = RecordUpdate>,
    {
        let mut report = IngestReport::default();

        for update in updates {
            let key = update.key();
            if !self.has_reasonable_ttl(update.ttl) {
                debug!(key = %key, ttl = update.ttl, "Skipping record with out-of-bounds TTL");
                report.skipped.push(key);
                continue;
            }

            match self.upsert(key.clone(), update.ttl, now) {
                Ok(_) => report.accepted.push(key),
                Err(err) => report.rejected.push(RejectedUpdate {
                    update,
                    reason: err.to_string(),
                }),
            }
        }

        report
    }

    /// Negative TTLs pass so that upsert rejects them.
    fn has_reasonable_ttl(&self, ttl: i64) -> bool {
        match (self.ingest_ttl, u64::try_from(ttl)) {
            (Some((min, max)), Ok(ttl)) => ttl > min && ttl < max,
            _ => true,
        }
    }

    // == Snapshot ==
    /// Returns every stored record in ascending expiration order.
    pub fn snapshot(&self) -> Vec<(RecordKey, Record)> {
        self.index
            .iter()
            .filter_map(|(_, key)| self.records.get(key))
            .map(|record| (record.key.clone(), record.clone()))
            .collect()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.stale_lookups = self.stale_lookups.load(Ordering::Relaxed);
        stats.set_total_records(self.records.len());
        stats
    }

    /// Returns the record stored for `key`, expired or not.
    pub fn get(&self, key: &RecordKey) -> Option<&Record> {
        self.records.get(key)
    }

    /// Returns the expiry index.
    pub fn index(&self) -> &ExpiryIndex {
        &self.index
    }

    // == Consistency ==
    /// Checks that records and index entries correspond one to one.
    pub fn is_consistent(&self) -> bool {
        self.index.len() == self.records.len()
            && self
                .records
                .iter()
                .all(|(key, record)| self.index.contains(record.expires_at(), key))
    }

    // == Length ==
    /// Returns the current number of records in the cache.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for RecordCache {
    fn default() -> Self {
        Self::new(UniformJitter::default())
    }
}
