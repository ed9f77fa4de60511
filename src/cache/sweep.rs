//! Sweep Module
//!
//! Walks the expiry index from the soonest-expiring entry onward,
//! refreshing records that are inside their refresh window and evicting
//! records that have expired.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cache::record::seconds_between;
use crate::cache::{RecordCache, RecordKey};
use crate::error::CacheError;

// == Sweep Ordering ==
/// How a sweep treats an entry that is both due for refresh and expired.
///
/// Both checks are evaluated against the expiration time captured in the
/// sweep's snapshot, not against the value a refresh just produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SweepOrdering {
    /// Refresh when due, then evict when expired. An expired entry is
    /// refreshed and immediately evicted, so it is gone after the sweep.
    #[default]
    RefreshThenEvict,
    /// Refresh and eviction are mutually exclusive; a due entry is refreshed
    /// and kept even if it had already expired. A zero-TTL record cannot be
    /// kept alive by a refresh, so it is evicted instead.
    RefreshWins,
}

impl FromStr for SweepOrdering {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "refresh-then-evict" => Ok(SweepOrdering::RefreshThenEvict),
            "refresh-wins" => Ok(SweepOrdering::RefreshWins),
            other => Err(CacheError::InvalidRequest(format!(
                "Unknown sweep ordering '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for SweepOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepOrdering::RefreshThenEvict => f.write_str("refresh-then-evict"),
            SweepOrdering::RefreshWins => f.write_str("refresh-wins"),
        }
    }
}

// == Observation ==
/// Structured event describing something the cache did or noticed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Observation {
    /// A record inside its refresh window was re-cached
    Refreshed {
        key: RecordKey,
        previous_expires_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    },
    /// An expired record was removed by a sweep
    Evicted {
        key: RecordKey,
        expired_at: DateTime<Utc>,
    },
    /// A lookup found a record whose TTL had elapsed
    ExpiredOnLookup {
        key: RecordKey,
        expired_at: DateTime<Utc>,
    },
}

// == Sweep Report ==
/// Summary of one sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub swept_at: DateTime<Utc>,
    /// Snapshot entries evaluated
    pub visited: usize,
    /// Snapshot entries whose record was gone or had moved
    pub skipped: usize,
    /// True when the per-sweep cap left entries unvisited
    pub truncated: bool,
    pub refreshed: Vec<RecordKey>,
    pub evicted: Vec<RecordKey>,
    /// Observations in the order they happened
    pub events: Vec<Observation>,
}

impl SweepReport {
    fn new(swept_at: DateTime<Utc>) -> Self {
        Self {
            swept_at,
            visited: 0,
            skipped: 0,
            truncated: false,
            refreshed: Vec::new(),
            evicted: Vec::new(),
            events: Vec::new(),
        }
    }

    /// True when the sweep changed nothing.
    pub fn is_noop(&self) -> bool {
        self.refreshed.is_empty() && self.evicted.is_empty()
    }
}

impl RecordCache {
    // == Sweep ==
    /// Runs one refresh/eviction pass as of `now`.
    ///
    /// The walk covers a copy of the index taken up front, in ascending
    /// expiration order, so entries inserted or removed during the pass are
    /// neither skipped nor visited twice. For each entry a refresh window of
    /// `U(0.70, 0.90) * ttl` is drawn; the record is refreshed when the time
    /// left until its expiration is within that window, and evicted when it
    /// has expired.
    pub fn sweep(&mut self, now: DateTime<Utc>) -> SweepReport {
        let mut report = SweepReport::new(now);
        let snapshot = self.index.snapshot(self.max_records_per_sweep);
        report.truncated = snapshot.len() < self.index.len();

        for (expires_at, key) in snapshot {
            let ttl = match self.records.get(&key) {
                Some(record) if record.expires_at() == expires_at => record.ttl,
                _ => {
                    report.skipped += 1;
                    continue;
                }
            };
            report.visited += 1;

            let refresh_window = self.jitter.refresh_factor() * ttl as f64;
            let due = seconds_between(now, expires_at) <= refresh_window;
            let expired = expires_at <= now;
            let (refresh, evict) = match self.ordering {
                SweepOrdering::RefreshThenEvict => (due, expired),
                SweepOrdering::RefreshWins => {
                    let refresh = due && ttl > 0;
                    (refresh, expired && !refresh)
                }
            };

            if refresh {
                let refreshed_until = self.insert_record(key.clone(), ttl, now).expires_at();
                info!(key = %key, expires_at = %refreshed_until, "Refreshing record before expiry");
                report.events.push(Observation::Refreshed {
                    key: key.clone(),
                    previous_expires_at: expires_at,
                    expires_at: refreshed_until,
                });
                report.refreshed.push(key.clone());
            }

            if evict && self.remove_record(&key).is_some() {
                info!(key = %key, expired_at = %expires_at, "Evicting expired record");
                report.events.push(Observation::Evicted {
                    key: key.clone(),
                    expired_at: expires_at,
                });
                report.evicted.push(key);
            }
        }

        self.stats
            .record_sweep(report.refreshed.len(), report.evicted.len());
        debug!(
            visited = report.visited,
            skipped = report.skipped,
            refreshed = report.refreshed.len(),
            evicted = report.evicted.len(),
            "Sweep finished"
        );
        report
    }
}
