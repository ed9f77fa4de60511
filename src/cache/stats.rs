//! Cache Statistics Module
//!
//! Tracks sweep activity and lookup observations.

use serde::Serialize;

// == Cache Stats ==
/// Counters describing what the cache has done so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of sweeps run
    pub sweeps: u64,
    /// Number of records refreshed by sweeps
    pub refreshed: u64,
    /// Number of records evicted by sweeps
    pub evicted: u64,
    /// Number of records explicitly removed by callers
    pub removed: u64,
    /// Number of lookups that found an expired record
    pub stale_lookups: u64,
    /// Current number of records in the cache
    pub total_records: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Sweep ==
    /// Folds the outcome of one sweep into the counters.
    pub fn record_sweep(&mut self, refreshed: usize, evicted: usize) {
        self.sweeps += 1;
        self.refreshed += refreshed as u64;
        self.evicted += evicted as u64;
    }

    // == Record Removal ==
    pub fn record_removal(&mut self) {
        self.removed += 1;
    }

    // == Update Record Count ==
    /// Updates the total records count.
    pub fn set_total_records(&mut self, count: usize) {
        self.total_records = count;
    }
}
