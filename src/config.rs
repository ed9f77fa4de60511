//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::SweepOrdering;

/// Cache and server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Interval in seconds between background sweeps
    pub sweep_interval: u64,
    /// Maximum index entries visited per sweep (0 = unlimited)
    pub max_records_per_sweep: usize,
    /// Smallest TTL in seconds accepted from a record source
    pub min_ingest_ttl: u64,
    /// Largest TTL in seconds accepted from a record source
    pub max_ingest_ttl: u64,
    /// Seed for the refresh jitter; entropy-seeded when unset
    pub refresh_seed: Option<u64>,
    /// Treatment of entries both due for refresh and expired
    pub sweep_ordering: SweepOrdering,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3030)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 10)
    /// - `MAX_RECORDS_PER_SWEEP` - Entries visited per sweep, 0 = all (default: 100)
    /// - `MIN_INGEST_TTL` - Smallest accepted source TTL (default: 15)
    /// - `MAX_INGEST_TTL` - Largest accepted source TTL (default: 7200)
    /// - `REFRESH_SEED` - Jitter seed (default: unset)
    /// - `SWEEP_ORDERING` - `refresh-then-evict` or `refresh-wins` (default: refresh-then-evict)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            sweep_interval: env_or("SWEEP_INTERVAL", defaults.sweep_interval),
            max_records_per_sweep: env_or("MAX_RECORDS_PER_SWEEP", defaults.max_records_per_sweep),
            min_ingest_ttl: env_or("MIN_INGEST_TTL", defaults.min_ingest_ttl),
            max_ingest_ttl: env_or("MAX_INGEST_TTL", defaults.max_ingest_ttl),
            refresh_seed: env::var("REFRESH_SEED").ok().and_then(|v| v.parse().ok()),
            sweep_ordering: env_or("SWEEP_ORDERING", defaults.sweep_ordering),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3030,
            sweep_interval: 10,
            max_records_per_sweep: 100,
            min_ingest_ttl: 15,
            max_ingest_ttl: 7200,
            refresh_seed: None,
            sweep_ordering: SweepOrdering::RefreshThenEvict,
        }
    }
}

/// Parses `name` from the environment, falling back to `default` when the
/// variable is unset or malformed.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
