//! Sweep Task
//!
//! Background task that periodically refreshes and evicts cached records.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheHandle;

/// Spawns a background task that sweeps the cache at a fixed interval.
///
/// Each pass takes the cache's write lock for the duration of one bounded
/// sweep, then logs what was refreshed and evicted.
///
/// # Arguments
/// * `cache` - Shared handle to the cache
/// * `sweep_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_sweep_task(cache: CacheHandle, sweep_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(sweep_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting sweep task with interval of {} seconds",
            sweep_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let report = cache.sweep().await;

            if report.is_noop() {
                debug!(visited = report.visited, "Sweep: nothing to refresh or evict");
            } else {
                info!(
                    refreshed = report.refreshed.len(),
                    evicted = report.evicted.len(),
                    truncated = report.truncated,
                    "Sweep: refreshed {} and evicted {} records",
                    report.refreshed.len(),
                    report.evicted.len()
                );
            }
        }
    })
}
