//! TTL Refresh Cache - An in-memory TTL record cache
//!
//! Keeps records in a keyed store paired with an expiry index, and sweeps
//! the index to refresh records before they expire and evict expired ones.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheHandle, RecordCache};
pub use config::Config;
pub use tasks::spawn_sweep_task;
