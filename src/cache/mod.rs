//! Cache Module
//!
//! Provides the expiry-indexed record cache: a keyed record store kept in
//! lockstep with a time-ordered expiry index, and the sweep that refreshes
//! records nearing expiry and evicts expired ones.

mod handle;
mod index;
mod jitter;
mod record;
mod stats;
mod store;
mod sweep;


// Re-export public types
pub use handle::CacheHandle;
pub use index::ExpiryIndex;
pub use jitter::{FixedJitter, RefreshJitter, UniformJitter};
pub use record::{Record, RecordKey, RecordType, RecordUpdate};
pub use stats::CacheStats;
pub use store::{IngestReport, Lookup, RecordCache, RejectedUpdate};
pub use sweep::{Observation, SweepOrdering, SweepReport};

// == Public Constants ==
/// Lower bound of the refresh window, as a fraction of the TTL
pub const REFRESH_WINDOW_MIN: f64 = 0.70;

/// Upper bound of the refresh window, as a fraction of the TTL
pub const REFRESH_WINDOW_MAX: f64 = 0.90;

/// Maximum allowed record name length in bytes
pub const MAX_NAME_LENGTH: usize = 253;
