//! Request DTOs for the cache HTTP API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::cache::{RecordKey, RecordType, RecordUpdate};
use crate::error::Result;

/// Request body for upserting one record (PUT /records)
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertRequest {
    /// Record name, e.g. a domain name
    pub name: String,
    /// Record category, e.g. "A" or "AAAA"
    pub record_type: RecordType,
    /// TTL in seconds
    pub ttl: i64,
}

impl UpsertRequest {
    /// Validates the request data with the same rules the cache applies to
    /// record-source tuples.
    pub fn validate(&self) -> Result<()> {
        self.key().validate()
    }

    pub fn key(&self) -> RecordKey {
        RecordKey::new(self.name.clone(), self.record_type.clone())
    }
}

/// Request body for feeding a batch from a record source (POST /records/batch)
#[derive(Debug, Clone, Deserialize)]
pub struct IngestRequest {
    pub records: Vec<RecordUpdate>,
}
