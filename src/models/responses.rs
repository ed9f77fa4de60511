//! Response DTOs for the cache HTTP API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::{Record, RecordKey, RecordType};

/// A record as returned over HTTP, with its derived expiration time.
#[derive(Debug, Clone, Serialize)]
pub struct RecordResponse {
    pub name: String,
    pub record_type: RecordType,
    pub ttl: u64,
    pub cached_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<Record> for RecordResponse {
    fn from(record: Record) -> Self {
        let expires_at = record.expires_at();
        Self {
            name: record.key.name,
            record_type: record.key.record_type,
            ttl: record.ttl,
            cached_at: record.cached_at,
            expires_at,
        }
    }
}

/// Response body for the upsert operation (PUT /records)
#[derive(Debug, Clone, Serialize)]
pub struct UpsertResponse {
    /// Success message
    pub message: String,
    pub record: RecordResponse,
}

impl UpsertResponse {
    pub fn new(record: Record) -> Self {
        Self {
            message: format!("Record '{}' cached successfully", record.key),
            record: record.into(),
        }
    }
}

/// Response body for the delete operation (DELETE /records/:name/:record_type)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was removed
    pub key: RecordKey,
}

impl DeleteResponse {
    pub fn new(key: RecordKey) -> Self {
        Self {
            message: format!("Record '{}' removed successfully", key),
            key,
        }
    }
}

/// Response body for the snapshot endpoint (GET /records)
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotResponse {
    pub count: usize,
    /// Records in ascending expiration order
    pub records: Vec<RecordResponse>,
}

impl SnapshotResponse {
    pub fn new(snapshot: Vec<(RecordKey, Record)>) -> Self {
        let records: Vec<RecordResponse> = snapshot
            .into_iter()
            .map(|(_, record)| record.into())
            .collect();
        Self {
            count: records.len(),
            records,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, ttl: u64) -> Record {
        let cached_at = DateTime::from_timestamp(0, 0).unwrap();
        Record::new(RecordKey::new(name, "A"), ttl, cached_at)
    }

    #[test]
    fn test_record_response_includes_expiry() {
        let resp = RecordResponse::from(record("a.test", 600));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["name"], "a.test");
        assert_eq!(json["record_type"], "A");
        assert_eq!(json["ttl"], 600);
        assert_eq!(json["expires_at"], "1970-01-01T00:10:00Z");
    }

    #[test]
    fn test_upsert_response_message() {
        let resp = UpsertResponse::new(record("a.test", 60));
        assert!(resp.message.contains("a.test (A)"));
    }

    #[test]
    fn test_delete_response_serialize() {
        let resp = DeleteResponse::new(RecordKey::new("gone.test", "MX"));
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("gone.test"));
        assert!(json.contains("removed"));
    }

    #[test]
    fn test_snapshot_response_keeps_order() {
        let resp = SnapshotResponse::new(vec![
            (RecordKey::new("b.test", "A"), record("b.test", 10)),
            (RecordKey::new("a.test", "A"), record("a.test", 600)),
        ]);
        assert_eq!(resp.count, 2);
        assert_eq!(resp.records[0].name, "b.test");
        assert_eq!(resp.records[1].name, "a.test");
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
