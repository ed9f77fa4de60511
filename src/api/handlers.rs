//! API Handlers
//!
//! HTTP request handlers exposing the record cache to the surrounding process.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;

use crate::cache::{CacheHandle, CacheStats, IngestReport, RecordCache, RecordKey, SweepReport};
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteResponse, HealthResponse, IngestRequest, RecordResponse, SnapshotResponse,
    UpsertRequest, UpsertResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache handle
    pub cache: CacheHandle,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: RecordCache) -> Self {
        Self {
            cache: CacheHandle::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(RecordCache::from_config(config))
    }
}

/// Handler for PUT /records
///
/// Stores or replaces one record.
pub async fn upsert_handler(
    State(state): State<AppState>,
    Json(req): Json<UpsertRequest>,
) -> Result<Json<UpsertResponse>> {
    req.validate()?;

    let record = state.cache.upsert(req.key(), req.ttl).await?;

    Ok(Json(UpsertResponse::new(record)))
}

/// Handler for POST /records/batch
///
/// Feeds a batch of record-source tuples; invalid tuples are reported
/// individually and never fail the whole batch.
pub async fn ingest_handler(
    State(state): State<AppState>,
    Json(req): Json<IngestRequest>,
) -> Json<IngestReport> {
    Json(state.cache.ingest(req.records).await)
}

/// Handler for GET /records/:name/:record_type
pub async fn lookup_handler(
    State(state): State<AppState>,
    Path((name, record_type)): Path<(String, String)>,
) -> Result<Json<RecordResponse>> {
    let key = RecordKey::new(name, record_type);
    let lookup = state.cache.lookup(&key).await;

    if let Some(observation) = lookup.observation() {
        debug!(?observation, "Lookup hit a stale record");
    }

    let record = lookup.into_result(&key)?;
    Ok(Json(record.into()))
}

/// Handler for DELETE /records/:name/:record_type
pub async fn delete_handler(
    State(state): State<AppState>,
    Path((name, record_type)): Path<(String, String)>,
) -> Result<Json<DeleteResponse>> {
    let key = RecordKey::new(name, record_type);

    match state.cache.remove(&key).await {
        Some(_) => Ok(Json(DeleteResponse::new(key))),
        None => Err(CacheError::NotFound(key.to_string())),
    }
}

/// Handler for GET /records
///
/// Returns every record in ascending expiration order.
pub async fn snapshot_handler(State(state): State<AppState>) -> Json<SnapshotResponse> {
    Json(SnapshotResponse::new(state.cache.snapshot().await))
}

/// Handler for POST /sweep
///
/// Runs one sweep immediately.
pub async fn sweep_handler(State(state): State<AppState>) -> Json<SweepReport> {
    Json(state.cache.sweep().await)
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats().await)
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
