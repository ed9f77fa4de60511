//! API Module
//!
//! HTTP handlers and routing for the record cache.
//!
//! # Endpoints
//! - `PUT /records` - Upsert one record
//! - `POST /records/batch` - Ingest a batch from a record source
//! - `GET /records` - Snapshot of all records, soonest expiry first
//! - `GET /records/:name/:record_type` - Look up a record
//! - `DELETE /records/:name/:record_type` - Remove a record
//! - `POST /sweep` - Run a sweep now
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
