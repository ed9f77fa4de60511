//! Error types for the record cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the record cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// No record exists for the key
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A record exists for the key but its TTL has elapsed
    #[error("Record expired: {0}")]
    Expired(String),

    /// Negative (or unrepresentable) TTL supplied
    #[error("Invalid TTL: {0}")]
    InvalidTtl(i64),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) | CacheError::Expired(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidTtl(_) | CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the record cache.
pub type Result<T> = std::result::Result<T, CacheError>;
