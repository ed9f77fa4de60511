//! Record Module
//!
//! Defines cached records, their composite keys and the record categories.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::MAX_NAME_LENGTH;
use crate::error::{CacheError, Result};

// == Record Type ==
/// Category of a cached record.
///
/// The well-known categories get their own variant; any other token is kept
/// verbatim (upper-cased) so distinct categories never collapse into one key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Mx,
    Txt,
    Other(String),
}

impl RecordType {
    /// Returns the canonical upper-case token for this category.
    pub fn as_str(&self) -> &str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Cname => "CNAME",
            RecordType::Mx => "MX",
            RecordType::Txt => "TXT",
            RecordType::Other(token) => token,
        }
    }
}

impl From<&str> for RecordType {
    fn from(token: &str) -> Self {
        let token = token.trim().to_ascii_uppercase();
        match token.as_str() {
            "A" => RecordType::A,
            "AAAA" => RecordType::Aaaa,
            "CNAME" => RecordType::Cname,
            "MX" => RecordType::Mx,
            "TXT" => RecordType::Txt,
            _ => RecordType::Other(token),
        }
    }
}

impl From<String> for RecordType {
    fn from(token: String) -> Self {
        RecordType::from(token.as_str())
    }
}

impl From<RecordType> for String {
    fn from(record_type: RecordType) -> Self {
        record_type.as_str().to_string()
    }
}

impl FromStr for RecordType {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(CacheError::InvalidRequest(
                "Record type cannot be empty".to_string(),
            ));
        }
        Ok(RecordType::from(s))
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Record Key ==
/// Composite key identifying a record: (name, category).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordKey {
    pub name: String,
    pub record_type: RecordType,
}

impl RecordKey {
    pub fn new(name: impl Into<String>, record_type: impl Into<RecordType>) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.into(),
        }
    }

    /// Checks that the name is non-blank and short enough and that the
    /// category is non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CacheError::InvalidRequest(
                "Record name cannot be empty".to_string(),
            ));
        }
        if self.name.len() > MAX_NAME_LENGTH {
            return Err(CacheError::InvalidRequest(format!(
                "Record name exceeds maximum length of {} bytes",
                MAX_NAME_LENGTH
            )));
        }
        if self.record_type.as_str().is_empty() {
            return Err(CacheError::InvalidRequest(
                "Record type cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.record_type)
    }
}

// == Record ==
/// A cached record and its timing metadata.
///
/// The expiration time is always derived from `cached_at` and `ttl`, so the
/// two can never drift apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub key: RecordKey,
    /// Time to live in seconds, counted from `cached_at`
    pub ttl: u64,
    /// When the record was last inserted or refreshed
    pub cached_at: DateTime<Utc>,
}

impl Record {
    pub fn new(key: RecordKey, ttl: u64, cached_at: DateTime<Utc>) -> Self {
        Self {
            key,
            ttl,
            cached_at,
        }
    }

    // == Expiration Time ==
    /// Returns `cached_at + ttl`, saturating at the largest representable time.
    pub fn expires_at(&self) -> DateTime<Utc> {
        i64::try_from(self.ttl)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|ttl| self.cached_at.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    // == Is Expired ==
    /// A record is expired once `now` reaches its expiration time.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }

    /// Seconds left until expiration, negative once expired.
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> f64 {
        seconds_between(now, self.expires_at())
    }
}

// == Record Update ==
/// A `(name, category, ttl)` tuple handed to the cache by a record source.
///
/// The ttl is signed so that malformed input can be represented and rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordUpdate {
    pub name: String,
    pub record_type: RecordType,
    pub ttl: i64,
}

impl RecordUpdate {
    pub fn new(name: impl Into<String>, record_type: impl Into<RecordType>, ttl: i64) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.into(),
            ttl,
        }
    }

    pub fn key(&self) -> RecordKey {
        RecordKey::new(self.name.clone(), self.record_type.clone())
    }
}

// == Utility Functions ==
/// Signed distance from `from` to `to` in fractional seconds.
pub(crate) fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delta = to.signed_duration_since(from);
    match delta.num_microseconds() {
        Some(micros) => micros as f64 / 1_000_000.0,
        None => delta.num_seconds() as f64,
    }
}
