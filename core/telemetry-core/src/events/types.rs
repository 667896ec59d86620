//! Serialized event types shared by the cache and the resolver.
//!
//! The JSON shape matches what the ingestion side writes for each observed event:
//!
//! ```json
//! { "timestamp": 1712345678901, "body": { "eventType": "init", "eventId": "abc", "sessionId": 100 } }
//! ```

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordering key for an observed event.
///
/// Emitters produce plain JSON numbers, usually epoch milliseconds, but fractional and
/// out-of-`i64`-range values are accepted as-is. Ordering is `f64::total_cmp` with
/// `-0.0` folded into `0.0`, so every pair of timestamps compares.
#[derive(Debug, Clone, Copy)]
pub struct Timestamp(f64);

impl Timestamp {
    pub fn new(value: f64) -> Self {
        // -0.0 + 0.0 == +0.0
        Timestamp(value + 0.0)
    }

    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis as f64)
    }

    /// The value as an integer when it is integral and fits in `i64`.
    fn as_integer(self) -> Option<i64> {
        const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
        if self.0.fract() == 0.0 && (-LIMIT..LIMIT).contains(&self.0) {
            Some(self.0 as i64)
        } else {
            None
        }
    }

    /// Interprets the key as epoch milliseconds, dropping any fractional part. `None`
    /// when out of chrono's range.
    pub fn as_datetime(self) -> Option<DateTime<Utc>> {
        if !self.0.is_finite() {
            return None;
        }
        DateTime::from_timestamp_millis(self.0.floor() as i64)
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_integer() {
            Some(i) => serializer.serialize_i64(i),
            None => serializer.serialize_f64(self.0),
        }
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Timestamp::new)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_integer() {
            Some(i) => write!(f, "{}", i),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Session identifier as reported by the emitting process.
///
/// Emitters are inconsistent about the type (numeric counters, UUID strings), so any
/// JSON scalar is accepted and written back unchanged. An explicit `null` is kept as
/// [`SessionId::Null`], distinct from a body without the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SessionId {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
    Null,
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        SessionId::Text(id.to_string())
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        SessionId::Text(id)
    }
}

impl From<u64> for SessionId {
    fn from(id: u64) -> Self {
        SessionId::Number(id.into())
    }
}

impl From<i64> for SessionId {
    fn from(id: i64) -> Self {
        SessionId::Number(id.into())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionId::Text(s) => f.write_str(s),
            SessionId::Number(n) => write!(f, "{}", n),
            SessionId::Flag(b) => write!(f, "{}", b),
            SessionId::Null => f.write_str("null"),
        }
    }
}

/// Payload of an observed event.
///
/// Only `eventType`, `eventId` and `sessionId` are interpreted. Everything else the
/// emitter attached (`error`, ad hoc extras) is kept in `extra` so the record
/// round-trips unchanged, but never leaves the crate through a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBody {
    pub event_type: String,
    pub event_id: String,
    /// `None` only when the key is missing; `"sessionId": null` is `Some(SessionId::Null)`.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub session_id: Option<SessionId>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Maps a present key to `Some`, including a present `null`. Missing keys fall back to
/// `#[serde(default)]`.
fn deserialize_present<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<SessionId>, D::Error> {
    SessionId::deserialize(deserializer).map(Some)
}

impl EventBody {
    pub fn new(event_type: impl Into<String>, event_id: impl Into<String>) -> Self {
        EventBody {
            event_type: event_type.into(),
            event_id: event_id.into(),
            session_id: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_session_id(mut self, session_id: impl Into<SessionId>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// One observed occurrence of an event type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub timestamp: Timestamp,
    pub body: EventBody,
}

impl EventRecord {
    pub fn new(timestamp: i64, body: EventBody) -> Self {
        EventRecord::at(Timestamp::from_millis(timestamp), body)
    }

    pub fn at(timestamp: Timestamp, body: EventBody) -> Self {
        EventRecord { timestamp, body }
    }
}
