//! Last-observed event per event type.
//!
//! The ingestion side keeps one record per event type and overwrites it on every new
//! observation. This module only models that mapping and decodes snapshots of it; it
//! never writes or evicts anything.
//!
//! # Snapshot Format
//!
//! ```json
//! {
//!   "init":    { "timestamp": 1, "body": { "eventType": "init", "eventId": "..." } },
//!   "upgrade": { "timestamp": 2, "body": { "eventType": "upgrade", "eventId": "..." } },
//!   "dev":     { "timestamp": 3, "body": { "eventType": "dev", "eventId": "..." } }
//! }
//! ```
//!
//! Empty input decodes to an empty cache (the ingestion side may not have written
//! anything yet). Anything else that is not valid JSON is an error.

use fs_err as fs;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;

use super::types::EventRecord;

/// Event type name → most recent record of that type.
///
/// Keys are conventionally equal to `record.body.event_type`, but nothing enforces it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventCache {
    events: HashMap<String, EventRecord>,
}

impl EventCache {
    pub fn new() -> Self {
        EventCache::default()
    }

    /// Stores `record` under `event_type`, returning the record it replaced.
    pub fn insert(
        &mut self,
        event_type: impl Into<String>,
        record: EventRecord,
    ) -> Option<EventRecord> {
        self.events.insert(event_type.into(), record)
    }

    pub fn get(&self, event_type: &str) -> Option<&EventRecord> {
        self.events.get(event_type)
    }

    pub fn contains(&self, event_type: &str) -> bool {
        self.events.contains_key(event_type)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn from_json_str(content: &str) -> Result<Self, SnapshotError> {
        if content.trim().is_empty() {
            tracing::warn!("Empty cache snapshot, using empty cache");
            return Ok(EventCache::new());
        }

        let cache: EventCache = serde_json::from_str(content)?;
        tracing::debug!(events = cache.len(), "Decoded cache snapshot");
        Ok(cache)
    }

    pub fn from_reader(mut reader: impl Read) -> Result<Self, SnapshotError> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(SnapshotError::Input)?;
        EventCache::from_json_str(&content)
    }

    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let content = fs::read_to_string(path).map_err(|source| SnapshotError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        EventCache::from_json_str(&content)
    }
}

impl<K: Into<String>> FromIterator<(K, EventRecord)> for EventCache {
    fn from_iter<I: IntoIterator<Item = (K, EventRecord)>>(iter: I) -> Self {
        EventCache {
            events: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
