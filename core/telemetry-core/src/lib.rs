//! Attribution of telemetry events to the session that produced them.
//!
//! The ingestion side keeps the last observed event of every type in an
//! [`EventCache`]. When a downstream event needs context, [`resolve_preceding_establisher`]
//! answers which `init` or `upgrade` event is still in effect and returns a trimmed
//! [`EstablisherSummary`] of it.
//!
//! ```
//! use telemetry_core::{resolve_preceding_establisher, EventBody, EventCache, EventRecord};
//!
//! let mut cache = EventCache::new();
//! cache.insert("init", EventRecord::new(1, EventBody::new("init", "a1")));
//! cache.insert("upgrade", EventRecord::new(2, EventBody::new("upgrade", "b2")));
//!
//! let summary = resolve_preceding_establisher("dev", &cache).unwrap();
//! assert_eq!(summary.event_id, "b2");
//!
//! cache.insert("dev", EventRecord::new(3, EventBody::new("dev", "c3")));
//! assert!(resolve_preceding_establisher("dev", &cache).is_none());
//! ```

pub mod error;
pub mod events;

pub use error::SnapshotError;
pub use events::{
    preceding_establisher, resolve_preceding_establisher, resolve_with_details,
    EstablisherKind, EstablisherSummary, EventBody, EventCache, EventRecord, Resolution,
    SessionId, Timestamp, UnknownEstablisher,
};
