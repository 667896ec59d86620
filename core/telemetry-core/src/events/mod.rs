//! Event cache model and session-establisher resolution.

mod cache;
mod kind;
mod resolver;
mod summary;
pub(crate) mod types;

pub use cache::EventCache;
pub use kind::{EstablisherKind, UnknownEstablisher};
pub use resolver::{
    preceding_establisher, resolve_preceding_establisher, resolve_with_details, Resolution,
};
pub use summary::EstablisherSummary;
pub use types::{EventBody, EventRecord, SessionId, Timestamp};
