use std::fmt;

use super::cache::EventCache;
use super::kind::EstablisherKind;
use super::summary::EstablisherSummary;
use super::types::{EventRecord, Timestamp};

/// Outcome of resolving the establisher for a query event type, with the reason when
/// nothing applies.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    InEffect {
        kind: EstablisherKind,
        summary: EstablisherSummary,
    },
    /// Neither `init` nor `upgrade` has been observed.
    NoEstablisher,
    /// A query-type event was observed strictly after the candidate.
    Superseded {
        candidate: EstablisherKind,
        candidate_at: Timestamp,
        superseded_at: Timestamp,
    },
}

impl Resolution {
    pub fn summary(&self) -> Option<&EstablisherSummary> {
        match self {
            Resolution::InEffect { summary, .. } => Some(summary),
            _ => None,
        }
    }

    pub fn into_summary(self) -> Option<EstablisherSummary> {
        match self {
            Resolution::InEffect { summary, .. } => Some(summary),
            _ => None,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::InEffect { kind, summary } => write!(
                f,
                "{} event {} (timestamp {}) is in effect",
                kind, summary.event_id, summary.timestamp
            ),
            Resolution::NoEstablisher => f.write_str("no init or upgrade event observed"),
            Resolution::Superseded {
                candidate,
                candidate_at,
                superseded_at,
            } => write!(
                f,
                "{} event (timestamp {}) superseded by a query event at timestamp {}",
                candidate, candidate_at, superseded_at
            ),
        }
    }
}

/// Picks the most recent session-establishing record.
///
/// Equal timestamps resolve to `upgrade`: an upgrade recorded in the same instant as an
/// init is the more specific context.
fn select_candidate(cache: &EventCache) -> Option<(EstablisherKind, &EventRecord)> {
    let init = cache.get(EstablisherKind::Init.as_str());
    let upgrade = cache.get(EstablisherKind::Upgrade.as_str());

    match (init, upgrade) {
        (Some(i), Some(u)) if i.timestamp > u.timestamp => Some((EstablisherKind::Init, i)),
        (_, Some(u)) => Some((EstablisherKind::Upgrade, u)),
        (Some(i), None) => Some((EstablisherKind::Init, i)),
        (None, None) => None,
    }
}

pub fn resolve_with_details(query_event_type: &str, cache: &EventCache) -> Resolution {
    let Some((kind, candidate)) = select_candidate(cache) else {
        tracing::debug!(query = %query_event_type, "No session-establishing event in cache");
        return Resolution::NoEstablisher;
    };

    match cache.get(query_event_type) {
        Some(query) if query.timestamp > candidate.timestamp => {
            tracing::debug!(
                query = %query_event_type,
                candidate = %kind,
                candidate_at = %candidate.timestamp,
                superseded_at = %query.timestamp,
                "Candidate superseded by later query event"
            );
            Resolution::Superseded {
                candidate: kind,
                candidate_at: candidate.timestamp,
                superseded_at: query.timestamp,
            }
        }
        _ => Resolution::InEffect {
            kind,
            summary: EstablisherSummary::from_record(candidate),
        },
    }
}

/// Returns the `init`/`upgrade` event still in effect before an event of
/// `query_event_type`, or `None` if there is none or a query-type event has already
/// followed it.
pub fn resolve_preceding_establisher(
    query_event_type: &str,
    cache: &EventCache,
) -> Option<EstablisherSummary> {
    resolve_with_details(query_event_type, cache).into_summary()
}

/// Async entry point for callers composing resolution into a pipeline. Completes on
/// first poll.
pub async fn preceding_establisher(
    query_event_type: &str,
    cache: &EventCache,
) -> Option<EstablisherSummary> {
    resolve_preceding_establisher(query_event_type, cache)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::types::EventBody;

    fn record(event_type: &str, timestamp: i64) -> EventRecord {
        EventRecord::new(timestamp, EventBody::new(event_type, event_type))
    }

    fn cache(records: &[(&str, i64)]) -> EventCache {
        records
            .iter()
            .map(|&(event_type, ts)| (event_type, record(event_type, ts)))
            .collect()
    }

    #[test]
    fn test_empty_cache_returns_none() {
        assert!(resolve_preceding_establisher("dev", &EventCache::new()).is_none());
    }

    #[test]
    fn test_no_establisher_reports_reason() {
        assert_eq!(
            resolve_with_details("dev", &cache(&[("dev", 3)])),
            Resolution::NoEstablisher
        );
    }

    #[test]
    fn test_later_upgrade_beats_init() {
        let resolved = resolve_with_details("dev", &cache(&[("init", 1), ("upgrade", 2)]));
        let Resolution::InEffect { kind, summary } = resolved else {
            panic!("expected in-effect resolution");
        };
        assert_eq!(kind, EstablisherKind::Upgrade);
        assert_eq!(summary.timestamp, Timestamp::from_millis(2));
    }

    #[test]
    fn test_later_init_beats_upgrade() {
        let summary =
            resolve_preceding_establisher("dev", &cache(&[("init", 5), ("upgrade", 2)])).unwrap();
        assert_eq!(summary.event_type, "init");
    }

    #[test]
    fn test_equal_timestamps_prefer_upgrade() {
        let summary =
            resolve_preceding_establisher("dev", &cache(&[("init", 4), ("upgrade", 4)])).unwrap();
        assert_eq!(summary.event_type, "upgrade");
    }

    #[test]
    fn test_later_query_event_supersedes() {
        assert_eq!(
            resolve_with_details("dev", &cache(&[("init", 1), ("dev", 3)])),
            Resolution::Superseded {
                candidate: EstablisherKind::Init,
                candidate_at: Timestamp::from_millis(1),
                superseded_at: Timestamp::from_millis(3),
            }
        );
    }

    #[test]
    fn test_simultaneous_query_event_does_not_supersede() {
        let summary =
            resolve_preceding_establisher("dev", &cache(&[("init", 3), ("dev", 3)])).unwrap();
        assert_eq!(summary.event_type, "init");
    }

    #[test]
    fn test_other_event_types_are_ignored() {
        let summary =
            resolve_preceding_establisher("dev", &cache(&[("init", 1), ("build", 9)])).unwrap();
        assert_eq!(summary.event_type, "init");
    }

    #[test]
    fn test_query_for_establisher_type_never_supersedes_itself() {
        // The candidate is the `upgrade` record, so it is its own query-type event.
        let summary =
            resolve_preceding_establisher("upgrade", &cache(&[("init", 1), ("upgrade", 2)]))
                .unwrap();
        assert_eq!(summary.event_type, "upgrade");
    }

    #[test]
    fn test_query_for_init_uses_newest_init() {
        // A later init becomes the candidate itself rather than invalidating it.
        let summary =
            resolve_preceding_establisher("init", &cache(&[("init", 9), ("upgrade", 2)])).unwrap();
        assert_eq!(summary.timestamp, Timestamp::from_millis(9));
    }

    #[test]
    fn test_fractional_timestamps_compare_exactly() {
        let at = |event_type: &str, ts: f64| {
            EventRecord::at(Timestamp::new(ts), EventBody::new(event_type, event_type))
        };
        let mut cache = EventCache::new();
        cache.insert("init", at("init", 1.25));
        cache.insert("upgrade", at("upgrade", 1.2));
        cache.insert("dev", at("dev", 1.0));

        let summary = resolve_preceding_establisher("dev", &cache).unwrap();
        assert_eq!(summary.event_type, "init");

        cache.insert("dev", at("dev", 1.5));
        assert_eq!(
            resolve_with_details("dev", &cache),
            Resolution::Superseded {
                candidate: EstablisherKind::Init,
                candidate_at: Timestamp::new(1.25),
                superseded_at: Timestamp::new(1.5),
            }
        );
    }

    #[test]
    fn test_resolution_types_cross_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EventCache>();
        assert_send_sync::<EstablisherSummary>();
        assert_send_sync::<Resolution>();
    }

    #[test]
    fn test_display_explains_outcome() {
        let text = resolve_with_details("dev", &cache(&[("init", 1), ("dev", 3)])).to_string();
        assert_eq!(
            text,
            "init event (timestamp 1) superseded by a query event at timestamp 3"
        );
        assert_eq!(
            Resolution::NoEstablisher.to_string(),
            "no init or upgrade event observed"
        );
    }
}
