//! Output schema for attribution.
//!
//! `EstablisherSummary` is the complete list of fields that leave the crate. Growing it
//! (another optional field next to `session_id`) is a schema change, not a copy of
//! whatever the emitter happened to put in the body.

use serde::{Deserialize, Serialize};

use super::types::{EventRecord, SessionId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstablisherSummary {
    pub timestamp: Timestamp,
    pub event_type: String,
    pub event_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,
}

impl EstablisherSummary {
    /// Projects `record` onto the summary schema. The result owns its data.
    pub fn from_record(record: &EventRecord) -> Self {
        EstablisherSummary {
            timestamp: record.timestamp,
            event_type: record.body.event_type.clone(),
            event_id: record.body.event_id.clone(),
            session_id: record.body.session_id.clone(),
        }
    }
}

impl From<&EventRecord> for EstablisherSummary {
    fn from(record: &EventRecord) -> Self {
        EstablisherSummary::from_record(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::types::EventBody;
    use serde_json::json;

    #[test]
    fn test_projection_drops_error_and_extras() {
        let record = EventRecord::new(
            1,
            EventBody::new("init", "init")
                .with_field("error", json!({}))
                .with_field("foobar", json!("baz")),
        );
        let summary = EstablisherSummary::from_record(&record);
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({ "timestamp": 1, "eventType": "init", "eventId": "init" })
        );
    }

    #[test]
    fn test_projection_keeps_session_id() {
        let record = EventRecord::new(1, EventBody::new("init", "init").with_session_id(100u64));
        let summary = EstablisherSummary::from(&record);
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({ "timestamp": 1, "eventType": "init", "eventId": "init", "sessionId": 100 })
        );
    }

    #[test]
    fn test_projection_keeps_explicit_null_session_id() {
        let mut body = EventBody::new("init", "init");
        body.session_id = Some(SessionId::Null);
        let summary = EstablisherSummary::from_record(&EventRecord::new(1, body));
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({ "timestamp": 1, "eventType": "init", "eventId": "init", "sessionId": null })
        );
    }

    #[test]
    fn test_serialized_field_order() {
        let record = EventRecord::new(7, EventBody::new("upgrade", "u-1").with_session_id("s"));
        let text = serde_json::to_string(&EstablisherSummary::from_record(&record)).unwrap();
        assert_eq!(
            text,
            r#"{"timestamp":7,"eventType":"upgrade","eventId":"u-1","sessionId":"s"}"#
        );
    }
}
