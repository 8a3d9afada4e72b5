use serde::{Deserialize, Serialize};

/// Remote dataset size as reported by `GET /get-events` without a range,
/// and as persisted after the last committed sync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressMarker {
    #[serde(rename = "EntryCount")]
    pub entry_count: i64,
    #[serde(rename = "LastEntryHash", default)]
    pub last_entry_hash: String,
}

impl ProgressMarker {
    pub fn new(entry_count: i64, last_entry_hash: impl Into<String>) -> Self {
        Self {
            entry_count,
            last_entry_hash: last_entry_hash.into(),
        }
    }

    /// A remote count strictly greater than this marker means new entries exist.
    pub fn is_behind(&self, current: &ProgressMarker) -> bool {
        current.entry_count > self.entry_count
    }
}

/// One record as the remote API sends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    pub id: i64,
    #[serde(rename = "user_Name", default)]
    pub user_name: String,
    #[serde(rename = "ips", default)]
    pub source_ips: Vec<String>,
    #[serde(default)]
    pub target: String,
    #[serde(rename = "EVENT_0_ACTION", default)]
    pub action: String,
    #[serde(rename = "DateTimeAndStuff")]
    pub event_time: i64,
}

/// Canonical record shape stored in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedEvent {
    #[serde(rename = "ID", alias = "AcmeApiId")]
    pub id: i64,
    #[serde(rename = "UserName")]
    pub user_name: String,
    #[serde(rename = "SourceIp")]
    pub source_ip: String,
    #[serde(rename = "Target")]
    pub target: String,
    #[serde(rename = "Action")]
    pub action: String,
    #[serde(rename = "EventTime")]
    pub event_time: String,
}

/// Inclusive `(from, to)` identifier range requested in one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    pub from: i64,
    pub to: i64,
}

impl Window {
    pub fn new(from: i64, to: i64) -> Self {
        Self { from, to }
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_marker_reads_api_shape() {
        let marker: ProgressMarker =
            serde_json::from_str(r#"{"EntryCount":5213,"LastEntryHash":"abc"}"#).expect("marker");
        assert_eq!(marker, ProgressMarker::new(5213, "abc"));
    }

    #[test]
    fn progress_marker_defaults_missing_hash() {
        let marker: ProgressMarker = serde_json::from_str(r#"{"EntryCount":3}"#).expect("marker");
        assert_eq!(marker.entry_count, 3);
        assert!(marker.last_entry_hash.is_empty());
    }

    #[test]
    fn is_behind_compares_counts() {
        let stored = ProgressMarker::new(10, "");
        assert!(stored.is_behind(&ProgressMarker::new(11, "")));
        assert!(!stored.is_behind(&ProgressMarker::new(10, "")));
        assert!(!stored.is_behind(&ProgressMarker::new(4, "")));
    }

    #[test]
    fn raw_event_reads_api_field_names() {
        let raw: RawEvent = serde_json::from_str(
            r#"{"id":7,"user_Name":"Username is: Bob","ips":["10.0.0.1","10.0.0.2"],"target":"host/auth","EVENT_0_ACTION":"success","DateTimeAndStuff":1600000000}"#,
        )
        .expect("raw event");
        assert_eq!(raw.id, 7);
        assert_eq!(raw.source_ips.len(), 2);
        assert_eq!(raw.action, "success");
        assert_eq!(raw.event_time, 1_600_000_000);
    }

    #[test]
    fn normalized_event_accepts_legacy_id_key() {
        let event: NormalizedEvent = serde_json::from_str(
            r#"{"AcmeApiId":4,"UserName":"bob","SourceIp":"1.1.1.1","Target":"host","Action":"Login Success","EventTime":"2020-09-13 12:26:40 UTC"}"#,
        )
        .expect("event");
        assert_eq!(event.id, 4);
        let written = serde_json::to_string(&event).expect("serialize");
        assert!(written.starts_with(r#"{"ID":4,"#));
    }
}
