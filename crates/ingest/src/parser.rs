use authlog_core::{NormalizedEvent, RawEvent, Window};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::types::{NormalizeError, SyncIssue};

const USER_NAME_PREFIX: &str = "username is: ";
const TARGET_SUFFIX: &str = "/auth";
const EVENT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

// Applied in order; later rules see the output of earlier ones.
const ACTION_REWRITES: &[(&str, &str)] = &[
    ("Idk", ""),
    ("success", "Login Success"),
    ("Logon Very Success", "Login Success"),
    ("Success login", "Login Success"),
    ("Failed login", "Login Failure"),
    ("Login failed", "Login Failure"),
];

/// Normalized records of one window plus the records that were rejected.
#[derive(Debug, Default)]
pub struct NormalizedBatch {
    pub events: Vec<NormalizedEvent>,
    pub issues: Vec<SyncIssue>,
}

pub fn normalize_user_name(raw: &str) -> String {
    raw.to_lowercase().replace(USER_NAME_PREFIX, "")
}

pub fn normalize_target(raw: &str) -> String {
    raw.replace(TARGET_SUFFIX, "")
}

pub fn normalize_action(raw: &str) -> String {
    ACTION_REWRITES
        .iter()
        .fold(raw.to_string(), |action, &(from, to)| action.replace(from, to))
}

pub fn format_event_time(id: i64, secs: i64) -> Result<String, NormalizeError> {
    let dt = DateTime::<Utc>::from_timestamp(secs, 0)
        .ok_or(NormalizeError::InvalidTimestamp { id, value: secs })?;
    Ok(dt.format(EVENT_TIME_FORMAT).to_string())
}

pub fn normalize_event(raw: &RawEvent) -> Result<NormalizedEvent, NormalizeError> {
    let source_ip = raw
        .source_ips
        .first()
        .ok_or(NormalizeError::MalformedInput { id: raw.id })?;
    Ok(NormalizedEvent {
        id: raw.id,
        user_name: normalize_user_name(&raw.user_name),
        source_ip: source_ip.clone(),
        target: normalize_target(&raw.target),
        action: normalize_action(&raw.action),
        event_time: format_event_time(raw.id, raw.event_time)?,
    })
}

pub fn raw_event_from_value(value: &Value) -> Result<RawEvent, NormalizeError> {
    Ok(RawEvent::deserialize(value)?)
}

/// Decodes and normalizes each record on its own so one bad record only
/// rejects itself.
pub fn normalize_records(values: &[Value], window: Option<Window>) -> NormalizedBatch {
    let mut batch = NormalizedBatch {
        events: Vec::with_capacity(values.len()),
        issues: Vec::new(),
    };
    for value in values {
        match raw_event_from_value(value).and_then(|raw| normalize_event(&raw)) {
            Ok(event) => batch.events.push(event),
            Err(err) => {
                tracing::warn!(error = %err, "rejected raw event");
                batch.issues.push(SyncIssue::new(window, err.to_string()));
            }
        }
    }
    batch
}
