use authlog_core::NormalizedEvent;
use serde::Deserialize;

/// A log file may hold bare objects (NDJSON) and arrays of objects, in any
/// concatenation. Older files were written as back-to-back arrays.
#[derive(Deserialize)]
#[serde(untagged)]
enum LogChunk {
    Many(Vec<NormalizedEvent>),
    One(NormalizedEvent),
}

pub(crate) fn decode_log(contents: &str) -> Result<Vec<NormalizedEvent>, serde_json::Error> {
    let mut events = Vec::new();
    let stream = serde_json::Deserializer::from_str(contents).into_iter::<LogChunk>();
    for chunk in stream {
        match chunk? {
            LogChunk::Many(mut batch) => events.append(&mut batch),
            LogChunk::One(event) => events.push(event),
        }
    }
    Ok(events)
}

pub(crate) fn encode_log(events: &[NormalizedEvent]) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = Vec::with_capacity(events.len() * 128);
    for event in events {
        serde_json::to_writer(&mut out, event)?;
        out.push(b'\n');
    }
    Ok(out)
}
