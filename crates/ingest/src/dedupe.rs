use std::collections::HashSet;

use authlog_core::NormalizedEvent;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupeOutcome {
    pub events: Vec<NormalizedEvent>,
    pub duplicates: usize,
    pub out_of_range: usize,
}

/// Keeps the first occurrence of every id, in input order.
///
/// `max_id` is the expected exclusive upper bound of ids (the remote entry
/// count). Ids outside `[0, max_id)` are kept and counted, never rejected.
pub fn dedupe_events(events: Vec<NormalizedEvent>, max_id: Option<i64>) -> DedupeOutcome {
    let mut seen = HashSet::with_capacity(events.len());
    let mut outcome = DedupeOutcome {
        events: Vec::with_capacity(events.len()),
        ..DedupeOutcome::default()
    };
    for event in events {
        if let Some(max_id) = max_id
            && !(0..max_id).contains(&event.id)
        {
            outcome.out_of_range += 1;
        }
        if seen.insert(event.id) {
            outcome.events.push(event);
        } else {
            debug!(id = event.id, "dropping duplicate event");
            outcome.duplicates += 1;
        }
    }
    if outcome.out_of_range > 0 {
        warn!(
            count = outcome.out_of_range,
            max_id = max_id.unwrap_or_default(),
            "events with ids outside the expected range"
        );
    }
    outcome
}
