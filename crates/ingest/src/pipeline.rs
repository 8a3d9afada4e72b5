use std::time::Instant;

use authlog_core::{NormalizedEvent, ProgressMarker, Window};
use authlog_store::{LogStore, StoreError};
use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::client::EventSource;
use crate::dedupe::dedupe_events;
use crate::parser::normalize_records;
use crate::types::{
    FetchError, Result, SyncIssue, SyncOptions, SyncOutcome, SyncPhase, SyncStats,
};
use crate::windows::compute_windows;

struct PhaseTracker {
    current: SyncPhase,
}

impl PhaseTracker {
    fn new() -> Self {
        Self {
            current: SyncPhase::Idle,
        }
    }

    fn enter(&mut self, next: SyncPhase) {
        debug!(from = %self.current, to = %next, "sync phase");
        self.current = next;
    }
}

fn read_previous_marker(store: &LogStore, stats: &mut SyncStats) -> Result<ProgressMarker> {
    match store.read_progress() {
        Ok(Some(marker)) => Ok(marker),
        Ok(None) => Ok(ProgressMarker::default()),
        Err(err @ StoreError::CorruptProgress { .. }) => {
            warn!(error = %err, "progress marker unreadable; starting from zero");
            stats.issues.push(SyncIssue::new(None, err.to_string()));
            Ok(ProgressMarker::default())
        }
        Err(err) => Err(err.into()),
    }
}

fn fetch_windows(
    source: &dyn EventSource,
    windows: &[Window],
    parallel: bool,
) -> Vec<(Window, std::result::Result<Vec<Value>, FetchError>)> {
    let fetch = |window: &Window| {
        info!(from = window.from, to = window.to, "reading log id range");
        (*window, source.fetch_window(*window))
    };
    if parallel {
        // Indexed collect keeps window order, so first-occurrence dedup stays deterministic.
        windows.par_iter().map(fetch).collect()
    } else {
        windows.iter().map(fetch).collect()
    }
}

/// Brings `store` up to date with `source`.
///
/// Only persistence failures are returned as errors. Remote failures are
/// logged, recorded in [`SyncStats::issues`] and reflected in the outcome.
pub fn sync_events(
    store: &mut LogStore,
    source: &dyn EventSource,
    options: &SyncOptions,
) -> Result<SyncStats> {
    let started = Instant::now();
    let mut stats = SyncStats::default();
    let mut phase = PhaseTracker::new();

    phase.enter(SyncPhase::CheckingRemote);
    let current = match source.fetch_total_count() {
        Ok(marker) => marker,
        Err(err) => {
            warn!(error = %err, "failed to fetch entry count; treating as no new data");
            if let FetchError::Status { status, .. } = &err {
                stats.remote_status = Some(*status);
            }
            stats.issues.push(SyncIssue::new(None, err.to_string()));
            stats.outcome = SyncOutcome::RemoteUnavailable;
            phase.enter(SyncPhase::Idle);
            return Ok(stats);
        }
    };
    let previous = read_previous_marker(store, &mut stats)?;
    stats.previous_count = previous.entry_count;
    stats.current_count = current.entry_count;

    if !previous.is_behind(&current) {
        phase.enter(SyncPhase::UpToDate);
        info!(
            stored = previous.entry_count,
            remote = current.entry_count,
            "logs are up to date"
        );
        stats.outcome = SyncOutcome::UpToDate;
        phase.enter(SyncPhase::Idle);
        return Ok(stats);
    }
    info!(
        old_count = previous.entry_count,
        new_count = current.entry_count,
        "new logs available"
    );
    // Read before fetching: a log that cannot be decoded must not be overwritten.
    let existing = store.read_log()?;

    phase.enter(SyncPhase::Fetching);
    let windows: Vec<Window> =
        compute_windows(previous.entry_count, current.entry_count, options.window_size).collect();
    stats.windows_planned = windows.len();
    let fetched = fetch_windows(source, &windows, options.parallel_windows);

    phase.enter(SyncPhase::Normalizing);
    let mut fresh: Vec<NormalizedEvent> = Vec::new();
    for (window, result) in fetched {
        match result {
            Ok(records) => {
                stats.records_fetched += records.len();
                let batch = normalize_records(&records, Some(window));
                stats.records_rejected += batch.issues.len();
                stats.issues.extend(batch.issues);
                fresh.extend(batch.events);
            }
            Err(err) => {
                warn!(from = window.from, to = window.to, error = %err, "window fetch failed");
                stats.windows_failed += 1;
                stats.issues.push(SyncIssue::new(Some(window), err.to_string()));
            }
        }
    }

    if stats.windows_failed == stats.windows_planned {
        warn!(windows = stats.windows_planned, "every window failed; log left untouched");
        stats.outcome = SyncOutcome::Partial;
        phase.enter(SyncPhase::Idle);
        return Ok(stats);
    }

    phase.enter(SyncPhase::Deduplicating);
    let mut combined = existing;
    combined.append(&mut fresh);
    let deduped = dedupe_events(combined, Some(current.entry_count));
    stats.duplicates_removed = deduped.duplicates;
    if deduped.duplicates > 0 {
        info!(count = deduped.duplicates, "removed duplicate entries");
    }

    phase.enter(SyncPhase::Committing);
    // The marker only advances once every planned window came back, so a
    // failed window is fetched again on the next run.
    let marker = (stats.windows_failed == 0).then_some(&current);
    let summary = store.commit(&deduped.events, marker)?;
    stats.events_committed = summary.events_written;
    stats.outcome = if summary.marker_written {
        SyncOutcome::Synced
    } else {
        SyncOutcome::Partial
    };

    phase.enter(SyncPhase::Idle);
    info!(
        outcome = ?stats.outcome,
        windows = stats.windows_planned,
        failed = stats.windows_failed,
        fetched = stats.records_fetched,
        rejected = stats.records_rejected,
        duplicates = stats.duplicates_removed,
        committed = stats.events_committed,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "sync finished"
    );
    Ok(stats)
}
