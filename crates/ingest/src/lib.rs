mod client;
mod dedupe;
mod parser;
mod pipeline;
mod types;
mod windows;

pub use client::{ApiClient, EventSource, build_http_client, fetch_api_key};
pub use dedupe::{DedupeOutcome, dedupe_events};
pub use parser::{
    NormalizedBatch, format_event_time, normalize_action, normalize_event, normalize_records,
    normalize_target, normalize_user_name, raw_event_from_value,
};
pub use pipeline::sync_events;
pub use reqwest::blocking::Client as HttpClient;
pub use types::{
    ClientSettings, DEFAULT_WINDOW_SIZE, FetchError, IngestError, NormalizeError, Result,
    SyncIssue, SyncOptions, SyncOutcome, SyncPhase, SyncStats,
};
pub use windows::{Windows, compute_windows};
