use std::time::Duration;

use authlog_core::Window;
use serde::Serialize;

/// How a sync run ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncOutcome {
    /// Remote count did not exceed the stored marker; nothing was touched.
    #[default]
    UpToDate,
    /// Every planned window was fetched and the marker advanced.
    Synced,
    /// At least one window failed. Whatever was fetched is committed, the
    /// marker is left at its previous value.
    Partial,
    /// The remote entry count could not be fetched; nothing was touched.
    RemoteUnavailable,
}

/// Orchestrator state, logged on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncPhase {
    Idle,
    CheckingRemote,
    UpToDate,
    Fetching,
    Normalizing,
    Deduplicating,
    Committing,
}

impl std::fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::CheckingRemote => "checking_remote",
            Self::UpToDate => "up_to_date",
            Self::Fetching => "fetching",
            Self::Normalizing => "normalizing",
            Self::Deduplicating => "deduplicating",
            Self::Committing => "committing",
        };
        f.write_str(label)
    }
}

/// Tunables for one sync run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    pub window_size: u64,
    pub parallel_windows: bool,
}

pub const DEFAULT_WINDOW_SIZE: u64 = 500;

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            parallel_windows: false,
        }
    }
}

/// Settings for the HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: String,
    pub request_timeout: Duration,
}

/// Summary returned after a sync run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncStats {
    pub outcome: SyncOutcome,
    pub previous_count: i64,
    pub current_count: i64,
    pub windows_planned: usize,
    pub windows_failed: usize,
    pub records_fetched: usize,
    pub records_rejected: usize,
    pub duplicates_removed: usize,
    pub events_committed: usize,
    /// HTTP status of a rejected count request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_status: Option<u16>,
    pub issues: Vec<SyncIssue>,
}

impl SyncStats {
    /// The count request was refused for the api key.
    pub fn key_rejected(&self) -> bool {
        self.outcome == SyncOutcome::RemoteUnavailable
            && matches!(self.remote_status, Some(401 | 403))
    }
}

/// Non-fatal problems encountered during a sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncIssue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<Window>,
    pub message: String,
}

impl SyncIssue {
    pub fn new(window: Option<Window>, message: impl Into<String>) -> Self {
        Self {
            window,
            message: message.into(),
        }
    }
}

/// Errors talking to the remote API.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("api returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unexpected response body: expected {expected}")]
    UnexpectedShape { expected: &'static str },
}

/// Reasons a single raw record is rejected.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("event {id} has no source ip")]
    MalformedInput { id: i64 },
    #[error("event {id} has an unrepresentable timestamp {value}")]
    InvalidTimestamp { id: i64, value: i64 },
    #[error("undecodable event: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors emitted by the sync pipeline.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("store error: {0}")]
    Store(#[from] authlog_store::StoreError),
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),
}

pub type Result<T> = std::result::Result<T, IngestError>;
